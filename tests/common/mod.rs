//! A behavioral model of the nRF24L01, good enough to drive the driver end to end.
//!
//! [`FakeSpi`], [`FakeCe`] and [`FakeIrq`] share one [`ChipState`]. The model keeps
//! a register file, the TX/RX FIFOs, the feature lock, and a single peer on the
//! other end of the air link.
#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque, convert::Infallible, rc::Rc};

use embedded_hal::{
    digital::{ErrorType as PinErrorType, OutputPin},
    spi::{ErrorType as SpiErrorType, Operation, SpiDevice},
};
use embedded_hal_async::digital::Wait;
use embedded_hal_mock::eh1::delay::NoopDelay;
use nrf24l01::radio::{commands, registers, Nrf24l01};

pub type SimRadio = Nrf24l01<FakeSpi, FakeCe, NoopDelay>;

const FIFO_DEPTH: usize = 3;
const RX_DR: u8 = 0x40;
const TX_DS: u8 = 0x20;
const MAX_RT: u8 = 0x10;

#[derive(Clone, Debug)]
struct TxEntry {
    payload: Vec<u8>,
    no_ack: bool,
}

#[derive(Debug)]
pub struct ChipState {
    regs: [u8; 0x20],
    rx_addr_p0: [u8; 5],
    rx_addr_p1: [u8; 5],
    tx_addr: [u8; 5],
    tx_fifo: VecDeque<TxEntry>,
    ack_fifo: VecDeque<(u8, Vec<u8>)>,
    rx_fifo: VecDeque<(u8, Vec<u8>)>,
    features_active: bool,
    reuse_tx: bool,
    ce: bool,
    on_air: VecDeque<([u8; 5], Vec<u8>)>,
    /// Does the peer acknowledge our transmissions?
    pub peer_reachable: bool,
    /// The payload the peer attaches to its next ACK.
    pub peer_ack_payload: Option<Vec<u8>>,
    /// Payloads that left the radio, in order.
    pub transmitted: Vec<Vec<u8>>,
    /// The number of transmissions that ended with MAX_RT.
    pub failed_attempts: usize,
    /// The number of ACTIVATE commands received.
    pub activations: usize,
    /// The number of SPI frames (CSN assertions).
    pub frames: usize,
    /// The number of CE rising edges.
    pub ce_pulses: usize,
}

impl Default for ChipState {
    fn default() -> Self {
        let mut regs = [0u8; 0x20];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0F;
        regs[0x0C] = 0xC3;
        regs[0x0D] = 0xC4;
        regs[0x0E] = 0xC5;
        regs[0x0F] = 0xC6;
        Self {
            regs,
            rx_addr_p0: [0xE7; 5],
            rx_addr_p1: [0xC2; 5],
            tx_addr: [0xE7; 5],
            tx_fifo: VecDeque::new(),
            ack_fifo: VecDeque::new(),
            rx_fifo: VecDeque::new(),
            features_active: false,
            reuse_tx: false,
            ce: false,
            on_air: VecDeque::new(),
            peer_reachable: true,
            peer_ack_payload: None,
            transmitted: Vec::new(),
            failed_attempts: 0,
            activations: 0,
            frames: 0,
            ce_pulses: 0,
        }
    }
}

impl ChipState {
    pub fn reg(&self, register: u8) -> u8 {
        match register {
            registers::STATUS => self.status_byte(),
            registers::FIFO_STATUS => self.fifo_status(),
            _ => self.regs[register as usize],
        }
    }

    pub fn rx_addr_p0(&self) -> [u8; 5] {
        self.rx_addr_p0
    }

    pub fn tx_fifo_len(&self) -> usize {
        self.tx_fifo.len() + self.ack_fifo.len()
    }

    pub fn rx_fifo_len(&self) -> usize {
        self.rx_fifo.len()
    }

    pub fn ce(&self) -> bool {
        self.ce
    }

    /// Is the (active low) IRQ line asserted?
    pub fn irq_asserted(&self) -> bool {
        let masked = self.regs[registers::CONFIG as usize] & 0x70;
        self.regs[registers::STATUS as usize] & 0x70 & !masked != 0
    }

    /// Set IRQ flags as if the chip raised them.
    pub fn raise_flags(&mut self, flags: u8) {
        self.regs[registers::STATUS as usize] |= flags & 0x70;
    }

    /// Queue a frame from the peer, addressed to `address`.
    pub fn put_on_air(&mut self, address: [u8; 5], payload: &[u8]) {
        self.on_air.push_back((address, payload.to_vec()));
        self.listen();
    }

    fn powered(&self) -> bool {
        self.regs[registers::CONFIG as usize] & 0x02 != 0
    }

    fn prim_rx(&self) -> bool {
        self.regs[registers::CONFIG as usize] & 0x01 != 0
    }

    fn status_byte(&self) -> u8 {
        let pipe = self.rx_fifo.front().map(|(pipe, _)| *pipe).unwrap_or(7);
        let tx_full = (self.tx_fifo_len() >= FIFO_DEPTH) as u8;
        (self.regs[registers::STATUS as usize] & 0x70) | (pipe << 1) | tx_full
    }

    fn fifo_status(&self) -> u8 {
        let tx_len = self.tx_fifo_len();
        ((self.reuse_tx as u8) << 6)
            | (((tx_len >= FIFO_DEPTH) as u8) << 5)
            | (((tx_len == 0) as u8) << 4)
            | (((self.rx_fifo.len() >= FIFO_DEPTH) as u8) << 1)
            | (self.rx_fifo.is_empty() as u8)
    }

    fn pipe_address(&self, pipe: u8) -> [u8; 5] {
        match pipe {
            0 => self.rx_addr_p0,
            1 => self.rx_addr_p1,
            _ => {
                let mut address = self.rx_addr_p1;
                address[0] = self.regs[(registers::RX_ADDR_P0 + pipe) as usize];
                address
            }
        }
    }

    fn read_register(&self, register: u8, out: &mut [u8]) {
        let address = match register {
            registers::RX_ADDR_P0 => Some(&self.rx_addr_p0),
            registers::RX_ADDR_P1 => Some(&self.rx_addr_p1),
            registers::TX_ADDR => Some(&self.tx_addr),
            _ => None,
        };
        match address {
            Some(address) => {
                let len = out.len().min(5);
                out[..len].copy_from_slice(&address[..len]);
            }
            None => {
                if let Some(first) = out.first_mut() {
                    *first = self.reg(register);
                }
            }
        }
    }

    fn write_register(&mut self, register: u8, data: &[u8]) {
        let Some(&value) = data.first() else {
            return;
        };
        let len = data.len().min(5);
        match register {
            registers::RX_ADDR_P0 => self.rx_addr_p0[..len].copy_from_slice(&data[..len]),
            registers::RX_ADDR_P1 => self.rx_addr_p1[..len].copy_from_slice(&data[..len]),
            registers::TX_ADDR => self.tx_addr[..len].copy_from_slice(&data[..len]),
            registers::STATUS => self.regs[registers::STATUS as usize] &= !(value & 0x70),
            registers::DYNPD | registers::FEATURE => {
                if self.features_active {
                    self.regs[register as usize] = value;
                }
            }
            registers::OBSERVE_TX | registers::CD | registers::FIFO_STATUS => (),
            _ => self.regs[register as usize] = value,
        }
    }

    /// Exchange one CSN framed command.
    fn exchange(&mut self, frame: &mut [u8]) {
        self.frames += 1;
        let Some(&command) = frame.first() else {
            return;
        };
        let status = self.status_byte();
        let data: Vec<u8> = frame[1..].to_vec();
        let out = &mut frame[1..];
        out.fill(0);
        match command {
            0x00..=0x1F => self.read_register(command, out),
            0x20..=0x3F => self.write_register(command & 0x1F, &data),
            commands::ACTIVATE => {
                if data.first() == Some(&commands::ACTIVATE_MAGIC) {
                    self.activations += 1;
                    self.features_active = !self.features_active;
                }
            }
            commands::R_RX_PL_WID => {
                if let Some(first) = out.first_mut() {
                    *first = self.rx_fifo.front().map(|(_, p)| p.len() as u8).unwrap_or(0);
                }
            }
            commands::R_RX_PAYLOAD => {
                if let Some((_, payload)) = self.rx_fifo.pop_front() {
                    let len = payload.len().min(out.len());
                    out[..len].copy_from_slice(&payload[..len]);
                }
            }
            commands::W_TX_PAYLOAD | commands::W_TX_PAYLOAD_NO_ACK => {
                if self.tx_fifo_len() < FIFO_DEPTH {
                    self.reuse_tx = false;
                    self.tx_fifo.push_back(TxEntry {
                        payload: data,
                        no_ack: command == commands::W_TX_PAYLOAD_NO_ACK,
                    });
                }
            }
            0xA8..=0xAD => {
                if self.tx_fifo_len() < FIFO_DEPTH {
                    self.ack_fifo.push_back((command & 7, data));
                }
            }
            commands::FLUSH_TX => {
                self.tx_fifo.clear();
                self.ack_fifo.clear();
                self.reuse_tx = false;
            }
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::REUSE_TX_PL => self.reuse_tx = true,
            _ => (),
        }
        frame[0] = status;
    }

    fn set_ce(&mut self, level: bool) {
        let rising = level && !self.ce;
        self.ce = level;
        if rising {
            self.ce_pulses += 1;
            if self.prim_rx() {
                self.listen();
            } else {
                self.transmit();
            }
        }
    }

    /// Receive the queued frames, if listening.
    fn listen(&mut self) {
        if !(self.ce && self.powered() && self.prim_rx()) {
            return;
        }
        while let Some((address, payload)) = self.on_air.pop_front() {
            let open = self.regs[registers::EN_RXADDR as usize];
            let pipe = (0..6u8).find(|p| open & (1 << p) != 0 && self.pipe_address(*p) == address);
            let Some(pipe) = pipe else {
                continue;
            };
            if self.rx_fifo.len() >= FIFO_DEPTH {
                continue;
            }
            self.rx_fifo.push_back((pipe, payload));
            self.regs[registers::STATUS as usize] |= RX_DR;
            if self.regs[registers::EN_AA as usize] & (1 << pipe) != 0 {
                if let Some(i) = self.ack_fifo.iter().position(|(p, _)| *p == pipe) {
                    self.ack_fifo.remove(i);
                }
            }
        }
    }

    /// Send the top of the TX FIFO.
    fn transmit(&mut self) {
        let stalled = self.regs[registers::STATUS as usize] & MAX_RT != 0;
        if !self.powered() || stalled {
            return;
        }
        let Some(entry) = self.tx_fifo.front().cloned() else {
            return;
        };
        let needs_ack = self.regs[registers::EN_AA as usize] & 1 != 0 && !entry.no_ack;
        // the ACK is only heard if pipe 0 listens on the TX address
        let acked = self.peer_reachable && self.rx_addr_p0 == self.tx_addr;
        if needs_ack && !acked {
            self.failed_attempts += 1;
            let arc = self.regs[registers::SETUP_RETR as usize] & 0x0F;
            let lost = (self.regs[registers::OBSERVE_TX as usize] >> 4).saturating_add(1).min(15);
            self.regs[registers::OBSERVE_TX as usize] = (lost << 4) | arc;
            self.regs[registers::STATUS as usize] |= MAX_RT;
            return;
        }
        if !self.reuse_tx {
            self.tx_fifo.pop_front();
        }
        self.transmitted.push(entry.payload);
        self.regs[registers::OBSERVE_TX as usize] &= 0xF0;
        self.regs[registers::STATUS as usize] |= TX_DS;
        if needs_ack {
            if let Some(ack) = self.peer_ack_payload.take() {
                if self.rx_fifo.len() < FIFO_DEPTH {
                    self.rx_fifo.push_back((0, ack));
                    self.regs[registers::STATUS as usize] |= RX_DR;
                }
            }
        }
    }
}

/// A handle on the simulated chip, for inspection from tests.
#[derive(Clone, Default)]
pub struct Sim {
    chip: Rc<RefCell<ChipState>>,
}

impl Sim {
    pub fn chip(&self) -> std::cell::RefMut<'_, ChipState> {
        self.chip.borrow_mut()
    }

    pub fn irq(&self) -> FakeIrq {
        FakeIrq {
            chip: self.chip.clone(),
        }
    }
}

pub struct FakeSpi {
    chip: Rc<RefCell<ChipState>>,
}

impl SpiErrorType for FakeSpi {
    type Error = Infallible;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Infallible> {
        let mut chip = self.chip.borrow_mut();
        for operation in operations {
            match operation {
                Operation::TransferInPlace(buf) => chip.exchange(buf),
                Operation::Write(buf) => chip.exchange(&mut buf.to_vec()),
                Operation::DelayNs(_) => (),
                _ => unimplemented!("the driver only exchanges whole frames in place"),
            }
        }
        Ok(())
    }
}

pub struct FakeCe {
    chip: Rc<RefCell<ChipState>>,
}

impl PinErrorType for FakeCe {
    type Error = Infallible;
}

impl OutputPin for FakeCe {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.chip.borrow_mut().set_ce(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.chip.borrow_mut().set_ce(true);
        Ok(())
    }
}

/// The IRQ line. Waiting on a level that never comes spins forever.
pub struct FakeIrq {
    chip: Rc<RefCell<ChipState>>,
}

impl FakeIrq {
    async fn wait_until(&self, asserted: bool) {
        core::future::poll_fn(|cx| {
            if self.chip.borrow().irq_asserted() == asserted {
                core::task::Poll::Ready(())
            } else {
                cx.waker().wake_by_ref();
                core::task::Poll::Pending
            }
        })
        .await
    }
}

impl PinErrorType for FakeIrq {
    type Error = Infallible;
}

impl Wait for FakeIrq {
    async fn wait_for_high(&mut self) -> Result<(), Infallible> {
        self.wait_until(false).await;
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Infallible> {
        self.wait_until(true).await;
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Infallible> {
        self.wait_until(false).await;
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Infallible> {
        self.wait_until(true).await;
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// A radio wired to a fresh simulated chip.
pub fn radio() -> (SimRadio, Sim) {
    let sim = Sim::default();
    let spi = FakeSpi {
        chip: sim.chip.clone(),
    };
    let ce = FakeCe {
        chip: sim.chip.clone(),
    };
    (Nrf24l01::new(ce, spi, NoopDelay), sim)
}
