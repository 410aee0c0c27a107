use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{Nrf24Error, Nrf24l01};
use crate::radio::prelude::EsbDetails;

#[cfg(any(feature = "defmt", feature = "std"))]
use super::{
    bit_fields::{Config, RfSetup, SetupRetry},
    registers,
};
#[cfg(any(feature = "defmt", feature = "std"))]
use crate::{
    radio::prelude::{EsbFifo, EsbMode, EsbPipe},
    DataRate, FifoState, Mode, PaLevel, StatusFlags,
};

#[cfg(all(feature = "std", not(feature = "defmt")))]
extern crate std;

/// A snapshot of the registers that [`EsbDetails::print_details()`] shows.
#[cfg(any(feature = "defmt", feature = "std"))]
struct Details {
    channel: u8,
    data_rate: DataRate,
    pa_level: PaLevel,
    lna: bool,
    address_width: u8,
    retry_delay: u16,
    retry_count: u8,
    lost_packets: u8,
    last_arc: u8,
    irq_events: StatusFlags,
    status: StatusFlags,
    tx_fifo: FifoState,
    rx_fifo: FifoState,
    feature: u8,
    dynpd: u8,
    en_aa: u8,
    en_rxaddr: u8,
    prim_rx: bool,
    mode: Mode,
    tx_address: [u8; 5],
    pipe_addresses: [[u8; 5]; 6],
    payload_widths: [u8; 6],
}

#[cfg(any(feature = "defmt", feature = "std"))]
impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn read_details(&mut self) -> Result<Details, Nrf24Error<SPI::Error, DO::Error>> {
        let rf_setup = RfSetup::from_bits(self.read_register(registers::RF_SETUP)?);
        let retries = SetupRetry::from_bits(self.read_register(registers::SETUP_RETR)?);
        let observe_tx = self.read_register(registers::OBSERVE_TX)?;
        let config = Config::from_bits(self.read_register(registers::CONFIG)?);

        // addresses are printed MSByte first
        let mut tx_address = [0u8; 5];
        self.get_tx_address(&mut tx_address)?;
        tx_address.reverse();
        let mut pipe_addresses = [[0u8; 5]; 6];
        for pipe in 0..6u8 {
            let len = if pipe < 2 { 5 } else { 1 };
            self.spi_read(len as u8, registers::RX_ADDR_P0 + pipe)?;
            // pipes 2-5 share the upper bytes of pipe 1
            let mut address = if pipe < 2 { [0u8; 5] } else { pipe_addresses[1] };
            address[..len].copy_from_slice(&self._buf[1..=len]);
            pipe_addresses[pipe as usize] = address;
        }
        for address in pipe_addresses.iter_mut() {
            address.reverse();
        }
        let mut payload_widths = [0u8; 6];
        for (pipe, width) in payload_widths.iter_mut().enumerate() {
            *width = self.read_register(registers::RX_PW_P0 + pipe as u8)? & 0x3F;
        }

        Ok(Details {
            channel: self.read_register(registers::RF_CH)?,
            data_rate: rf_setup.data_rate(),
            pa_level: rf_setup.pa_level(),
            lna: rf_setup.lna_hcurr(),
            address_width: self.get_address_width()?,
            retry_delay: retries.delay_us(),
            retry_count: retries.arc(),
            lost_packets: observe_tx >> 4,
            last_arc: observe_tx & 0xF,
            irq_events: config.irq_events(),
            status: self._status,
            tx_fifo: self.get_fifo_state(true)?,
            rx_fifo: self.get_fifo_state(false)?,
            feature: self.read_register(registers::FEATURE)?,
            dynpd: self.read_register(registers::DYNPD)?,
            en_aa: self.read_register(registers::EN_AA)?,
            en_rxaddr: self.read_register(registers::EN_RXADDR)?,
            prim_rx: config.prim_rx(),
            mode: self.mode(),
            tx_address,
            pipe_addresses,
            payload_widths,
        })
    }
}

impl<SPI, DO, DELAY> EsbDetails for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, DO::Error>;

    #[cfg(feature = "defmt")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let d = self.read_details()?;
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            d.channel,
            d.channel as u16 + 2400u16
        );
        defmt::println!("RF Data Rate______________{}", d.data_rate);
        defmt::println!("RF Power Amplifier________{}", d.pa_level);
        defmt::println!("RF LNA enabled____________{=bool}", d.lna);
        defmt::println!("Address width_____________{=u8} bytes", d.address_width);
        defmt::println!("Auto retry delay__________{=u16} us", d.retry_delay);
        defmt::println!("Auto retry attempts_______{=u8} maximum", d.retry_count);
        defmt::println!("Packets lost______________{=u8}", d.lost_packets);
        defmt::println!("Retries of last TX________{=u8}", d.last_arc);
        defmt::println!("IRQ events enabled________{}", d.irq_events);
        defmt::println!("Status____________________{}", d.status);
        defmt::println!("TX FIFO___________________{}", d.tx_fifo);
        defmt::println!("RX FIFO___________________{}", d.rx_fifo);
        defmt::println!("Ask no ACK allowed________{=bool}", d.feature & 1 > 0);
        defmt::println!("ACK Payload enabled_______{=bool}", d.feature & 2 > 0);
        defmt::println!("Dynamic Payloads__________0b{=0..8}", d.dynpd);
        defmt::println!("Auto Acknowledgment_______0b{=0..8}", d.en_aa);
        let rx = defmt::intern!("R");
        let tx = defmt::intern!("T");
        defmt::println!(
            "Primary Mode______________{=istr}X",
            if d.prim_rx { rx } else { tx }
        );
        defmt::println!("Mode______________________{}", d.mode);
        defmt::println!("TX address________________{=[u8; 5]:02X}", d.tx_address);
        for (pipe, address) in d.pipe_addresses.iter().enumerate() {
            defmt::println!(
                "Pipe {=usize} (open: {=bool}) bound to {=[u8; 5]:02X}, {=u8} bytes",
                pipe,
                d.en_rxaddr & (1 << pipe) > 0,
                *address,
                d.payload_widths[pipe]
            );
        }
        Ok(())
    }

    #[cfg(all(feature = "std", not(feature = "defmt")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let d = self.read_details()?;
        std::println!(
            "Channel___________________{} ~ {} MHz",
            d.channel,
            d.channel as u16 + 2400u16
        );
        std::println!("RF Data Rate______________{}", d.data_rate);
        std::println!("RF Power Amplifier________{}", d.pa_level);
        std::println!("RF LNA enabled____________{}", d.lna);
        std::println!("Address width_____________{} bytes", d.address_width);
        std::println!("Auto retry delay__________{} us", d.retry_delay);
        std::println!("Auto retry attempts_______{} maximum", d.retry_count);
        std::println!("Packets lost______________{}", d.lost_packets);
        std::println!("Retries of last TX________{}", d.last_arc);
        std::println!("IRQ events enabled________{}", d.irq_events);
        std::println!("Status____________________{}", d.status);
        std::println!("TX FIFO___________________{}", d.tx_fifo);
        std::println!("RX FIFO___________________{}", d.rx_fifo);
        std::println!("Ask no ACK allowed________{}", d.feature & 1 > 0);
        std::println!("ACK Payload enabled_______{}", d.feature & 2 > 0);
        std::println!("Dynamic Payloads__________{:#010b}", d.dynpd);
        std::println!("Auto Acknowledgment_______{:#010b}", d.en_aa);
        std::println!(
            "Primary Mode______________{}X",
            if d.prim_rx { "R" } else { "T" }
        );
        std::println!("Mode______________________{}", d.mode);
        std::println!("TX address________________{:02X?}", d.tx_address);
        for (pipe, address) in d.pipe_addresses.iter().enumerate() {
            std::println!(
                "Pipe {pipe} ({}) bound to {:02X?}, {} bytes",
                if d.en_rxaddr & (1 << pipe) > 0 {
                    " open "
                } else {
                    "closed"
                },
                address,
                d.payload_widths[pipe]
            );
        }
        Ok(())
    }

    #[cfg(not(any(feature = "defmt", feature = "std")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }
}
