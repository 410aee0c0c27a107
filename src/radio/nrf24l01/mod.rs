use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod constants;
mod data_rate;
mod details;
mod features;
mod fifo;
mod init;
mod irq;
mod mode;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod rx;
mod status;
mod tx;
pub use constants::{commands, mnemonics, registers};

use crate::{log::debug, StatusFlags};
use bit_fields::SessionState;

/// The errors that a [`Nrf24l01`] operation can produce.
///
/// [`Nrf24Error::Spi`] and [`Nrf24Error::Gpo`] wrap the HAL errors of the bus and the
/// CE pin. All other variants describe a refused request or an outcome reported by
/// the radio. None of them leave the driver in an unusable state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// The IRQ input pin failed while waiting for an interrupt.
    IrqPin,
    /// A buffer was empty or too long, or a pipe, channel, or length was out of range.
    ///
    /// Also returned by [`EsbRx::get_data()`](fn@crate::radio::prelude::EsbRx::get_data)
    /// when the pipe with data ready is not the requested pipe.
    InvalidArgument,
    /// The TX FIFO was full before the payload could be written.
    ///
    /// Retry after a transmission completes or after
    /// [`EsbFifo::flush_tx()`](fn@crate::radio::prelude::EsbFifo::flush_tx).
    TxFifoFull,
    /// The transmission was not acknowledged after the configured number of retries.
    ///
    /// The payload remains in the TX FIFO. The caller decides whether to retry
    /// or flush it.
    MaxRetransmitsReached,
    /// The caller's buffer cannot hold the received payload.
    ///
    /// Nothing was read and the payload remains at the top of the RX FIFO.
    BufferTooSmall {
        /// The length of the pending payload.
        available: u8,
    },
    /// No pipe has data ready.
    NotReady,
    /// The RX FIFO was empty when data was expected.
    RxFifoEmpty,
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// This is returned when the radio reports a payload length of 0 or more than 32 bytes.
    BinaryCorruption,
    /// The operation requires the radio to be in standby or powered down.
    RadioActive,
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// It also provides the register access layer that the traits are built upon,
/// and the interrupt servicing functions.
pub struct Nrf24l01<SPI, DO, DELAY> {
    _spi: SPI,
    ce_pin: DO,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _session: SessionState,
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Nrf24l01`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter). Each command frame is exactly one
    /// `SpiDevice` transaction, so CSN is asserted for the whole frame and
    /// released after it.
    ///
    /// Nothing is sent to the radio until
    /// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) is called.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24l01<SPI, DO, DELAY> {
        Nrf24l01 {
            ce_pin,
            _spi: spi,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            _session: SessionState::new(),
        }
    }

    /// Release the SPI device, CE pin, and delay implementation.
    pub fn release(self) -> (SPI, DO, DELAY) {
        (self._spi, self.ce_pin, self._delay_impl)
    }

    fn spi_transfer(&mut self, len: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Send a `command` followed by `len` zeros. The response lands in `self._buf[1..]`.
    ///
    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_read(&mut self, len: u8, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self._buf[1..=len as usize].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        register: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = register | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        register: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_command(register | commands::W_REGISTER, buf)
    }

    /// Send a `command` followed by the bytes in `data` (at most 32).
    fn spi_command(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = data.len();
        self._buf[0] = command;
        self._buf[1..(len + 1)].copy_from_slice(data);
        self.spi_transfer(len as u8 + 1)
    }

    fn ce_high(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        if self._session.powered() {
            self._session.set_standby(false);
        }
        Ok(())
    }

    fn ce_low(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        if self._session.powered() {
            self._session.set_standby(true);
        }
        Ok(())
    }

    /// Read the value of a single byte `register`.
    ///
    /// Only the 5 LSBits of `register` are used.
    pub fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, commands::R_REGISTER | (register & registers::ADDRESS_MASK))?;
        Ok(self._buf[1])
    }

    /// Read `buf.len()` bytes from a multi-byte `register` (like an address register).
    ///
    /// Bytes are stored in the order the radio sends them (LSByte first).
    /// Returns [`Nrf24Error::InvalidArgument`] if `buf` is empty or longer than 32 bytes.
    pub fn read_register_multi(
        &mut self,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        if len == 0 || len > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(
            len as u8,
            commands::R_REGISTER | (register & registers::ADDRESS_MASK),
        )?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// Write a `value` to a single byte `register`.
    pub fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(register & registers::ADDRESS_MASK, value)
    }

    /// Write `data` to a multi-byte `register`, in the given order (no byte reversal).
    ///
    /// Returns [`Nrf24Error::InvalidArgument`] if `data` is empty or longer than 32 bytes.
    pub fn write_register_multi(
        &mut self,
        register: u8,
        data: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if data.is_empty() || data.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_buf(register & registers::ADDRESS_MASK, data)
    }

    /// Send a raw `command` opcode followed by `data` (may be empty).
    ///
    /// This is the generic channel for FIFO and feature commands, e.g.
    /// [`commands::FLUSH_TX`] or [`commands::ACTIVATE`].
    /// Returns [`Nrf24Error::InvalidArgument`] if `data` is longer than 32 bytes.
    pub fn send_command(
        &mut self,
        command: u8,
        data: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if data.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_command(command, data)
    }

    /// Send a raw `command` opcode and clock `buf.len()` bytes of its response into `buf`.
    ///
    /// Used for commands that return data, e.g. [`commands::R_RX_PL_WID`].
    /// Returns [`Nrf24Error::InvalidArgument`] if `buf` is longer than 32 bytes.
    pub fn send_receive_command(
        &mut self,
        command: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        if len > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(len as u8, command)?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// The [`StatusFlags`] captured by the latest SPI transaction.
    pub fn status(&self) -> StatusFlags {
        self._status
    }

    /// Send the ACTIVATE command, unless it was already sent.
    ///
    /// On the nRF24L01 the same command locks the features again,
    /// so it must only be sent once per power cycle.
    fn unlock_features(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self._session.features_unlocked() {
            return Ok(());
        }
        self.spi_command(commands::ACTIVATE, &[commands::ACTIVATE_MAGIC])?;
        self._session.set_features_unlocked(true);
        debug!("Feature registers activated");
        Ok(())
    }
}
