use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::warn;
use crate::radio::{prelude::EsbAutoAck, Nrf24Error, Nrf24l01};

use super::{bit_fields::SetupRetry, commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbAutoAck for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(1, registers::EN_AA)?;
        let mask = 1 << pipe;
        let out = self._buf[1] & !mask | (mask * enable as u8);
        self.spi_write_byte(registers::EN_AA, out)
    }

    fn set_arc(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        let setup_retr = SetupRetry::from_bits(self._buf[1]).with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, setup_retr.into_bits())
    }

    fn set_ard(&mut self, delay: u16) -> Result<(), Self::AutoAckErrorType> {
        self.spi_read(1, registers::SETUP_RETR)?;
        let setup_retr =
            SetupRetry::from_bits(self._buf[1]).with_ard(SetupRetry::ard_from_us(delay));
        self.spi_write_byte(registers::SETUP_RETR, setup_retr.into_bits())
    }

    fn set_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<(), Self::AutoAckErrorType> {
        if pipe > mnemonics::MAX_PIPE || buf.is_empty() || buf.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        if self.read_fifo_status()?.tx_full() {
            warn!("TX FIFO is full");
            return Err(Nrf24Error::TxFifoFull);
        }
        self.spi_command(commands::W_ACK_PAYLOAD | pipe, buf)
    }
}
