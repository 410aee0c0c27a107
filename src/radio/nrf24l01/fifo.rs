use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::debug;
use crate::radio::{prelude::EsbFifo, Nrf24Error, Nrf24l01};
use crate::FifoState;

use super::{bit_fields::FifoStatus, commands, registers};

impl<SPI, DO, DELAY> EsbFifo for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_RX)?;
        debug!("RX FIFO flushed");
        Ok(())
    }

    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_read(0, commands::FLUSH_TX)?;
        debug!("TX FIFO flushed");
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        let offset = about_tx as u8 * 4;
        let status = (self._buf[1] & (3 << offset)) >> offset;
        match status {
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Ok(FifoState::Occupied),
        }
    }

    fn is_tx_fifo_full(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.read_fifo_status()?.tx_full())
    }

    fn is_tx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.read_fifo_status()?.tx_empty())
    }

    fn is_rx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType> {
        Ok(self.read_fifo_status()?.rx_empty())
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    pub(super) fn read_fifo_status(
        &mut self,
    ) -> Result<FifoStatus, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::FIFO_STATUS)?;
        Ok(FifoStatus::from_bits(self._buf[1]))
    }
}
