use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::debug;
use crate::radio::{
    prelude::{EsbMode, EsbPayloadLength, EsbRx},
    Nrf24Error, Nrf24l01,
};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbRx for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RxErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn is_data_ready(&mut self) -> Result<Option<u8>, Self::RxErrorType> {
        self.spi_read(0, commands::NOP)?;
        Ok(self._status.ready_pipe())
    }

    fn poll_data_ready(&mut self) -> nb::Result<u8, Self::RxErrorType> {
        match self.is_data_ready().map_err(nb::Error::Other)? {
            Some(pipe) => Ok(pipe),
            None => Err(nb::Error::WouldBlock),
        }
    }

    fn wait_for_data(&mut self) -> Result<u8, Self::RxErrorType> {
        self.enable_rx_mode()?;
        debug!("Waiting for data");
        let pipe = nb::block!(self.poll_data_ready())?;
        self.disable_rx_mode()?;
        Ok(pipe)
    }

    fn get_data(&mut self, pipe: u8, buf: &mut [u8]) -> Result<u8, Self::RxErrorType> {
        if buf.is_empty() || pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        match self.is_data_ready()? {
            None => return Err(Nrf24Error::NotReady),
            Some(ready) if ready != pipe => return Err(Nrf24Error::InvalidArgument),
            _ => (),
        }
        if self.read_fifo_status()?.rx_empty() {
            return Err(Nrf24Error::RxFifoEmpty);
        }

        let available = self.get_rx_data_amount(pipe)?;
        if available == 0 || available as usize > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::BinaryCorruption);
        }
        if buf.len() < available as usize {
            return Err(Nrf24Error::BufferTooSmall { available });
        }

        self.spi_read(available, commands::R_RX_PAYLOAD)?;
        buf[..available as usize].copy_from_slice(&self._buf[1..=available as usize]);
        self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?;
        Ok(available)
    }

    fn read_rx_payload(&mut self, buf: &mut [u8]) -> Result<(), Self::RxErrorType> {
        let len = buf.len();
        if len == 0 || len > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(len as u8, commands::R_RX_PAYLOAD)?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    fn carrier_detect(&mut self) -> Result<bool, Self::RxErrorType> {
        self.spi_read(1, registers::CD)?;
        Ok(self._buf[1] & 1 == 1)
    }
}
