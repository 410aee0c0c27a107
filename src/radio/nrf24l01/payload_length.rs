use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::error;
use crate::radio::{prelude::EsbPayloadLength, Nrf24Error, Nrf24l01};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbPayloadLength for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_rx_packet_size(
        &mut self,
        pipe: u8,
        size: u8,
    ) -> Result<(), Self::PayloadLengthErrorType> {
        if pipe > mnemonics::MAX_PIPE || size as usize > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_byte(registers::RX_PW_P0 + pipe, size)
    }

    fn get_rx_packet_size(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType> {
        if pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(1, registers::RX_PW_P0 + pipe)?;
        Ok(self._buf[1] & 0x3F)
    }

    fn get_rx_data_amount(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType> {
        if !self._session.dynamic_payloads() {
            return self.get_rx_packet_size(pipe);
        }
        if pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(1, commands::R_RX_PL_WID)?;
        let len = self._buf[1];
        if len as usize > mnemonics::MAX_PAYLOAD {
            error!("Payload width {=u8} exceeds 32 bytes", len);
            return Err(Nrf24Error::BinaryCorruption);
        }
        Ok(len)
    }
}
