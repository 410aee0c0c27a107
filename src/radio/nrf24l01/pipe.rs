use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPipe, Nrf24Error, Nrf24l01};

use super::{mnemonics, registers};

impl<SPI, DO, DELAY> EsbPipe for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if pipe > mnemonics::MAX_PIPE || address.len() != Self::address_register_len(pipe) {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_buf(registers::RX_ADDR_P0 + pipe, address)
    }

    fn get_rx_address(
        &mut self,
        pipe: u8,
        address: &mut [u8],
    ) -> Result<u8, Self::PipeErrorType> {
        let len = Self::address_register_len(pipe);
        if pipe > mnemonics::MAX_PIPE || address.len() < len {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(len as u8, registers::RX_ADDR_P0 + pipe)?;
        address[..len].copy_from_slice(&self._buf[1..=len]);
        Ok(len as u8)
    }

    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        if address.len() != 5 {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_buf(registers::TX_ADDR, address)
    }

    fn get_tx_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType> {
        self.spi_read(5, registers::TX_ADDR)?;
        address.copy_from_slice(&self._buf[1..6]);
        Ok(())
    }

    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType> {
        let width = width.clamp(3, 5);
        self.spi_write_byte(registers::SETUP_AW, width - 2)
    }

    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType> {
        self.spi_read(1, registers::SETUP_AW)?;
        Ok((self._buf[1] & 3) + 2)
    }

    fn set_rx_pipe_enabled(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PipeErrorType> {
        if pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_read(1, registers::EN_RXADDR)?;
        let mask = 1 << pipe;
        let out = self._buf[1] & !mask | (mask * enable as u8);
        self.spi_write_byte(registers::EN_RXADDR, out)
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Pipes 0 and 1 hold a full address. Pipes 2-5 only hold the LSByte.
    const fn address_register_len(pipe: u8) -> usize {
        if pipe < 2 {
            5
        } else {
            1
        }
    }
}
