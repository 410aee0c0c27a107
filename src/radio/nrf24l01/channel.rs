use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbChannel, Nrf24Error, Nrf24l01};

use super::{mnemonics, registers};

impl<SPI, DO, DELAY> EsbChannel for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ChannelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The nRF24L01 support 126 channels. A `channel` above 125 is refused.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType> {
        if channel > mnemonics::MAX_CHANNEL {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.spi_write_byte(registers::RF_CH, channel)
    }

    /// See also [`EsbChannel::set_channel()`].
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType> {
        self.spi_read(1, registers::RF_CH)?;
        Ok(self._buf[1])
    }
}
