use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbDataRate, Nrf24Error, Nrf24l01};
use crate::DataRate;

use super::{bit_fields::RfSetup, registers};

impl<SPI, DO, DELAY> EsbDataRate for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        self.spi_read(1, registers::RF_SETUP)?;
        Ok(RfSetup::from_bits(self._buf[1]).data_rate())
    }

    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = RfSetup::from_bits(self._buf[1]).with_data_rate(data_rate);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())
    }
}
