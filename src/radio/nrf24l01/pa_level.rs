use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPaLevel, Nrf24Error, Nrf24l01};
use crate::PaLevel;

use super::{bit_fields::RfSetup, registers};

impl<SPI, DO, DELAY> EsbPaLevel for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        self.spi_read(1, registers::RF_SETUP)?;
        Ok(RfSetup::from_bits(self._buf[1]).pa_level())
    }

    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType> {
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = RfSetup::from_bits(self._buf[1]).with_pa_level(pa_level);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())
    }

    fn set_pa_gain(&mut self, dbm: i8) -> Result<(), Self::PaLevelErrorType> {
        self.set_pa_level(PaLevel::from_dbm(dbm))
    }

    fn set_lna_gain(&mut self, enable: bool) -> Result<(), Self::PaLevelErrorType> {
        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = RfSetup::from_bits(self._buf[1]).with_lna_hcurr(enable);
        self.spi_write_byte(registers::RF_SETUP, rf_setup.into_bits())
    }
}
