use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::debug;
use crate::radio::{prelude::EsbPower, Nrf24Error, Nrf24l01};

use super::{bit_fields::Config, registers};

impl<SPI, DO, DELAY> EsbPower for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// In standby the radio consumes about 26uA, and in power down about 900nA.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_pwr_up(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self.ce_low()?;
        self._session.set_powered(false);
        self._session.set_standby(false);
        debug!("Powered down");
        Ok(())
    }

    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]);
        if !config.pwr_up() {
            self.spi_write_byte(registers::CONFIG, config.with_pwr_up(true).into_bits())?;
            if let Some(d) = delay.filter(|d| *d > 0) {
                self._delay_impl.delay_us(d);
            }
        }
        if !self._session.powered() {
            self._session.set_powered(true);
            self._session.set_standby(true);
        }
        self._session.set_rx_role(config.prim_rx());
        Ok(())
    }

    fn is_powered(&self) -> bool {
        self._session.powered()
    }
}
