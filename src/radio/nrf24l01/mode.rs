use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::{debug, warn};
use crate::radio::{prelude::EsbMode, Nrf24Error, Nrf24l01};
use crate::Mode;

use super::{bit_fields::Config, mnemonics, registers};

impl<SPI, DO, DELAY> EsbMode for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ModeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn enable_rx_mode(&mut self) -> Result<(), Self::ModeErrorType> {
        // PRIM_RX and PWR_UP must be stable before CE rises
        if self._session.is_active() {
            self.ce_low()?;
        }
        self.warn_if_unsettled();
        self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?;
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1])
            .with_pwr_up(true)
            .with_prim_rx(true);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self.enter_powered(true);
        self.ce_high()?;
        debug!("RX mode enabled");
        Ok(())
    }

    fn disable_rx_mode(&mut self) -> Result<(), Self::ModeErrorType> {
        self.ce_low()
    }

    fn enable_tx_mode(&mut self) -> Result<(), Self::ModeErrorType> {
        if self._session.is_active() {
            self.ce_low()?;
        }
        self.warn_if_unsettled();
        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1])
            .with_pwr_up(true)
            .with_prim_rx(false);
        self.spi_write_byte(registers::CONFIG, config.into_bits())?;
        self.enter_powered(false);
        self.ce_high()?;
        debug!("TX mode enabled");
        Ok(())
    }

    fn disable_tx_mode(&mut self) -> Result<(), Self::ModeErrorType> {
        self.ce_low()?;
        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        debug!("TX mode disabled");
        Ok(())
    }

    fn mode(&self) -> Mode {
        if !self._session.powered() {
            Mode::PowerDown
        } else if self._session.standby() {
            Mode::Standby
        } else if self._session.rx_role() {
            Mode::RxActive
        } else {
            Mode::TxActive
        }
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn warn_if_unsettled(&self) {
        if !self._session.powered() {
            warn!("Leaving power down without waiting for the oscillator to settle");
        }
    }

    fn enter_powered(&mut self, rx_role: bool) {
        if !self._session.powered() {
            self._session.set_powered(true);
            self._session.set_standby(true);
        }
        self._session.set_rx_role(rx_role);
    }
}
