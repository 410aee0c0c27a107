use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{bit_fields::SessionState, mnemonics, registers};
use crate::{
    log::debug,
    radio::{
        prelude::{EsbFifo, EsbInit},
        Nrf24Error, Nrf24l01, RadioConfig,
    },
    StatusFlags,
};

impl<SPI, DO, DELAY> EsbInit for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type InitErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's registers to their reset values.
    ///
    /// The radio needs about 100 ms after its supply is applied before it accepts
    /// SPI commands. That wait is left to the application.
    fn init(&mut self) -> Result<(), Self::InitErrorType> {
        self._session = SessionState::new();
        self.with_config(&RadioConfig::default())?;
        self.probe_feature_lock()?;
        self._session.set_initialized(true);
        debug!("Radio initialized");
        Ok(())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType> {
        self.flush_tx()?;
        self.flush_rx()?;
        self.ce_low()?;

        self.spi_write_byte(registers::CONFIG, config.config_reg.into_bits())?;
        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.spi_write_byte(registers::EN_RXADDR, config.rx_pipes())?;
        self.spi_write_byte(registers::SETUP_AW, config.setup_aw())?;
        self.spi_write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.spi_write_byte(registers::RF_CH, config.channel())?;
        self.spi_write_byte(registers::RF_SETUP, config.rf_setup.into_bits())?;
        self.spi_write_byte(registers::STATUS, StatusFlags::IRQ_MASK)?;

        self.spi_write_buf(registers::RX_ADDR_P0, config.pipe0_address())?;
        self.spi_write_buf(registers::RX_ADDR_P1, config.pipe1_address())?;
        for pipe in 2..6 {
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, config.pipe_lsb(pipe))?;
        }
        self.spi_write_buf(registers::TX_ADDR, &config.tx_address())?;

        for pipe in 0..6 {
            self.spi_write_byte(registers::RX_PW_P0 + pipe, config.payload_width(pipe))?;
        }
        // without ACTIVATE these writes are ignored, which leaves the reset value anyway
        self.spi_write_byte(registers::DYNPD, 0)?;
        self.spi_write_byte(registers::FEATURE, 0)?;

        let powered = config.config_reg.pwr_up();
        self._session.set_powered(powered);
        self._session.set_standby(powered);
        self._session.set_rx_role(config.config_reg.prim_rx());
        self._session.set_dynamic_payloads(false);
        self._session.set_ack_payloads(false);
        self._session.set_no_ack_tx(false);
        Ok(())
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Detect whether the feature registers are already unlocked.
    ///
    /// ACTIVATE toggles the lock, so it must not be sent again if the MCU restarted
    /// while the radio stayed powered. Radios without the lock also pass this check.
    fn probe_feature_lock(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::FEATURE, mnemonics::EN_DYN_ACK)?;
        self.spi_read(1, registers::FEATURE)?;
        if self._buf[1] == mnemonics::EN_DYN_ACK {
            self._session.set_features_unlocked(true);
            self.spi_write_byte(registers::FEATURE, 0)?;
            debug!("Feature registers already unlocked");
        }
        Ok(())
    }
}
