use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::{debug, warn};
use crate::radio::{prelude::EsbFeatures, Nrf24Error, Nrf24l01};

use super::{
    bit_fields::{Feature, SetupRetry},
    mnemonics, registers,
};

impl<SPI, DO, DELAY> EsbFeatures for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FeaturesErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn activate_features(&mut self) -> Result<(), Self::FeaturesErrorType> {
        self.ensure_inactive()?;
        self.unlock_features()
    }

    fn enable_dynamic_payloads(&mut self, pipe: u8) -> Result<(), Self::FeaturesErrorType> {
        if pipe > mnemonics::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.ensure_inactive()?;
        self.unlock_features()?;
        self.update_feature(Feature::from_bits(mnemonics::EN_DPL))?;

        self.spi_read(1, registers::DYNPD)?;
        let dynpd = self._buf[1];
        if dynpd & (1 << pipe) == 0 {
            self.spi_write_byte(registers::DYNPD, dynpd | (1 << pipe))?;
        }
        self._session.set_dynamic_payloads(true);
        debug!("Dynamic payloads enabled on pipe {=u8}", pipe);
        Ok(())
    }

    fn enable_ack_payloads(&mut self) -> Result<(), Self::FeaturesErrorType> {
        self.enable_dynamic_payloads(0)?;

        // 250 us is too short for the ACK packet to carry a payload
        self.spi_read(1, registers::SETUP_RETR)?;
        let setup_retr = SetupRetry::from_bits(self._buf[1]);
        if setup_retr.ard() == 0 {
            let setup_retr = setup_retr.with_ard(SetupRetry::ard_from_us(500));
            self.spi_write_byte(registers::SETUP_RETR, setup_retr.into_bits())?;
        }

        self.update_feature(Feature::from_bits(mnemonics::EN_ACK_PAY))?;
        self._session.set_ack_payloads(true);
        Ok(())
    }

    fn enable_no_ack_tx(&mut self) -> Result<(), Self::FeaturesErrorType> {
        self.ensure_inactive()?;
        self.unlock_features()?;
        self.update_feature(Feature::from_bits(mnemonics::EN_DYN_ACK))?;
        self._session.set_no_ack_tx(true);
        Ok(())
    }

    fn dynamic_payloads_enabled(&self) -> bool {
        self._session.dynamic_payloads()
    }

    fn ack_payloads_enabled(&self) -> bool {
        self._session.ack_payloads()
    }

    fn no_ack_tx_enabled(&self) -> bool {
        self._session.no_ack_tx()
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn ensure_inactive(&self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self._session.is_active() {
            warn!("Feature registers can only be changed in standby or power down");
            return Err(Nrf24Error::RadioActive);
        }
        Ok(())
    }

    /// Set the `bits` in the FEATURE register, writing only if one of them is not set yet.
    fn update_feature(&mut self, bits: Feature) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::FEATURE)?;
        let feature = self._buf[1];
        if feature & bits.into_bits() != bits.into_bits() {
            self.spi_write_byte(registers::FEATURE, feature | bits.into_bits())?;
        }
        Ok(())
    }
}
