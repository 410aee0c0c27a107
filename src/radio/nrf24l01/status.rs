use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{prelude::EsbStatus, Nrf24Error, Nrf24l01},
    types::StatusFlags,
};

use super::{bit_fields::Config, commands, registers};

impl<SPI, DO, DELAY> EsbStatus for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        self.spi_read(0, commands::NOP)?;
        Ok(self._status)
    }

    fn status_flags(&self) -> StatusFlags {
        self._status
    }

    fn clear_irq_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)
    }

    fn set_irq_mask(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_read(1, registers::CONFIG)?;
        let config = Config::from_bits(self._buf[1]).with_irq_events(flags);
        self.spi_write_byte(registers::CONFIG, config.into_bits())
    }
}
