use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
use embedded_hal_async::digital::Wait;

use crate::log::debug;
use crate::radio::{
    prelude::{EsbFifo, EsbMode, EsbPower, EsbRx},
    IrqEvent, IrqOutcome, Nrf24Error, Nrf24l01, TxProgress,
};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Capture the IRQ flags in a single SPI transaction.
    ///
    /// This is the only driver call meant for interrupt context. Post the returned
    /// event to an [`IrqMailbox`](struct@crate::radio::IrqMailbox) and pass it to
    /// [`Nrf24l01::service_irq()`] from the foreground. The flags are not cleared here,
    /// so a level-triggered IRQ line stays asserted until the event is serviced.
    pub fn capture_irq(&mut self) -> Result<IrqEvent, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(0, commands::NOP)?;
        Ok(IrqEvent::from(self._status))
    }

    /// Act upon a captured [`IrqEvent`].
    ///
    /// TX events are handled first:
    /// - MAX_RT re-enters TX mode, which pulses CE and retransmits the top of the
    ///   TX FIFO with a fresh retransmit counter.
    /// - TX_DS re-enters TX mode if more payloads are queued. Otherwise TX mode is
    ///   disabled and the radio powers down.
    ///
    /// Then, if RX_DR is set and a pipe has data ready, the payload is read into `buf`
    /// with [`EsbRx::get_data()`](fn@crate::radio::prelude::EsbRx::get_data).
    /// A stale RX_DR (no pipe has data) is cleared.
    /// Errors from that read (like [`Nrf24Error::BufferTooSmall`]) are returned after
    /// the TX side was already serviced.
    pub fn service_irq(
        &mut self,
        event: IrqEvent,
        buf: &mut [u8],
    ) -> Result<IrqOutcome, Nrf24Error<SPI::Error, DO::Error>> {
        let mut outcome = IrqOutcome::default();
        if event.max_rt() {
            debug!("Retrying TX after max retransmits");
            self.enable_tx_mode()?;
            outcome.tx = Some(TxProgress::Retrying);
        } else if event.tx_ds() {
            if self.is_tx_fifo_empty()? {
                self.disable_tx_mode()?;
                self.power_down()?;
                outcome.tx = Some(TxProgress::Complete);
            } else {
                self.enable_tx_mode()?;
                outcome.tx = Some(TxProgress::Continuing);
            }
        }

        if event.rx_dr() {
            match self.is_data_ready()? {
                Some(pipe) => {
                    let len = self.get_data(pipe, buf)?;
                    outcome.received = Some((pipe, len));
                }
                // the RX FIFO was drained elsewhere; release the IRQ line
                None => self.spi_write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?,
            }
        }
        Ok(outcome)
    }

    /// Wait for the (active low) `irq` line to assert, then capture the IRQ flags.
    ///
    /// This suits a cooperative task that owns the radio. The line stays low until
    /// the flags are cleared, so a pending event is never missed.
    pub async fn wait_for_irq<IRQ: Wait>(
        &mut self,
        irq: &mut IRQ,
    ) -> Result<IrqEvent, Nrf24Error<SPI::Error, DO::Error>> {
        irq.wait_for_low().await.map_err(|_| Nrf24Error::IrqPin)?;
        self.capture_irq()
    }
}
