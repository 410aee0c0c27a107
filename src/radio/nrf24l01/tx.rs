use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::log::{debug, warn};
use crate::radio::{
    prelude::{EsbMode, EsbPipe, EsbPower, EsbTx},
    Nrf24Error, Nrf24l01,
};

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbTx for Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type TxErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_tx_payload(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType> {
        Self::check_payload_len(buf)?;
        self.write_tx_fifo(commands::W_TX_PAYLOAD, buf)
    }

    fn submit_data(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType> {
        Self::check_payload_len(buf)?;
        self.mirror_tx_address()?;
        self.write_tx_fifo(commands::W_TX_PAYLOAD, buf)
    }

    fn submit_data_no_ack(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType> {
        if !self._session.no_ack_tx() {
            return Err(Nrf24Error::InvalidArgument);
        }
        Self::check_payload_len(buf)?;
        self.mirror_tx_address()?;
        self.write_tx_fifo(commands::W_TX_PAYLOAD_NO_ACK, buf)
    }

    fn attempt_tx(&mut self) -> Result<(), Self::TxErrorType> {
        debug!("Attempting TX");
        self.enable_tx_mode()?;
        let result = self.wait_for_tx_complete();
        match result {
            Ok(()) | Err(Nrf24Error::MaxRetransmitsReached) => (),
            Err(_) => return result,
        }
        self.disable_tx_mode()?;
        self.power_down()?;
        result
    }

    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType> {
        self.submit_data(buf)?;
        self.attempt_tx()
    }

    fn send_data_to(&mut self, address: &[u8], buf: &[u8]) -> Result<(), Self::TxErrorType> {
        self.set_tx_address(address)?;
        self.send_data(buf)
    }

    fn poll_tx_complete(&mut self) -> nb::Result<(), Self::TxErrorType> {
        self.spi_read(0, commands::NOP).map_err(nb::Error::Other)?;
        if self._status.max_rt() {
            warn!(
                "Max retransmits reached (STATUS: {=u8:#X})",
                self._status.into_bits()
            );
            Err(nb::Error::Other(Nrf24Error::MaxRetransmitsReached))
        } else if self._status.tx_ds() {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    fn wait_for_tx_complete(&mut self) -> Result<(), Self::TxErrorType> {
        nb::block!(self.poll_tx_complete())
    }

    fn reuse_tx_payload(&mut self) -> Result<(), Self::TxErrorType> {
        self.spi_write_byte(
            registers::STATUS,
            mnemonics::MASK_TX_DS | mnemonics::MASK_MAX_RT,
        )?;
        self.spi_read(0, commands::REUSE_TX_PL)
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::TxErrorType> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        Ok(self._buf[1] & 0xF)
    }
}

impl<SPI, DO, DELAY> Nrf24l01<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn check_payload_len(buf: &[u8]) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if buf.is_empty() || buf.len() > mnemonics::MAX_PAYLOAD {
            return Err(Nrf24Error::InvalidArgument);
        }
        Ok(())
    }

    /// With auto-ack on pipe 0, the ACK comes back to the TX address on pipe 0.
    fn mirror_tx_address(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::EN_AA)?;
        if self._buf[1] & 1 == 0 {
            return Ok(());
        }
        let mut address = [0u8; 5];
        self.spi_read(5, registers::TX_ADDR)?;
        address.copy_from_slice(&self._buf[1..6]);
        self.spi_write_buf(registers::RX_ADDR_P0, &address)
    }

    fn write_tx_fifo(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self.read_fifo_status()?.tx_full() {
            warn!("TX FIFO is full");
            return Err(Nrf24Error::TxFifoFull);
        }
        self.spi_command(command, buf)
    }
}
