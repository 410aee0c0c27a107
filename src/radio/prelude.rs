//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use nrf24l01::radio::prelude::*;
//! ```

use crate::types::{DataRate, FifoState, Mode, PaLevel, StatusFlags};

use super::RadioConfig;

/// A trait to represent the register reset of an ESB capable transceiver.
pub trait EsbInit {
    type InitErrorType;

    /// Reset the radio's registers to their power-on defaults.
    ///
    /// This forgets any feature activation, dynamic payload, or ACK payload state
    /// the driver tracked, then applies [`RadioConfig::default()`]
    /// (see [`EsbInit::with_config()`]).
    /// The radio is left powered down with CE low.
    fn init(&mut self) -> Result<(), Self::InitErrorType>;

    /// Flush both FIFOs, lower CE, and write every register described by `config`.
    ///
    /// STATUS is written with all IRQ flags cleared. The DYNPD and FEATURE registers
    /// are cleared; use [`EsbFeatures`] afterwards to enable those features.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType>;
}

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Set the RX `address` of a `pipe`.
    ///
    /// Pipes 0 and 1 take a full 5-byte address. Pipes 2-5 take exactly 1 byte
    /// (the LSByte) and share the 4 upper bytes of pipe 1's address.
    /// Bytes are written LSByte first, in the order given.
    ///
    /// Any other length, or a `pipe` greater than 5, is an invalid argument.
    fn set_rx_address(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Read the RX address of a `pipe` into `address` and return the number of bytes read.
    ///
    /// This is 5 for pipes 0 and 1 and 1 for pipes 2-5.
    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8])
        -> Result<u8, Self::PipeErrorType>;

    /// Set the 5-byte address used for transmitting.
    fn set_tx_address(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Get the 5-byte address used for transmitting.
    fn get_tx_address(&mut self, address: &mut [u8; 5]) -> Result<(), Self::PipeErrorType>;

    /// Set the address width (applies to all pipes).
    ///
    /// The `width` is clamped to the range [3, 5].
    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the currently configured address width (applied to all pipes).
    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType>;

    /// Open or close a `pipe` for receiving.
    ///
    /// After a reset only pipes 0 and 1 are open.
    fn set_rx_pipe_enabled(&mut self, pipe: u8, enable: bool) -> Result<(), Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// A `channel` greater than 125 is an invalid argument.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Refresh the STATUS byte with a NOP command and return it.
    fn get_status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Get the [`StatusFlags`] that were captured by the latest SPI transaction.
    fn status_flags(&self) -> StatusFlags;

    /// Clear the radio's IRQ status flags.
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding event.
    /// Members set to `false` are left untouched.
    fn clear_irq_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Configure which events drive the radio's IRQ pin.
    ///
    /// Events asserted in `flags` trigger the IRQ pin; the others are masked.
    /// All events are enabled after a reset.
    fn set_irq_mask(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard all 3 levels of the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard all 3 levels of the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the TX FIFO (`about_tx` is `true`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is the TX FIFO full?
    fn is_tx_fifo_full(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Is the TX FIFO empty?
    fn is_tx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Is the RX FIFO empty?
    fn is_rx_fifo_empty(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the power amplitude level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Get the currently configured Power Amplitude Level (PA Level)
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Set the radio's Power Amplitude Level (PA Level)
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;

    /// Set the PA level from a gain in dBm.
    ///
    /// `dbm` is clamped to [-18, 0] and mapped with [`PaLevel::from_dbm()`].
    fn set_pa_gain(&mut self, dbm: i8) -> Result<(), Self::PaLevelErrorType>;

    /// Enable or disable the LNA gain (RF_SETUP bit 0).
    fn set_lna_gain(&mut self, enable: bool) -> Result<(), Self::PaLevelErrorType>;
}

/// A trait to represent manipulation of data rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Get the currently configured data rate.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    /// Set the radio's data rate.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// A trait to represent manipulation of the automatic acknowledgement
/// and retransmission features of an ESB capable transceiver.
pub trait EsbAutoAck {
    type AutoAckErrorType;

    /// Enable or disable the auto-ack feature for a specified `pipe`.
    fn set_auto_ack_pipe(&mut self, pipe: u8, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Set the number of automatic retransmissions.
    ///
    /// The `count` is clamped to 15. A `count` of 0 disables retransmission.
    fn set_arc(&mut self, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Set the delay between automatic retransmissions, in microseconds.
    ///
    /// The `delay` is clamped to [250, 4000] and rounded up to the next
    /// multiple of 250.
    fn set_ard(&mut self, delay: u16) -> Result<(), Self::AutoAckErrorType>;

    /// Preload a payload that is sent with the next automatic acknowledgement on `pipe`.
    ///
    /// Requires [`EsbFeatures::enable_ack_payloads()`] for the radio to actually
    /// attach it. Fails with a "TX FIFO full" error when the FIFO has no free level.
    fn set_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<(), Self::AutoAckErrorType>;
}

/// A trait to represent manipulation of payload lengths (static or dynamic)
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the static payload width of a `pipe` (0 to 32 bytes).
    ///
    /// A width of 0 means the pipe is not used.
    fn set_rx_packet_size(&mut self, pipe: u8, size: u8)
        -> Result<(), Self::PayloadLengthErrorType>;

    /// Get the static payload width of a `pipe`.
    fn get_rx_packet_size(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType>;

    /// The length of the payload at the top of the RX FIFO, received on `pipe`.
    ///
    /// With dynamic payloads enabled this asks the radio (R_RX_PL_WID), otherwise
    /// it is the static width of `pipe`. A dynamic length above 32 is reported as
    /// corruption.
    fn get_rx_data_amount(&mut self, pipe: u8) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// A trait to represent the one-time feature activation and the features it
/// unlocks (dynamic payloads, ACK payloads, and no-ACK transmissions).
///
/// All functions that write feature registers must be called while the radio
/// is in standby or powered down. Each is idempotent: calling it again does not
/// change the radio's state.
pub trait EsbFeatures {
    type FeaturesErrorType;

    /// Send the ACTIVATE command if it was not sent since the last [`EsbInit::init()`].
    fn activate_features(&mut self) -> Result<(), Self::FeaturesErrorType>;

    /// Enable dynamic payloads globally (FEATURE) and for a `pipe` (DYNPD).
    fn enable_dynamic_payloads(&mut self, pipe: u8) -> Result<(), Self::FeaturesErrorType>;

    /// Enable payloads in automatic acknowledgements.
    ///
    /// This also enables dynamic payloads on pipe 0, and raises the auto
    /// retransmit delay to 500 us if it is at its minimum.
    fn enable_ack_payloads(&mut self) -> Result<(), Self::FeaturesErrorType>;

    /// Allow transmissions that do not ask for an acknowledgement.
    fn enable_no_ack_tx(&mut self) -> Result<(), Self::FeaturesErrorType>;

    /// Were dynamic payloads enabled through this driver?
    fn dynamic_payloads_enabled(&self) -> bool;

    /// Were ACK payloads enabled through this driver?
    fn ack_payloads_enabled(&self) -> bool;

    /// Were no-ACK transmissions enabled through this driver?
    fn no_ack_tx_enabled(&self) -> bool;
}

/// A trait to represent manipulation of the power state
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio: clear PWR_UP and lower CE.
    ///
    /// Register values and FIFO contents are retained.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio into standby.
    ///
    /// The radio needs up to 1.5 ms before it can transmit or receive.
    /// `delay` is the number of microseconds to wait for that after setting PWR_UP
    /// (`None` does not wait). If the caller does not wait here, it must wait or
    /// tolerate a non-functional window before using the radio.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool;
}

/// A trait to represent the RX/TX mode transitions of an ESB capable transceiver.
pub trait EsbMode {
    type ModeErrorType;

    /// Enter [`Mode::RxActive`].
    ///
    /// Clears the RX_DR flag, sets PRIM_RX and PWR_UP, then raises CE.
    /// If CE was already high, it is lowered first.
    fn enable_rx_mode(&mut self) -> Result<(), Self::ModeErrorType>;

    /// Return to [`Mode::Standby`] by lowering CE. This does not power down.
    fn disable_rx_mode(&mut self) -> Result<(), Self::ModeErrorType>;

    /// Enter [`Mode::TxActive`].
    ///
    /// Clears the TX_DS and MAX_RT flags, clears PRIM_RX and sets PWR_UP, then raises CE.
    /// If CE was already high, it is lowered first.
    fn enable_tx_mode(&mut self) -> Result<(), Self::ModeErrorType>;

    /// Return to [`Mode::Standby`] by lowering CE, and clear the TX_DS and MAX_RT flags.
    fn disable_tx_mode(&mut self) -> Result<(), Self::ModeErrorType>;

    /// The current mode, as tracked by the driver.
    fn mode(&self) -> Mode;
}

/// A trait to represent transmitting payloads with an ESB capable transceiver.
pub trait EsbTx {
    type TxErrorType;

    /// Write a payload (1 to 32 bytes) into the TX FIFO.
    fn set_tx_payload(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType>;

    /// Prepare a payload (1 to 32 bytes) for transmission.
    ///
    /// If auto-ack is enabled on pipe 0, the TX address is copied into
    /// pipe 0's RX address so the acknowledgement is recognized.
    fn submit_data(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType>;

    /// Like [`EsbTx::submit_data()`], but the receiver is asked not to acknowledge it.
    ///
    /// Requires [`EsbFeatures::enable_no_ack_tx()`].
    fn submit_data_no_ack(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType>;

    /// Transmit the top of the TX FIFO and block until it completes.
    ///
    /// Enters [`Mode::TxActive`], waits for TX_DS or MAX_RT, returns to standby,
    /// then powers down. On MAX_RT the payload remains in the TX FIFO.
    fn attempt_tx(&mut self) -> Result<(), Self::TxErrorType>;

    /// [`EsbTx::submit_data()`] then [`EsbTx::attempt_tx()`].
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::TxErrorType>;

    /// Overwrite the TX address, then [`EsbTx::send_data()`].
    ///
    /// The new TX address remains configured afterwards.
    fn send_data_to(&mut self, address: &[u8], buf: &[u8]) -> Result<(), Self::TxErrorType>;

    /// Check once whether the current transmission completed.
    ///
    /// Returns [`nb::Error::WouldBlock`] while neither TX_DS nor MAX_RT is set.
    fn poll_tx_complete(&mut self) -> nb::Result<(), Self::TxErrorType>;

    /// Busy-wait until the current transmission completes.
    ///
    /// There is no timeout.
    fn wait_for_tx_complete(&mut self) -> Result<(), Self::TxErrorType>;

    /// Mark the top of the TX FIFO to be sent again on the next CE activation.
    ///
    /// This also clears the TX_DS and MAX_RT flags.
    fn reuse_tx_payload(&mut self) -> Result<(), Self::TxErrorType>;

    /// The number of retransmissions needed by the previous transmission.
    fn get_last_arc(&mut self) -> Result<u8, Self::TxErrorType>;
}

/// A trait to represent receiving payloads with an ESB capable transceiver.
pub trait EsbRx {
    type RxErrorType;

    /// Check whether a pipe has data ready.
    ///
    /// Returns the pipe number only if RX_DR is set and the STATUS pipe field
    /// is below 6. A pipe field of 7 means the RX FIFO is empty, even if RX_DR is set.
    fn is_data_ready(&mut self) -> Result<Option<u8>, Self::RxErrorType>;

    /// Check once whether a pipe has data ready.
    ///
    /// Returns [`nb::Error::WouldBlock`] if no pipe has data ready.
    fn poll_data_ready(&mut self) -> nb::Result<u8, Self::RxErrorType>;

    /// Enter [`Mode::RxActive`], busy-wait for data, and return to standby.
    ///
    /// Returns the pipe with data ready. There is no timeout.
    fn wait_for_data(&mut self) -> Result<u8, Self::RxErrorType>;

    /// Read the payload received on `pipe` into `buf` and return its length.
    ///
    /// - The pipe with data ready must be `pipe`, else an invalid argument.
    /// - If `buf` is too small, nothing is read, `buf` is not touched, and the payload
    ///   remains in the RX FIFO.
    ///
    /// After a successful read the RX_DR flag is cleared.
    fn get_data(&mut self, pipe: u8, buf: &mut [u8]) -> Result<u8, Self::RxErrorType>;

    /// Read the top of the RX FIFO into `buf` (1 to 32 bytes) without any checks.
    fn read_rx_payload(&mut self, buf: &mut [u8]) -> Result<(), Self::RxErrorType>;

    /// Is a carrier detected on the current channel?
    fn carrier_detect(&mut self) -> Result<bool, Self::RxErrorType>;
}

/// A trait to represent debug output of an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Print details about the radio's current configuration.
    ///
    /// Output goes through `defmt` or `std` depending on the enabled feature.
    /// Without either feature this does nothing.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}
