//! Types for handing interrupt events from the IRQ handler to the foreground.
//!
//! The IRQ handler only reads the STATUS byte
//! ([`Nrf24l01::capture_irq()`](fn@crate::radio::Nrf24l01::capture_irq)) and posts the
//! resulting [`IrqEvent`] into an [`IrqMailbox`]. The foreground (or an async task)
//! takes the event and passes it to
//! [`Nrf24l01::service_irq()`](fn@crate::radio::Nrf24l01::service_irq), which does
//! all the work that needs more than one bus transaction.
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::NoopRawMutex;
//! use nrf24l01::{radio::{IrqEvent, IrqMailbox}, StatusFlags};
//!
//! let mailbox: IrqMailbox<NoopRawMutex> = IrqMailbox::new();
//! mailbox.post(IrqEvent::from(StatusFlags::default().with_tx_ds(true)));
//! mailbox.post(IrqEvent::from(StatusFlags::default().with_rx_dr(true)));
//! let event = mailbox.take().unwrap();
//! assert!(event.tx_ds() && event.rx_dr());
//! assert!(mailbox.take().is_none());
//! ```

use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

use crate::StatusFlags;

/// A snapshot of the IRQ flags, captured when the IRQ pin was asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IrqEvent {
    flags: StatusFlags,
}

impl From<StatusFlags> for IrqEvent {
    fn from(value: StatusFlags) -> Self {
        Self { flags: value }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IrqEvent {}", self.flags)
    }
}

impl IrqEvent {
    /// Data was received (or an ACK payload arrived).
    pub const fn rx_dr(&self) -> bool {
        self.flags.rx_dr()
    }

    /// A transmission was acknowledged (or sent, without auto-ack).
    pub const fn tx_ds(&self) -> bool {
        self.flags.tx_ds()
    }

    /// A transmission exhausted its retransmissions.
    pub const fn max_rt(&self) -> bool {
        self.flags.max_rt()
    }

    /// The pipe number reported with the event. 7 means the RX FIFO was empty.
    pub const fn rx_pipe(&self) -> u8 {
        self.flags.rx_pipe()
    }

    /// Does this event carry any IRQ flag?
    pub const fn is_empty(&self) -> bool {
        self.flags.into_bits() & StatusFlags::IRQ_MASK == 0
    }

    /// The full STATUS byte captured with this event.
    pub const fn status(&self) -> StatusFlags {
        self.flags
    }

    /// Combine two events. IRQ flags accumulate; the rest of the STATUS byte
    /// comes from `newer`.
    pub const fn merge(self, newer: IrqEvent) -> Self {
        let flags = (self.flags.into_bits() | newer.flags.into_bits()) & StatusFlags::IRQ_MASK;
        Self {
            flags: StatusFlags::from_bits(
                flags | (newer.flags.into_bits() & !StatusFlags::IRQ_MASK),
            ),
        }
    }
}

/// How a transmission progressed after servicing an interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxProgress {
    /// MAX_RT was reached and the radio was re-armed to retransmit.
    Retrying,
    /// A payload was sent and the next one in the TX FIFO is being transmitted.
    Continuing,
    /// A payload was sent, the TX FIFO is empty, and the radio was powered down.
    Complete,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TxProgress {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TxProgress::Retrying => defmt::write!(fmt, "Retrying"),
            TxProgress::Continuing => defmt::write!(fmt, "Continuing"),
            TxProgress::Complete => defmt::write!(fmt, "Complete"),
        }
    }
}

/// The result of [`Nrf24l01::service_irq()`](fn@crate::radio::Nrf24l01::service_irq).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IrqOutcome {
    /// The pipe and length of a payload that was read into the caller's buffer.
    pub received: Option<(u8, u8)>,
    /// What happened to the transmission, if the event was about one.
    pub tx: Option<TxProgress>,
}

/// A single slot mailbox between an IRQ handler and the foreground.
///
/// Posting while an event is pending merges both events, so no flag is lost.
/// Only one context should post.
pub struct IrqMailbox<M: RawMutex> {
    slot: Signal<M, IrqEvent>,
}

impl<M: RawMutex> Default for IrqMailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> IrqMailbox<M> {
    pub const fn new() -> Self {
        Self {
            slot: Signal::new(),
        }
    }

    /// Post an event, merging it with a pending one.
    pub fn post(&self, event: IrqEvent) {
        let event = match self.slot.try_take() {
            Some(pending) => pending.merge(event),
            None => event,
        };
        self.slot.signal(event);
    }

    /// Take the pending event, if any.
    pub fn take(&self) -> Option<IrqEvent> {
        self.slot.try_take()
    }

    /// Wait until an event is posted, then take it.
    pub async fn receive(&self) -> IrqEvent {
        self.slot.wait().await
    }

    /// Is an event pending?
    pub fn is_pending(&self) -> bool {
        self.slot.signaled()
    }
}
