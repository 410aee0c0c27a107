//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

#[cfg(feature = "defmt")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl PaLevel {
    /// The RF_PWR bits of the RF_SETUP register.
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    /// Map a gain in dBm onto the nearest supported level.
    ///
    /// The `dbm` value is clamped to the range [-18, 0]. Values between two
    /// supported levels select the stronger of the two.
    pub const fn from_dbm(dbm: i8) -> Self {
        let dbm = if dbm < -18 {
            -18
        } else if dbm > 0 {
            0
        } else {
            dbm
        };
        match 3 - (-dbm / 6) {
            0 => PaLevel::Min,
            1 => PaLevel::Low,
            2 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }

    /// The output power (in dBm) that this level represents.
    pub const fn dbm(self) -> i8 {
        match self {
            PaLevel::Min => -18,
            PaLevel::Low => -12,
            PaLevel::High => -6,
            PaLevel::Max => 0,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
}

impl DataRate {
    /// The RF_DR bit of the RF_SETUP register.
    pub(crate) const MASK: u8 = 0x08;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => Self::MASK,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        if value & Self::MASK > 0 {
            DataRate::Mbps2
        } else {
            DataRate::Mbps1
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The operating mode of the radio, as tracked by the driver.
///
/// | mode | PWR_UP | CE | PRIM_RX |
/// |------|:------:|:--:|:-------:|
/// | [`Mode::PowerDown`] | 0 | x | x |
/// | [`Mode::Standby`] | 1 | 0 | x |
/// | [`Mode::RxActive`] | 1 | 1 | 1 |
/// | [`Mode::TxActive`] | 1 | 1 | 0 |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// PWR_UP is cleared and CE is low.
    PowerDown,
    /// Powered with CE low, in either role.
    Standby,
    /// Listening as a primary receiver with CE high.
    RxActive,
    /// Transmitting as a primary transmitter with CE high.
    TxActive,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Mode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Mode::PowerDown => defmt::write!(fmt, "PowerDown"),
            Mode::Standby => defmt::write!(fmt, "Standby"),
            Mode::RxActive => defmt::write!(fmt, "RxActive"),
            Mode::TxActive => defmt::write!(fmt, "TxActive"),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Mode::PowerDown => write!(f, "PowerDown"),
            Mode::Standby => write!(f, "Standby"),
            Mode::RxActive => write!(f, "RxActive"),
            Mode::TxActive => write!(f, "TxActive"),
        }
    }
}

/// A snapshot of the radio's STATUS register.
///
/// Every SPI transaction refreshes the driver's copy of this byte, so it
/// only describes the radio at the time of the last transaction.
///
/// To instantiate an object describing specific interrupt events:
/// ```
/// use nrf24l01::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// assert!(flags.rx_dr());
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent.
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if the maximum number of retransmits was reached.
    #[bits(1, access = RO)]
    pub max_rt: bool,

    /// The pipe number of the payload at the top of the RX FIFO.
    ///
    /// A value of 7 means the RX FIFO is empty, and 6 is never used.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// Is the TX FIFO full?
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags. Useful for STATUS and CONFIG registers.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// The [`StatusFlags::rx_pipe()`] value that means the RX FIFO is empty.
    pub const RX_PIPE_EMPTY: u8 = 7;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all IRQ flags are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// The pipe that has data ready, if any.
    ///
    /// This requires both the RX_DR flag and a valid pipe number. A stale
    /// RX_DR flag with an empty RX FIFO (pipe number 7) is not ready.
    pub const fn ready_pipe(&self) -> Option<u8> {
        let pipe = self.rx_pipe();
        if self.rx_dr() && pipe < 6 {
            Some(pipe)
        } else {
            None
        }
    }

    /// Only the IRQ flags of this snapshot.
    pub const fn irq_flags(&self) -> Self {
        Self::from_bits(self.into_bits() & Self::IRQ_MASK)
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        self.with_flag(1 << Self::RX_DR_OFFSET, flag)
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        self.with_flag(1 << Self::TX_DS_OFFSET, flag)
    }

    /// A flag to describe if the maximum number of retransmits was reached.
    pub fn with_max_rt(self, flag: bool) -> Self {
        self.with_flag(1 << Self::MAX_RT_OFFSET, flag)
    }

    fn with_flag(self, mask: u8, flag: bool) -> Self {
        let new_val = self.into_bits() & !mask;
        if flag {
            Self::from_bits(new_val | mask)
        } else {
            Self::from_bits(new_val)
        }
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, max_rt: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.max_rt(),
            self.rx_pipe()
        )
    }
}
