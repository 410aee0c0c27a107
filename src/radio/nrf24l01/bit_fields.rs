use bitfield_struct::bitfield;

use crate::{DataRate, PaLevel, StatusFlags};

/// The CONFIG register.
///
/// The default value is the chip's reset value: CRC enabled, PRX role, powered down,
/// and all events reflected on the IRQ pin.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// Mask the "RX Data Ready" event from the IRQ pin.
    pub mask_rx_dr: bool,

    /// Mask the "TX Data Sent" event from the IRQ pin.
    pub mask_tx_ds: bool,

    /// Mask the "max retransmits reached" event from the IRQ pin.
    pub mask_max_rt: bool,

    #[bits(1, default = true)]
    pub en_crc: bool,

    #[bits(1, access = None)]
    crco: bool,

    pub pwr_up: bool,

    #[bits(1, default = true)]
    pub prim_rx: bool,
}

impl Config {
    /// Set which IRQ events drive the IRQ pin.
    ///
    /// Flags asserted in `events` are unmasked; the rest are masked.
    pub fn with_irq_events(self, events: StatusFlags) -> Self {
        Self::from_bits(
            self.into_bits() & !StatusFlags::IRQ_MASK
                | (!events.into_bits() & StatusFlags::IRQ_MASK),
        )
    }

    /// The IRQ events that drive the IRQ pin.
    pub fn irq_events(&self) -> StatusFlags {
        StatusFlags::from_bits(!self.into_bits() & StatusFlags::IRQ_MASK)
    }
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct SetupRetry {
    /// Auto retransmit delay, in steps of 250 us (0 means 250 us).
    #[bits(4)]
    pub ard: u8,

    /// Auto retransmit count.
    #[bits(4, default = 3)]
    pub arc: u8,
}

impl SetupRetry {
    /// The shortest retransmit delay (in microseconds).
    pub const MIN_DELAY: u16 = 250;
    /// The longest retransmit delay (in microseconds).
    pub const MAX_DELAY: u16 = 4000;

    /// Convert a delay in microseconds to the ARD field value.
    ///
    /// The delay is clamped to [250, 4000] and rounded up to the next 250 us step.
    pub const fn ard_from_us(us: u16) -> u8 {
        let us = if us < Self::MIN_DELAY {
            Self::MIN_DELAY
        } else if us > Self::MAX_DELAY {
            Self::MAX_DELAY
        } else {
            us
        };
        (us.div_ceil(Self::MIN_DELAY) - 1) as u8
    }

    /// The configured delay in microseconds.
    pub const fn delay_us(&self) -> u16 {
        (self.ard() as u16 + 1) * Self::MIN_DELAY
    }
}

/// The RF_SETUP register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct RfSetup {
    #[bits(4)]
    _padding: u8,

    #[bits(1, access = None, default = true)]
    rf_dr: bool,

    #[bits(2, access = None, default = 3)]
    rf_pwr: u8,

    #[bits(1, default = true)]
    pub lna_hcurr: bool,
}

impl RfSetup {
    pub const fn data_rate(&self) -> DataRate {
        DataRate::from_bits(self.into_bits())
    }

    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self::from_bits(self.into_bits() & !DataRate::MASK | data_rate.into_bits())
    }

    pub const fn pa_level(&self) -> PaLevel {
        PaLevel::from_bits(self.into_bits())
    }

    pub const fn with_pa_level(self, level: PaLevel) -> Self {
        Self::from_bits(self.into_bits() & !PaLevel::MASK | level.into_bits())
    }
}

/// The FEATURE register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct Feature {
    #[bits(5)]
    _padding: u8,

    pub en_dpl: bool,

    pub en_ack_pay: bool,

    pub en_dyn_ack: bool,
}

/// The FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _padding: u8,

    pub tx_reuse: bool,

    pub tx_full: bool,

    pub tx_empty: bool,

    #[bits(2)]
    _reserved: u8,

    pub rx_full: bool,

    pub rx_empty: bool,
}

/// What the driver knows about the radio's state between transactions.
///
/// `standby` is only meaningful while `powered` is set.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub(crate) struct SessionState {
    pub initialized: bool,

    pub dynamic_payloads: bool,

    pub ack_payloads: bool,

    /// The ACTIVATE command was sent since the last power cycle.
    pub features_unlocked: bool,

    pub powered: bool,

    /// CE is low while powered up.
    pub standby: bool,

    /// PRIM_RX was last set by the driver.
    pub rx_role: bool,

    pub no_ack_tx: bool,
}

impl SessionState {
    /// Is the radio powered with CE asserted?
    pub const fn is_active(&self) -> bool {
        self.powered() && !self.standby()
    }
}
