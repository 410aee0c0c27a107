use crate::radio::nrf24l01::bit_fields::{Config, RfSetup, SetupRetry};
use crate::{DataRate, PaLevel, StatusFlags};

/// A struct to contain configuration about pipe addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PipeAddresses {
    tx_address: [u8; 5],
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    /// The LSByte of pipes 2-5.
    pipes2_5: [u8; 4],
}

impl Default for PipeAddresses {
    fn default() -> Self {
        Self {
            tx_address: [0xE7; 5],
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            pipes2_5: [0xC3, 0xC4, 0xC5, 0xC6],
        }
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24l01::radio::RadioConfig;
/// let mut config = RadioConfig::default();
/// config = config.with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
///
/// Out of range values are clamped, so a [`RadioConfig`] always describes
/// a valid register state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pub(crate) rf_setup: RfSetup,
    auto_ack: u8,
    rx_pipes: u8,
    address_width: u8,
    channel: u8,
    payload_widths: [u8; 6],
    pipes: PipeAddresses,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with the radio's reset values.
    ///
    /// | feature | default value | register |
    /// |--------:|:--------------|:---------|
    /// | [`RadioConfig::irq_events()`] | all enabled | CONFIG = `0x09` |
    /// | [`RadioConfig::auto_ack()`] | `0x3F` (enabled for pipes 0 - 5) | EN_AA = `0x3F` |
    /// | [`RadioConfig::rx_pipes()`] | `0x03` (pipes 0 and 1) | EN_RXADDR = `0x03` |
    /// | [`RadioConfig::address_width()`] | `5` | SETUP_AW = `0x03` |
    /// | [`RadioConfig::auto_retry_delay()`] | `250` us | SETUP_RETR = `0x03` |
    /// | [`RadioConfig::auto_retry_count()`] | `3` | |
    /// | [`RadioConfig::channel()`] | `2` | RF_CH = `0x02` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps2`] | RF_SETUP = `0x0F` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] | |
    /// | [`RadioConfig::lna_enabled()`] | `true` | |
    /// | [`RadioConfig::payload_width()`] | `0` for all pipes | RX_PW_Pn = `0` |
    /// | [`RadioConfig::tx_address()`] | `[0xE7; 5]` | TX_ADDR |
    ///
    /// ## Default RX addresses
    ///
    /// | pipe number | address     |
    /// |-------------|-------------|
    /// |      0      | `[0xE7; 5]` |
    /// |      1      | `[0xC2; 5]` |
    /// |      2[^1]  | `0xC3`      |
    /// |      3[^1]  | `0xC4`      |
    /// |      4[^1]  | `0xC5`      |
    /// |      5[^1]  | `0xC6`      |
    ///
    /// [^1]: Remember, pipes 2 - 5 share the same 4 upper bytes as the address on pipe 1.
    fn default() -> Self {
        Self {
            /*
               - all events enabled for IRQ pin
               - CRC enabled
               - powered down
               - PRX role
            */
            config_reg: Config::default(),
            /*
               - 250 us delay between attempts
               - 3 max attempts
            */
            auto_retries: SetupRetry::default(),
            /*
                - 2 Mbps data rate
                - 0 dBm PA level
                - LNA enabled
            */
            rf_setup: RfSetup::default(),
            auto_ack: 0x3F,
            rx_pipes: 0x03,
            address_width: 5,
            channel: 2,
            payload_widths: [0; 6],
            pipes: PipeAddresses::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// The RF channel (clamped to 125).
    pub fn with_channel(self, channel: u8) -> Self {
        Self {
            channel: channel.min(125),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.rf_setup.data_rate()
    }

    /// The air data rate.
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self {
            rf_setup: self.rf_setup.with_data_rate(data_rate),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.rf_setup.pa_level()
    }

    /// The power amplifier level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            rf_setup: self.rf_setup.with_pa_level(level),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna()`].
    pub const fn lna_enabled(&self) -> bool {
        self.rf_setup.lna_hcurr()
    }

    /// Enable or disable the LNA gain.
    pub fn with_lna(self, enable: bool) -> Self {
        Self {
            rf_setup: self.rf_setup.with_lna_hcurr(enable),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_address_width()`].
    pub const fn address_width(&self) -> u8 {
        self.address_width
    }

    /// The address width of all pipes, clamped to [3, 5].
    pub fn with_address_width(self, width: u8) -> Self {
        Self {
            address_width: width.clamp(3, 5),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_retry_delay()`], in microseconds.
    pub const fn auto_retry_delay(&self) -> u16 {
        self.auto_retries.delay_us()
    }

    /// The delay between automatic retransmissions, in microseconds.
    ///
    /// The `delay` is clamped to [250, 4000] and rounded up to the next 250 us step.
    pub fn with_auto_retry_delay(self, delay: u16) -> Self {
        Self {
            auto_retries: self
                .auto_retries
                .with_ard(SetupRetry::ard_from_us(delay)),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_retry_count()`].
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// The number of automatic retransmissions, clamped to 15.
    pub fn with_auto_retry_count(self, count: u8) -> Self {
        Self {
            auto_retries: self.auto_retries.with_arc(count.min(15)),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// A bit mask of the pipes that use automatic acknowledgement.
    ///
    /// Bit 0 is pipe 0. Bits 6 and 7 are ignored.
    pub fn with_auto_ack(self, pipes: u8) -> Self {
        Self {
            auto_ack: pipes & 0x3F,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_rx_pipes()`].
    pub const fn rx_pipes(&self) -> u8 {
        self.rx_pipes
    }

    /// A bit mask of the pipes that are open for receiving.
    ///
    /// Bit 0 is pipe 0. Bits 6 and 7 are ignored.
    pub fn with_rx_pipes(self, pipes: u8) -> Self {
        Self {
            rx_pipes: pipes & 0x3F,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_irq_events()`].
    pub fn irq_events(&self) -> StatusFlags {
        self.config_reg.irq_events()
    }

    /// The events that drive the IRQ pin. Events not asserted in `events` are masked.
    pub fn with_irq_events(self, events: StatusFlags) -> Self {
        Self {
            config_reg: self.config_reg.with_irq_events(events),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_payload_width()`].
    ///
    /// Returns 0 for a `pipe` greater than 5.
    pub const fn payload_width(&self, pipe: u8) -> u8 {
        if pipe > 5 {
            return 0;
        }
        self.payload_widths[pipe as usize]
    }

    /// The static payload width of a `pipe`, clamped to 32.
    ///
    /// A `pipe` greater than 5 is ignored.
    pub fn with_payload_width(self, pipe: u8, width: u8) -> Self {
        let mut payload_widths = self.payload_widths;
        if pipe <= 5 {
            payload_widths[pipe as usize] = width.min(32);
        }
        Self {
            payload_widths,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_tx_address()`].
    pub const fn tx_address(&self) -> [u8; 5] {
        self.pipes.tx_address
    }

    /// The address used for transmitting.
    pub fn with_tx_address(self, address: [u8; 5]) -> Self {
        let mut pipes = self.pipes;
        pipes.tx_address = address;
        Self { pipes, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_rx_address()`].
    ///
    /// Pipes 2-5 report their own LSByte followed by the upper bytes of pipe 1.
    /// Returns `None` for a `pipe` greater than 5.
    pub fn rx_address(&self, pipe: u8) -> Option<[u8; 5]> {
        match pipe {
            0 => Some(self.pipes.pipe0),
            1 => Some(self.pipes.pipe1),
            2..=5 => {
                let mut address = self.pipes.pipe1;
                address[0] = self.pipes.pipes2_5[pipe as usize - 2];
                Some(address)
            }
            _ => None,
        }
    }

    /// The RX address of a `pipe`.
    ///
    /// For pipes 2-5 only `address[0]` is used. A `pipe` greater than 5 is ignored.
    pub fn with_rx_address(self, pipe: u8, address: [u8; 5]) -> Self {
        let mut pipes = self.pipes;
        match pipe {
            0 => pipes.pipe0 = address,
            1 => pipes.pipe1 = address,
            2..=5 => pipes.pipes2_5[pipe as usize - 2] = address[0],
            _ => (),
        }
        Self { pipes, ..self }
    }

    /// The SETUP_AW register value.
    pub(crate) const fn setup_aw(&self) -> u8 {
        self.address_width - 2
    }

    pub(crate) const fn pipe0_address(&self) -> &[u8; 5] {
        &self.pipes.pipe0
    }

    pub(crate) const fn pipe1_address(&self) -> &[u8; 5] {
        &self.pipes.pipe1
    }

    pub(crate) const fn pipe_lsb(&self, pipe: u8) -> u8 {
        self.pipes.pipes2_5[(pipe - 2) as usize]
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{DataRate, PaLevel, StatusFlags};

    #[test]
    fn reset_values() {
        let config = RadioConfig::default();
        assert_eq!(config.config_reg.into_bits(), 0x09);
        assert_eq!(config.auto_ack(), 0x3F);
        assert_eq!(config.rx_pipes(), 0x03);
        assert_eq!(config.setup_aw(), 0x03);
        assert_eq!(config.auto_retries.into_bits(), 0x03);
        assert_eq!(config.channel(), 2);
        assert_eq!(config.rf_setup.into_bits(), 0x0F);
        assert_eq!(config.rx_address(0), Some([0xE7; 5]));
        assert_eq!(config.rx_address(1), Some([0xC2; 5]));
        assert_eq!(config.rx_address(5), Some([0xC6, 0xC2, 0xC2, 0xC2, 0xC2]));
        assert_eq!(config.rx_address(6), None);
        assert_eq!(config.tx_address(), [0xE7; 5]);
        assert_eq!(config.payload_width(3), 0);
    }

    #[test]
    fn builder_clamps() {
        let config = RadioConfig::default()
            .with_channel(200)
            .with_address_width(9)
            .with_auto_retry_count(20)
            .with_auto_retry_delay(1100)
            .with_payload_width(0, 40)
            .with_payload_width(7, 1)
            .with_auto_ack(0xFF)
            .with_rx_pipes(0xC1);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.address_width(), 5);
        assert_eq!(config.auto_retry_count(), 15);
        assert_eq!(config.auto_retry_delay(), 1250);
        assert_eq!(config.payload_width(0), 32);
        assert_eq!(config.payload_width(7), 0);
        assert_eq!(config.auto_ack(), 0x3F);
        assert_eq!(config.rx_pipes(), 0x01);
        assert_eq!(RadioConfig::default().with_address_width(1).setup_aw(), 1);
    }

    #[test]
    fn rf_setup_fields() {
        let config = RadioConfig::default()
            .with_data_rate(DataRate::Mbps1)
            .with_pa_level(PaLevel::Min)
            .with_lna(false);
        assert_eq!(config.rf_setup.into_bits(), 0);
        assert_eq!(config.data_rate(), DataRate::Mbps1);
        assert_eq!(config.pa_level(), PaLevel::Min);
        assert!(!config.lna_enabled());
    }

    #[test]
    fn addresses() {
        let config = RadioConfig::default()
            .with_tx_address(*b"1Node")
            .with_rx_address(1, *b"2Node")
            .with_rx_address(3, *b"3xxxx");
        assert_eq!(config.tx_address(), *b"1Node");
        assert_eq!(config.rx_address(3), Some(*b"3Node"));
        assert_eq!(config.pipe_lsb(3), b'3');
    }

    #[test]
    fn irq_events() {
        let config = RadioConfig::default().with_irq_events(StatusFlags::default());
        assert_eq!(config.config_reg.into_bits(), 0x79);
        assert!(!config.irq_events().tx_ds());
    }
}
