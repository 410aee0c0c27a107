//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod nrf24l01;
pub use nrf24l01::{commands, mnemonics, registers, Nrf24Error, Nrf24l01};

mod config;
pub use config::RadioConfig;

mod irq;
pub use irq::{IrqEvent, IrqMailbox, IrqOutcome, TxProgress};
