#![doc = include_str!("../README.md")]
//!
//! ## Register access
//!
//! - [`Nrf24l01::read_register()`](fn@crate::radio::Nrf24l01::read_register)
//! - [`Nrf24l01::read_register_multi()`](fn@crate::radio::Nrf24l01::read_register_multi)
//! - [`Nrf24l01::write_register()`](fn@crate::radio::Nrf24l01::write_register)
//! - [`Nrf24l01::write_register_multi()`](fn@crate::radio::Nrf24l01::write_register_multi)
//! - [`Nrf24l01::send_command()`](fn@crate::radio::Nrf24l01::send_command)
//! - [`Nrf24l01::send_receive_command()`](fn@crate::radio::Nrf24l01::send_receive_command)
//!
//! ## Mode control
//!
//! - [`EsbPower::power_up()`](fn@crate::radio::prelude::EsbPower::power_up)
//! - [`EsbPower::power_down()`](fn@crate::radio::prelude::EsbPower::power_down)
//! - [`EsbMode::enable_rx_mode()`](fn@crate::radio::prelude::EsbMode::enable_rx_mode)
//! - [`EsbMode::disable_rx_mode()`](fn@crate::radio::prelude::EsbMode::disable_rx_mode)
//! - [`EsbMode::enable_tx_mode()`](fn@crate::radio::prelude::EsbMode::enable_tx_mode)
//! - [`EsbMode::disable_tx_mode()`](fn@crate::radio::prelude::EsbMode::disable_tx_mode)
//! - [`EsbMode::mode()`](fn@crate::radio::prelude::EsbMode::mode)
//!
//! ## Transmitting
//!
//! - [`EsbTx::submit_data()`](fn@crate::radio::prelude::EsbTx::submit_data)
//! - [`EsbTx::attempt_tx()`](fn@crate::radio::prelude::EsbTx::attempt_tx)
//! - [`EsbTx::send_data()`](fn@crate::radio::prelude::EsbTx::send_data)
//! - [`EsbTx::send_data_to()`](fn@crate::radio::prelude::EsbTx::send_data_to)
//! - [`EsbTx::poll_tx_complete()`](fn@crate::radio::prelude::EsbTx::poll_tx_complete)
//!
//! ## Receiving
//!
//! - [`EsbRx::is_data_ready()`](fn@crate::radio::prelude::EsbRx::is_data_ready)
//! - [`EsbRx::wait_for_data()`](fn@crate::radio::prelude::EsbRx::wait_for_data)
//! - [`EsbRx::get_data()`](fn@crate::radio::prelude::EsbRx::get_data)
//! - [`EsbAutoAck::set_ack_payload()`](fn@crate::radio::prelude::EsbAutoAck::set_ack_payload)
//!
//! ## Interrupts
//!
//! - [`Nrf24l01::capture_irq()`](fn@crate::radio::Nrf24l01::capture_irq)
//! - [`Nrf24l01::service_irq()`](fn@crate::radio::Nrf24l01::service_irq)
//! - [`Nrf24l01::wait_for_irq()`](fn@crate::radio::Nrf24l01::wait_for_irq)
//! - [`IrqMailbox`](struct@crate::radio::IrqMailbox)
//!
#![no_std]

mod log;
mod types;
pub use types::{DataRate, FifoState, Mode, PaLevel, StatusFlags};
pub mod radio;
