//! Instrument cluster firmware logic.
//!
//! Everything here is hardware-independent and runs on the host:
//!
//! - **input**: button debouncing and the lock-free event hand-off
//! - **menu**: the menu tree and the dashboard/menu state machine
//! - **sched**: the fixed-period task table
//! - **bus**: CAN heartbeat queue and bounded drain pump
//! - **tasks**: the periodic task bodies wired to the above
//! - **ui**: view snapshots, drawing, and the main-loop [`ui::poll`]
//!
//! The embedded binary (`src/main.rs`, `embedded` feature) binds these to
//! the STM32F446 peripherals and the Embassy executors.
//!
//! Usage: `cargo test` on the host.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod bus;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod sched;
pub mod shared;
pub mod tasks;
pub mod ui;

pub use error::Error;
pub use menu::{build_default_tree, Navigator};
pub use shared::Shared;
