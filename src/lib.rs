//! Host-testable core of alt2usb.
//!
//! Everything that decides what the altitude is lives here, free of any
//! hardware: the ring trackers, the reset-button edge detector, the serial
//! command protocol, the seven-segment readout and the controller that
//! ties them together. The firmware in `main.rs` only adapts Embassy
//! peripherals to the traits in [`ports`].
//!
//! Usage: `cargo test` (host) or
//! `cargo build --release --features embedded --target thumbv7em-none-eabihf`.
//!
//! Note: the library is `no_std`; std is only linked for unit tests.

#![cfg_attr(not(test), no_std)]

pub mod button;
pub mod command;
pub mod config;
pub mod controller;
pub mod display;
pub mod encoder;
pub mod hid;
pub mod link;
pub mod max7219;
pub mod ports;
pub mod quadrature;

pub use controller::{AltitudeController, Cycle, Outcome, RangePolicy};
pub use ports::Board;
