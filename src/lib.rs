//! PacDrive-compatible USB LED driver.
//!
//! The library holds everything that does not touch silicon: the USB
//! descriptor set, output report decoding, the channel → pin map and the
//! state synchroniser that drives pins through the [`channels::PinBank`]
//! seam. It builds for the host, so all of it is unit tested there.
//!
//! Usage: `cargo test` (host) or
//! `cargo build --release --features embedded --target thumbv7em-none-eabihf`
//!
//! The embedded binary in `main.rs` adds the nRF52840 USB driver and GPIO
//! through the `usb` module, which only exists with the `embedded` feature.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod channels;
pub mod config;
pub mod device;
pub mod error;
pub mod hid;

#[cfg(feature = "embedded")]
pub mod usb;

pub use channels::{ChannelMap, ChannelState, OutputDriver, PinBank, PinId, Polarity, StateSynchronizer};
pub use device::PacDrive;
pub use error::{ConfigError, Error, Result};
