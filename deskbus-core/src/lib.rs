//! Board-agnostic core logic for the desk lift bridge
//!
//! This crate contains everything that does not depend on a specific board:
//!
//! - Bridge configuration
//! - Movement controller (closed-loop "go to height")
//! - Component lifecycle trait driven by the host scheduler
//! - The bridge itself: bus draining, decoding, forwarding and command
//!   injection
//!
//! Transports and pins come in through the `deskbus-hal` traits, wire
//! formats from `deskbus-protocol`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod bridge;
pub mod config;
pub mod motion;
pub mod traits;

pub use bridge::{CycleReport, DeskBridge, LinkStats};
pub use config::{BridgeConfig, ConfigError};
pub use motion::{MovementController, Operation};
pub use traits::Component;
