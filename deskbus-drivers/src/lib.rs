//! Hardware adapters
//!
//! This crate connects ecosystem device drivers to the traits defined in
//! deskbus-hal, so a board support crate can hand its peripherals straight
//! to the bridge:
//!
//! - Serial ports implementing the `embedded-io` blocking traits
//! - Digital pins implementing the `embedded-hal` 1.0 traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod pin;
pub mod serial;

pub use pin::{HalInputPin, HalOutputPin};
pub use serial::{SerialError, SerialPort};
