//! deskbus Hardware Abstraction Layer
//!
//! This crate defines the capabilities the bridge needs from a board: two
//! polled serial transports (desk bus and remote bus) and two optional
//! signal pins. Board crates, or the adapters in `deskbus-drivers`,
//! implement these traits so the same bridge logic runs anywhere.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  deskbus-core (bridge, movement)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  deskbus-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ deskbus-      │       │  board crate  │
//! │   drivers     │       │  (own impls)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Polled serial communication
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital signal lines
//!
//! [`Unconnected`] stands in for a capability the board does not provide.

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod uart;
mod unconnected;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use uart::{Uart, UartRx, UartTx};
pub use unconnected::Unconnected;
