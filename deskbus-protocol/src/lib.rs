//! Desk lift bus protocols
//!
//! This crate defines the two byte-oriented protocols found on a desk lift
//! installation and the command frames the bridge injects into them.
//!
//! # Protocol Overview
//!
//! The desk controller streams the contents of its 3-digit height display:
//! ```text
//! ┌───────┬──────────┬──────────┬──────────┬────────────┬──────────┐
//! │ START │ HUNDREDS │ TENS     │ UNITS    │ TYPE       │ CHECKSUM │
//! │ 0x5A  │ segments │ segments │ segments │ 0x01 (opt) │ 1B       │
//! └───────┴──────────┴──────────┴──────────┴────────────┴──────────┘
//! ```
//!
//! The wired keypad reports its buttons, and the desk accepts the same
//! shape back as a command:
//! ```text
//! keypad:  ┌──────┬──────┬─────────┬─────────┬──────────┐
//!          │ 0xA5 │ 0x00 │ BUTTONS │ padding │ CHECKSUM │
//!          └──────┴──────┴─────────┴─────────┴──────────┘
//! command: ┌──────┬──────┬─────────┬──────────┬──────┐
//!          │ 0xA5 │ 0x00 │ P       │ 0xFF - P │ 0xFF │
//!          └──────┴──────┴─────────┴──────────┴──────┘
//! ```
//!
//! Checksums are the 8-bit truncated sum of the bytes between the start
//! byte and the checksum.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod desk;
pub mod frame;
pub mod remote;
pub mod segment;

pub use command::{Command, CommandFrame, Direction, Preset, COMMAND_FRAME_LEN, COMMAND_FRAME_START};
pub use desk::{DeskFrameParser, Height, InvalidMessageLength, MessageLength, DESK_FRAME_START};
pub use frame::{checksum, FrameError, FrameScanner};
pub use remote::{Button, ButtonMask, RemoteFrameParser, REMOTE_FRAME_START};
pub use segment::decode_digit;
