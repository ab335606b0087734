//! Command frames injected onto the desk bus
//!
//! The desk accepts keypad-shaped frames with a fixed layout:
//! `[0xA5, 0x00, P, 0xFF - P, 0xFF]`, where `P` is a button mask. Driving
//! the motor is the same as holding UP or DOWN on the keypad.

use crate::remote::ButtonMask;

/// Command frame synchronization byte
pub const COMMAND_FRAME_START: u8 = 0xA5;

/// Length of every command frame
pub const COMMAND_FRAME_LEN: usize = 5;

/// Closing byte of every command frame
pub const COMMAND_FRAME_END: u8 = 0xFF;

/// Drive direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Button mask that drives the desk this way
    pub const fn mask(self) -> ButtonMask {
        match self {
            Direction::Up => ButtonMask::UP,
            Direction::Down => ButtonMask::DOWN,
        }
    }
}

/// Memory presets stored in the desk controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    One,
    Two,
    Three,
}

impl Preset {
    /// Button mask that recalls this preset
    pub const fn mask(self) -> ButtonMask {
        match self {
            Preset::One => ButtonMask::MEMORY1,
            Preset::Two => ButtonMask::MEMORY2,
            Preset::Three => ButtonMask::MEMORY3,
        }
    }

    /// Preset by its 1-based number
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Preset::One),
            2 => Some(Preset::Two),
            3 => Some(Preset::Three),
            _ => None,
        }
    }
}

/// Something the bridge tells the desk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// One drive pulse
    Drive(Direction),
    /// Arbitrary button state, as if pressed on the keypad
    Buttons(ButtonMask),
    /// Recall a memory preset
    Preset(Preset),
}

impl Command {
    /// Payload byte `P` of the frame
    pub const fn payload(self) -> u8 {
        match self {
            Command::Drive(direction) => direction.mask().bits(),
            Command::Buttons(mask) => mask.bits(),
            Command::Preset(preset) => preset.mask().bits(),
        }
    }

    /// Build the wire frame for this command
    pub const fn encode(self) -> CommandFrame {
        CommandFrame::from_payload(self.payload())
    }
}

/// An encoded command frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandFrame([u8; COMMAND_FRAME_LEN]);

impl CommandFrame {
    /// Build a frame around payload byte `payload`
    pub const fn from_payload(payload: u8) -> Self {
        Self([
            COMMAND_FRAME_START,
            0x00,
            payload,
            0xFF - payload,
            COMMAND_FRAME_END,
        ])
    }

    /// Payload byte carried by this frame
    pub const fn payload(&self) -> u8 {
        self.0[2]
    }

    /// Frame bytes, ready for transmission
    pub const fn as_bytes(&self) -> &[u8; COMMAND_FRAME_LEN] {
        &self.0
    }
}
