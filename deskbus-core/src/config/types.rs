//! Configuration type definitions
//!
//! A board keeps these settings in flash as postcard-serialized binary data
//! (see [`BridgeConfig::from_bytes`]). Reading them from storage is the
//! board's job.

use core::fmt;

use deskbus_protocol::{InvalidMessageLength, MessageLength};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest serialized [`BridgeConfig`]
pub const MAX_CONFIG_SIZE: usize = 8;

/// Errors raised while building or loading a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Desk frame length other than 5 or 6
    InvalidMessageLength(u8),
    /// Output buffer too small
    Serialize,
    /// Stored bytes are not a valid configuration
    Deserialize,
}

impl From<InvalidMessageLength> for ConfigError {
    fn from(err: InvalidMessageLength) -> Self {
        ConfigError::InvalidMessageLength(err.0)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidMessageLength(len) => {
                write!(f, "message length must be 5 or 6, got {len}")
            }
            ConfigError::Serialize => f.write_str("failed to serialize configuration"),
            ConfigError::Deserialize => f.write_str("failed to deserialize configuration"),
        }
    }
}

/// Bridge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Desk status frame length (depends on the controller model)
    pub message_length: MessageLength,
    /// Copy every keypad byte onto the desk bus as it arrives
    pub forward_remote_to_desk: bool,
    /// Copy every desk byte onto the keypad bus so its display keeps working
    pub forward_desk_to_remote: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            message_length: MessageLength::Long,
            forward_remote_to_desk: true,
            forward_desk_to_remote: true,
        }
    }
}

impl BridgeConfig {
    /// Default configuration with a raw desk frame length
    pub fn with_message_length(length: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            message_length: MessageLength::try_from(length)?,
            ..Self::default()
        })
    }

    /// Load a configuration from its postcard encoding
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)
    }

    /// Encode into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_slice<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialize)
    }
}
