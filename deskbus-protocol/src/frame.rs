//! Bus scanning shared by the desk and keypad protocols.
//!
//! Both buses carry fixed-length frames that begin with a start byte and
//! end with a checksum. [`FrameScanner`] finds the start byte and collects
//! the bytes that follow it; the protocol modules validate what it hands
//! back.
//!
//! The scanner does not treat a start byte inside a frame body as a new
//! start. A corrupted frame is always carried to its full length first.

use core::fmt;

use heapless::Vec;

/// Largest frame body (everything after the start byte) on either bus
pub const MAX_BODY_SIZE: usize = 5;

/// Collected bytes of one frame attempt, start byte excluded
pub type FrameBody = Vec<u8, MAX_BODY_SIZE>;

/// 8-bit truncated sum of `bytes`
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |sum, &byte| sum.wrapping_add(byte))
}

/// Reasons a completed frame is rejected
///
/// None of these are fatal. The parser that produced the error has already
/// dropped the frame and is searching for the next start byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Checksum byte does not match the sum of the payload
    ChecksumMismatch {
        /// Sum computed over the payload
        expected: u8,
        /// Checksum byte carried by the frame
        received: u8,
    },
    /// Desk frame carries a message type other than height status
    UnsupportedType(u8),
    /// All three display digits are dark
    BlankDisplay,
    /// A segment pattern is not a digit
    InvalidDigit,
    /// Fewer bytes than the frame length requires
    Incomplete,
}

impl FrameError {
    /// Whether this rejection points at bus corruption worth reporting
    ///
    /// Unknown types, blank displays and non-digit patterns are normal
    /// desk traffic and are dropped quietly.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, FrameError::ChecksumMismatch { .. })
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::ChecksumMismatch { expected, received } => {
                write!(f, "checksum mismatch: {expected:02x} != {received:02x}")
            }
            FrameError::UnsupportedType(ty) => write!(f, "unknown message type {ty:02x}"),
            FrameError::BlankDisplay => f.write_str("blank display"),
            FrameError::InvalidDigit => f.write_str("invalid digit pattern"),
            FrameError::Incomplete => f.write_str("incomplete frame"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Discarding bytes until the start byte
    Searching,
    /// Collecting the frame body
    Accumulating,
}

/// Start-byte scanner for fixed-length frames
#[derive(Debug, Clone)]
pub struct FrameScanner {
    start: u8,
    body_len: usize,
    state: ScanState,
    buffer: FrameBody,
}

impl FrameScanner {
    /// Create a scanner for frames opened by `start` and followed by
    /// `body_len` bytes (checksum included)
    ///
    /// `body_len` is capped at [`MAX_BODY_SIZE`].
    pub const fn new(start: u8, body_len: usize) -> Self {
        let body_len = if body_len > MAX_BODY_SIZE {
            MAX_BODY_SIZE
        } else {
            body_len
        };
        Self {
            start,
            body_len,
            state: ScanState::Searching,
            buffer: Vec::new(),
        }
    }

    /// Whether the scanner is between frames
    pub fn is_searching(&self) -> bool {
        self.state == ScanState::Searching
    }

    /// Number of body bytes collected so far
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one byte
    ///
    /// Returns the frame body once `body_len` bytes have followed a start
    /// byte. The scanner is searching again when this returns `Some`.
    pub fn push(&mut self, byte: u8) -> Option<FrameBody> {
        match self.state {
            ScanState::Searching => {
                if byte == self.start {
                    self.buffer.clear();
                    self.state = ScanState::Accumulating;
                }
                None
            }
            ScanState::Accumulating => {
                // Cannot overflow: body_len <= MAX_BODY_SIZE
                let _ = self.buffer.push(byte);
                if self.buffer.len() < self.body_len {
                    return None;
                }
                self.state = ScanState::Searching;
                Some(core::mem::take(&mut self.buffer))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_truncates() {
        assert_eq!(checksum(&[]), 0);
        assert_eq!(checksum(&[0x07, 0xDB, 0x6D, 0x01]), 0x50);
        assert_eq!(checksum(&[0xFF, 0x02]), 0x01);
    }

    #[test]
    fn test_scanner_skips_until_start() {
        let mut scanner = FrameScanner::new(0xA5, 2);
        assert_eq!(scanner.push(0x00), None);
        assert_eq!(scanner.push(0x11), None);
        assert!(scanner.is_searching());

        assert_eq!(scanner.push(0xA5), None);
        assert!(!scanner.is_searching());
        assert_eq!(scanner.push(0x01), None);
        assert_eq!(scanner.pending(), 1);

        let body = scanner.push(0x02).unwrap();
        assert_eq!(body.as_slice(), &[0x01, 0x02]);
        assert!(scanner.is_searching());
        assert_eq!(scanner.pending(), 0);
    }

    #[test]
    fn test_start_byte_inside_body_is_data() {
        let mut scanner = FrameScanner::new(0x5A, 3);
        scanner.push(0x5A);
        scanner.push(0x5A);
        scanner.push(0x01);
        let body = scanner.push(0x5A).unwrap();
        assert_eq!(body.as_slice(), &[0x5A, 0x01, 0x5A]);
    }

    #[test]
    fn test_body_len_is_capped() {
        let mut scanner = FrameScanner::new(0x5A, 64);
        scanner.push(0x5A);
        for byte in 0..4 {
            assert_eq!(scanner.push(byte), None);
        }
        let body = scanner.push(4).unwrap();
        assert_eq!(body.len(), MAX_BODY_SIZE);
    }

    #[test]
    fn test_only_checksum_mismatch_is_diagnostic() {
        assert!(FrameError::ChecksumMismatch {
            expected: 0x50,
            received: 0x51
        }
        .is_diagnostic());
        assert!(!FrameError::UnsupportedType(0x02).is_diagnostic());
        assert!(!FrameError::BlankDisplay.is_diagnostic());
        assert!(!FrameError::InvalidDigit.is_diagnostic());
        assert!(!FrameError::Incomplete.is_diagnostic());
    }
}
