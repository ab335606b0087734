//! Desk controller status frames
//!
//! The desk controller repeats the content of its height display on the
//! bus. Depending on the controller model a frame is 5 bytes (no type byte)
//! or 6 bytes (type byte, `0x01` for height status):
//!
//! - START (1 byte): 0x5A
//! - SEGMENTS (3 bytes): hundreds, tens, units digit segment patterns
//! - TYPE (1 byte, 6-byte frames only): message type
//! - CHECKSUM (1 byte): truncated sum of SEGMENTS and TYPE

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::frame::{checksum, FrameError, FrameScanner};
use crate::segment::{decode_digit, has_decimal_point};

/// Desk frame synchronization byte
pub const DESK_FRAME_START: u8 = 0x5A;

/// Message type of a height status frame
pub const DESK_STATUS_TYPE: u8 = 0x01;

/// Length of a desk frame on the wire, start byte included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageLength {
    /// 5 bytes: segments and checksum
    Short,
    /// 6 bytes: segments, type byte and checksum
    #[default]
    Long,
}

impl MessageLength {
    /// Frame length in bytes
    pub const fn as_u8(self) -> u8 {
        match self {
            MessageLength::Short => 5,
            MessageLength::Long => 6,
        }
    }

    /// Bytes that follow the start byte
    pub const fn body_len(self) -> usize {
        self.as_u8() as usize - 1
    }

    /// Whether frames carry a type byte before the checksum
    pub const fn has_type_byte(self) -> bool {
        matches!(self, MessageLength::Long)
    }
}

/// A raw frame length that is neither 5 nor 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidMessageLength(pub u8);

impl fmt::Display for InvalidMessageLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported desk message length {}", self.0)
    }
}

impl TryFrom<u8> for MessageLength {
    type Error = InvalidMessageLength;

    fn try_from(length: u8) -> Result<Self, Self::Error> {
        match length {
            5 => Ok(MessageLength::Short),
            6 => Ok(MessageLength::Long),
            other => Err(InvalidMessageLength(other)),
        }
    }
}

/// Height shown on the desk display, in display units
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Height(f32);

impl Height {
    /// Build a height from display units
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Build a height from the three display digits
    ///
    /// With the decimal point lit the display reads `hh.t` instead of `hht`.
    pub fn from_digits(hundreds: u8, tens: u8, units: u8, decimal_point: bool) -> Self {
        let value = hundreds as u16 * 100 + tens as u16 * 10 + units as u16;
        if decimal_point {
            Self(value as f32 / 10.0)
        } else {
            Self(value as f32)
        }
    }

    /// Height in display units
    pub const fn value(self) -> f32 {
        self.0
    }
}

/// Validate and interpret one desk frame body (everything after the start
/// byte)
///
/// `body` must hold at least `length.body_len()` bytes; extra bytes are
/// ignored.
pub fn decode_status(length: MessageLength, body: &[u8]) -> Result<Height, FrameError> {
    let Some(frame) = body.get(..length.body_len()) else {
        return Err(FrameError::Incomplete);
    };
    let (payload, tail) = frame.split_at(frame.len() - 1);
    let received = tail[0];
    let expected = checksum(payload);
    if expected != received {
        return Err(FrameError::ChecksumMismatch { expected, received });
    }

    if length.has_type_byte() && payload[3] != DESK_STATUS_TYPE {
        return Err(FrameError::UnsupportedType(payload[3]));
    }

    let segments = [payload[0], payload[1], payload[2]];
    if segments == [0, 0, 0] {
        return Err(FrameError::BlankDisplay);
    }

    let hundreds = decode_digit(segments[0]).ok_or(FrameError::InvalidDigit)?;
    let tens = decode_digit(segments[1]).ok_or(FrameError::InvalidDigit)?;
    let units = decode_digit(segments[2]).ok_or(FrameError::InvalidDigit)?;

    Ok(Height::from_digits(
        hundreds,
        tens,
        units,
        has_decimal_point(segments[1]),
    ))
}

/// State machine for desk status frames
///
/// Reports a height only when it differs from the last one it reported.
#[derive(Debug, Clone)]
pub struct DeskFrameParser {
    length: MessageLength,
    scanner: FrameScanner,
    last_height: Option<Height>,
}

impl Default for DeskFrameParser {
    fn default() -> Self {
        Self::new(MessageLength::default())
    }
}

impl DeskFrameParser {
    /// Create a parser for frames of the given length
    pub const fn new(length: MessageLength) -> Self {
        Self {
            length,
            scanner: FrameScanner::new(DESK_FRAME_START, length.body_len()),
            last_height: None,
        }
    }

    /// Configured frame length
    pub fn message_length(&self) -> MessageLength {
        self.length
    }

    /// Last height this parser reported
    pub fn last_height(&self) -> Option<Height> {
        self.last_height
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(height))` when a valid frame shows a new height,
    /// `Ok(None)` when more bytes are needed or the height is unchanged,
    /// or `Err` when a completed frame was rejected.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Height>, FrameError> {
        let Some(body) = self.scanner.push(byte) else {
            return Ok(None);
        };

        let height = decode_status(self.length, &body)?;
        if self.last_height == Some(height) {
            return Ok(None);
        }
        self.last_height = Some(height);
        Ok(Some(height))
    }

    /// Feed multiple bytes to the parser
    ///
    /// Stops at the first new height or rejected frame. Remaining bytes
    /// after that point are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Height>, FrameError> {
        for &byte in bytes {
            if let Some(height) = self.feed(byte)? {
                return Ok(Some(height));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Six-byte status frame with a correct checksum
    fn status_frame(segments: [u8; 3]) -> [u8; 6] {
        let mut frame = [DESK_FRAME_START, segments[0], segments[1], segments[2], DESK_STATUS_TYPE, 0];
        frame[5] = checksum(&frame[1..5]);
        frame
    }

    #[test]
    fn test_decimal_height() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let height = parser
            .feed_bytes(&[0x5A, 0x07, 0xDB, 0x6D, 0x01, 0x50])
            .unwrap()
            .unwrap();
        assert_eq!(height.value(), 72.5);
    }

    #[test]
    fn test_whole_height() {
        let mut parser = DeskFrameParser::default();
        let height = parser.feed_bytes(&status_frame([0x3F, 0x7F, 0x3F])).unwrap();
        assert_eq!(height, Some(Height::new(80.0)));
    }

    #[test]
    fn test_short_frames_have_no_type_byte() {
        let mut parser = DeskFrameParser::new(MessageLength::Short);
        let height = parser
            .feed_bytes(&[0x5A, 0x07, 0x5B, 0x6D, 0xCF])
            .unwrap()
            .unwrap();
        assert_eq!(height.value(), 725.0);
    }

    #[test]
    fn test_corrupted_checksum_then_resync() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let result = parser.feed_bytes(&[0x5A, 0x07, 0xDB, 0x6D, 0x01, 0x51]);
        assert_eq!(
            result,
            Err(FrameError::ChecksumMismatch {
                expected: 0x50,
                received: 0x51
            })
        );
        assert_eq!(parser.last_height(), None);

        let height = parser
            .feed_bytes(&[0x5A, 0x07, 0xDB, 0x6D, 0x01, 0x50])
            .unwrap()
            .unwrap();
        assert_eq!(height.value(), 72.5);
    }

    #[test]
    fn test_unknown_type_is_discarded() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let result = parser.feed_bytes(&[0x5A, 0x07, 0xDB, 0x6D, 0x02, 0x51]);
        assert_eq!(result, Err(FrameError::UnsupportedType(0x02)));
        assert_eq!(parser.last_height(), None);
    }

    #[test]
    fn test_blank_display_is_discarded() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let result = parser.feed_bytes(&status_frame([0, 0, 0]));
        assert_eq!(result, Err(FrameError::BlankDisplay));
    }

    #[test]
    fn test_invalid_digit_is_discarded() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let result = parser.feed_bytes(&status_frame([0x07, 0x66, 0x6D]));
        assert_eq!(result, Err(FrameError::InvalidDigit));
        assert_eq!(parser.last_height(), None);
    }

    #[test]
    fn test_repeated_height_reported_once() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        let frame = status_frame([0x3F, 0x6D, 0x3F]);

        assert_eq!(parser.feed_bytes(&frame).unwrap(), Some(Height::new(50.0)));
        assert_eq!(parser.feed_bytes(&frame).unwrap(), None);
        assert_eq!(parser.last_height(), Some(Height::new(50.0)));

        let higher = status_frame([0x3F, 0x6D, 0x06]);
        assert_eq!(parser.feed_bytes(&higher).unwrap(), Some(Height::new(51.0)));
    }

    #[test]
    fn test_garbage_before_start_is_ignored() {
        let mut parser = DeskFrameParser::new(MessageLength::Long);
        assert_eq!(parser.feed_bytes(&[0x00, 0xFF, 0x12, 0x34]), Ok(None));
        let height = parser.feed_bytes(&status_frame([0x07, 0xDB, 0x6D])).unwrap();
        assert_eq!(height, Some(Height::new(72.5)));
    }

    #[test]
    fn test_short_body_is_incomplete() {
        assert_eq!(
            decode_status(MessageLength::Long, &[0x07, 0xDB]),
            Err(FrameError::Incomplete)
        );
        assert_eq!(decode_status(MessageLength::Long, &[]), Err(FrameError::Incomplete));
        assert_eq!(
            decode_status(MessageLength::Short, &[0x07, 0x5B, 0x6D]),
            Err(FrameError::Incomplete)
        );
        assert_eq!(
            decode_status(MessageLength::Short, &[0x07, 0x5B, 0x6D, 0xCF]),
            Ok(Height::new(725.0))
        );
    }

    #[test]
    fn test_message_length_conversion() {
        assert_eq!(MessageLength::try_from(5), Ok(MessageLength::Short));
        assert_eq!(MessageLength::try_from(6), Ok(MessageLength::Long));
        assert_eq!(MessageLength::try_from(7), Err(InvalidMessageLength(7)));
        assert_eq!(MessageLength::Long.body_len(), 5);
        assert!(!MessageLength::Short.has_type_byte());
    }

    proptest! {
        #[test]
        fn prop_no_height_without_valid_frame(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut parser = DeskFrameParser::new(MessageLength::Long);
            for (i, &byte) in bytes.iter().enumerate() {
                if let Ok(Some(height)) = parser.feed(byte) {
                    prop_assert!(i >= 5);
                    let frame = &bytes[i - 5..=i];
                    prop_assert_eq!(frame[0], DESK_FRAME_START);
                    prop_assert_eq!(frame[4], DESK_STATUS_TYPE);
                    prop_assert_eq!(checksum(&frame[1..5]), frame[5]);
                    let digits: Vec<u8> = frame[1..4].iter().filter_map(|&s| decode_digit(s)).collect();
                    prop_assert_eq!(digits.len(), 3);
                    let expected = Height::from_digits(digits[0], digits[1], digits[2], has_decimal_point(frame[2]));
                    prop_assert_eq!(height, expected);
                }
            }
        }

        #[test]
        fn prop_no_short_height_without_valid_frame(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut parser = DeskFrameParser::new(MessageLength::Short);
            for (i, &byte) in bytes.iter().enumerate() {
                if let Ok(Some(height)) = parser.feed(byte) {
                    prop_assert!(i >= 4);
                    let frame = &bytes[i - 4..=i];
                    prop_assert_eq!(frame[0], DESK_FRAME_START);
                    prop_assert_eq!(checksum(&frame[1..4]), frame[4]);
                    let digits: Vec<u8> = frame[1..4].iter().filter_map(|&s| decode_digit(s)).collect();
                    prop_assert_eq!(digits.len(), 3);
                    let expected = Height::from_digits(digits[0], digits[1], digits[2], has_decimal_point(frame[2]));
                    prop_assert_eq!(height, expected);
                }
            }
        }

        #[test]
        fn prop_decode_never_panics(
            short in any::<bool>(),
            body in proptest::collection::vec(any::<u8>(), 0..8),
        ) {
            let length = if short { MessageLength::Short } else { MessageLength::Long };
            let result = decode_status(length, &body);
            if body.len() < length.body_len() {
                prop_assert_eq!(result, Err(FrameError::Incomplete));
            }
        }

        #[test]
        fn prop_resync_after_garbage(
            garbage in proptest::collection::vec(any::<u8>().prop_filter("no start byte", |b| *b != DESK_FRAME_START), 0..64),
            digits in proptest::array::uniform3(0usize..10),
        ) {
            const PATTERNS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x67, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];
            let mut parser = DeskFrameParser::new(MessageLength::Long);
            for &byte in &garbage {
                prop_assert_eq!(parser.feed(byte), Ok(None));
            }
            let frame = status_frame([PATTERNS[digits[0]], PATTERNS[digits[1]], PATTERNS[digits[2]]]);
            let expected = Height::from_digits(digits[0] as u8, digits[1] as u8, digits[2] as u8, false);
            prop_assert_eq!(parser.feed_bytes(&frame), Ok(Some(expected)));
        }
    }
}
