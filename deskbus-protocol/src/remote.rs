//! Keypad button frames
//!
//! The wired keypad sends its button state whenever it is pressed:
//! - START (1 byte): 0xA5
//! - RESERVED (1 byte)
//! - BUTTONS (1 byte): [`ButtonMask`]
//! - PADDING (1 byte)
//! - CHECKSUM (1 byte): truncated sum of the three bytes before it

use core::ops::BitOr;

use crate::frame::{checksum, FrameError, FrameScanner};

/// Keypad frame synchronization byte
pub const REMOTE_FRAME_START: u8 = 0xA5;

/// Bytes that follow the start byte
const REMOTE_BODY_LEN: usize = 4;

/// Keypad buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Memory1,
    Memory2,
    Memory3,
}

impl Button {
    /// Every button, in report order
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Memory1,
        Button::Memory2,
        Button::Memory3,
    ];

    /// Mask with only this button set
    pub const fn mask(self) -> ButtonMask {
        match self {
            Button::Up => ButtonMask::UP,
            Button::Down => ButtonMask::DOWN,
            Button::Memory1 => ButtonMask::MEMORY1,
            Button::Memory2 => ButtonMask::MEMORY2,
            Button::Memory3 => ButtonMask::MEMORY3,
        }
    }

    /// Short display name
    pub const fn as_str(self) -> &'static str {
        match self {
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Memory1 => "Memory1",
            Button::Memory2 => "Memory2",
            Button::Memory3 => "Memory3",
        }
    }
}

/// Set of pressed keypad buttons, as carried on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0x00);
    pub const MEMORY1: ButtonMask = ButtonMask(0x02);
    pub const MEMORY2: ButtonMask = ButtonMask(0x04);
    pub const MEMORY3: ButtonMask = ButtonMask(0x08);
    pub const UP: ButtonMask = ButtonMask(0x20);
    pub const DOWN: ButtonMask = ButtonMask(0x40);

    /// Wrap a raw mask byte; unknown bits are kept
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw mask byte
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `button` is pressed
    pub const fn is_pressed(self, button: Button) -> bool {
        self.contains(button.mask())
    }

    /// Whether no bit is set
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

/// State machine for keypad frames
#[derive(Debug, Clone)]
pub struct RemoteFrameParser {
    scanner: FrameScanner,
}

impl Default for RemoteFrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteFrameParser {
    /// Create a new keypad parser
    pub const fn new() -> Self {
        Self {
            scanner: FrameScanner::new(REMOTE_FRAME_START, REMOTE_BODY_LEN),
        }
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(mask))` for every valid frame, including repeats.
    pub fn feed(&mut self, byte: u8) -> Result<Option<ButtonMask>, FrameError> {
        let Some(body) = self.scanner.push(byte) else {
            return Ok(None);
        };

        let expected = checksum(&body[..3]);
        let received = body[3];
        if expected != received {
            return Err(FrameError::ChecksumMismatch { expected, received });
        }
        Ok(Some(ButtonMask::from_bits(body[1])))
    }

    /// Feed multiple bytes, stopping at the first frame or error
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<ButtonMask>, FrameError> {
        for &byte in bytes {
            if let Some(mask) = self.feed(byte)? {
                return Ok(Some(mask));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_up_button() {
        let mut parser = RemoteFrameParser::new();
        let mask = parser
            .feed_bytes(&[0xA5, 0x00, 0x20, 0x00, 0x20])
            .unwrap()
            .unwrap();

        assert_eq!(mask, ButtonMask::UP);
        assert!(mask.is_pressed(Button::Up));
        for button in [Button::Down, Button::Memory1, Button::Memory2, Button::Memory3] {
            assert!(!mask.is_pressed(button));
        }
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut parser = RemoteFrameParser::new();
        let result = parser.feed_bytes(&[0xA5, 0x00, 0x40, 0x00, 0x41]);
        assert_eq!(
            result,
            Err(FrameError::ChecksumMismatch {
                expected: 0x40,
                received: 0x41
            })
        );

        // Next frame decodes normally
        let mask = parser.feed_bytes(&[0xA5, 0x00, 0x40, 0x00, 0x40]).unwrap();
        assert_eq!(mask, Some(ButtonMask::DOWN));
    }

    #[test]
    fn test_repeats_are_reported() {
        let mut parser = RemoteFrameParser::new();
        let frame = [0xA5, 0x00, 0x02, 0x00, 0x02];
        assert_eq!(parser.feed_bytes(&frame), Ok(Some(ButtonMask::MEMORY1)));
        assert_eq!(parser.feed_bytes(&frame), Ok(Some(ButtonMask::MEMORY1)));
    }

    #[test]
    fn test_released_buttons() {
        let mut parser = RemoteFrameParser::new();
        let mask = parser.feed_bytes(&[0xA5, 0x00, 0x00, 0x00, 0x00]).unwrap();
        assert_eq!(mask, Some(ButtonMask::NONE));
        assert!(ButtonMask::NONE.is_empty());
    }

    #[test]
    fn test_mask_combination() {
        let mask = ButtonMask::MEMORY1 | ButtonMask::MEMORY3;
        assert_eq!(mask.bits(), 0x0A);
        assert!(mask.contains(ButtonMask::MEMORY3));
        assert!(!mask.contains(ButtonMask::MEMORY2));
        assert!(!mask.contains(ButtonMask::MEMORY1 | ButtonMask::UP));
    }

    #[test]
    fn test_button_masks_are_distinct() {
        let combined = Button::ALL
            .iter()
            .fold(ButtonMask::NONE, |acc, b| acc | b.mask());
        assert_eq!(combined.bits(), 0x6E);
    }

    proptest! {
        #[test]
        fn prop_mask_only_from_valid_frames(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let mut parser = RemoteFrameParser::new();
            for (i, &byte) in bytes.iter().enumerate() {
                if let Ok(Some(mask)) = parser.feed(byte) {
                    prop_assert!(i >= 4);
                    let frame = &bytes[i - 4..=i];
                    prop_assert_eq!(frame[0], REMOTE_FRAME_START);
                    prop_assert_eq!(checksum(&frame[1..4]), frame[4]);
                    prop_assert_eq!(mask.bits(), frame[2]);
                }
            }
        }
    }
}
