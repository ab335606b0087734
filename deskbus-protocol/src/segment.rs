//! Seven-segment digit decoding
//!
//! Segment bytes use the usual `gfedcba` bit order. Bit 7 drives the
//! decimal point next to the digit; callers read it themselves.

/// Decimal point bit of a segment byte
pub const DECIMAL_POINT: u8 = 0x80;

/// Segment patterns of the digits 0-9, indexed by digit
///
/// The desk lights the top segment on its 4, so that pattern is `0x67`
/// rather than the textbook `0x66`.
const DIGIT_PATTERNS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x67, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Decode a segment byte into its digit
///
/// The decimal point bit is ignored. Returns `None` for any pattern that is
/// not a digit, including a dark digit (`0x00`).
pub fn decode_digit(segments: u8) -> Option<u8> {
    let pattern = segments & !DECIMAL_POINT;
    DIGIT_PATTERNS
        .iter()
        .position(|&p| p == pattern)
        .map(|digit| digit as u8)
}

/// Whether the decimal point next to this digit is lit
pub fn has_decimal_point(segments: u8) -> bool {
    segments & DECIMAL_POINT != 0
}
