//! # Seven-Segment Digit Tables
//!
//! Maps masked LCD driver bytes back to the decimal digits shown on the
//! display. Each physical digit position wires its segments to different
//! bits of the frame payload, so every position has its own table.
//!
//! Segment naming follows <https://en.wikipedia.org/wiki/Seven-segment_display>.

/// Mask isolating the tenths-digit segments in payload byte 1
pub const TENTHS_SEGMENT_MASK: u8 = 0xBF;

/// Mask isolating the units-digit segments in payload byte 0
pub const UNITS_SEGMENT_MASK: u8 = 0xFE;

/// Masks isolating the tens-digit segments split across payload bytes 4 and 5
pub const TENS_SEGMENT_MASKS: (u8, u8) = (0x2F, 0xC0);

/// Decode the tenths digit (rightmost position, after the decimal point)
///
/// `masked` must already be masked with [`TENTHS_SEGMENT_MASK`]. A pattern
/// outside the table decodes to `None`, never to a fabricated digit.
pub fn tenths_digit(masked: u8) -> Option<char> {
    let digit = match masked {
        0xBB => 0, // a,b,c,d,e,f
        0x11 => 1, // b,c
        0x9E => 2, // a,b,d,e,g
        0x97 => 3, // a,b,c,d,g
        0x35 => 4, // b,c,f,g
        0xA7 => 5, // a,c,d,f,g
        0xAF => 6, // a,c,d,e,f,g
        0x91 => 7, // a,b,c
        0xBF => 8, // a,b,c,d,e,f,g
        0xB7 => 9, // a,b,c,d,f,g
        _ => return None,
    };
    Some(char::from(b'0' + digit))
}

/// Decode the units digit (middle position, before the decimal point)
///
/// `masked` must already be masked with [`UNITS_SEGMENT_MASK`].
pub fn units_digit(masked: u8) -> Option<char> {
    let digit = match masked {
        0xEE => 0,
        0x44 => 1,
        0xB6 => 2,
        0xD6 => 3,
        0x5C => 4,
        0xDA => 5,
        0xFA => 6,
        0x46 => 7,
        0xFE => 8,
        0xDE => 9,
        _ => return None,
    };
    Some(char::from(b'0' + digit))
}

/// Decode the tens digit (leftmost position)
///
/// This position spans two payload bytes; only a pattern pair matching the
/// same row counts as a match. Inputs must already be masked with
/// [`TENS_SEGMENT_MASKS`].
pub fn tens_digit(masked_hi: u8, masked_lo: u8) -> Option<char> {
    let digit = match (masked_hi, masked_lo) {
        (0x2E, 0xC0) => 0,
        (0x04, 0x40) => 1,
        (0x27, 0x80) => 2,
        (0x25, 0xC0) => 3,
        (0x0D, 0x40) => 4,
        (0x29, 0xC0) => 5,
        (0x2B, 0xC0) => 6,
        (0x24, 0x40) => 7,
        (0x2F, 0xC0) => 8,
        (0x2D, 0xC0) => 9,
        _ => return None,
    };
    Some(char::from(b'0' + digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENTHS_PATTERNS: [u8; 10] = [
        0xBB, 0x11, 0x9E, 0x97, 0x35, 0xA7, 0xAF, 0x91, 0xBF, 0xB7,
    ];
    const UNITS_PATTERNS: [u8; 10] = [
        0xEE, 0x44, 0xB6, 0xD6, 0x5C, 0xDA, 0xFA, 0x46, 0xFE, 0xDE,
    ];
    const TENS_PATTERNS: [(u8, u8); 10] = [
        (0x2E, 0xC0),
        (0x04, 0x40),
        (0x27, 0x80),
        (0x25, 0xC0),
        (0x0D, 0x40),
        (0x29, 0xC0),
        (0x2B, 0xC0),
        (0x24, 0x40),
        (0x2F, 0xC0),
        (0x2D, 0xC0),
    ];

    #[test]
    fn test_tenths_table_decodes_all_ten_digits() {
        for (i, &pattern) in TENTHS_PATTERNS.iter().enumerate() {
            let expected = char::from(b'0' + i as u8);
            assert_eq!(tenths_digit(pattern), Some(expected), "pattern 0x{:02X}", pattern);
        }
    }

    #[test]
    fn test_units_table_decodes_all_ten_digits() {
        for (i, &pattern) in UNITS_PATTERNS.iter().enumerate() {
            let expected = char::from(b'0' + i as u8);
            assert_eq!(units_digit(pattern), Some(expected), "pattern 0x{:02X}", pattern);
        }
    }

    #[test]
    fn test_tens_table_decodes_all_ten_digits() {
        for (i, &(hi, lo)) in TENS_PATTERNS.iter().enumerate() {
            let expected = char::from(b'0' + i as u8);
            assert_eq!(tens_digit(hi, lo), Some(expected));
        }
    }

    #[test]
    fn test_unmatched_patterns_decode_to_none() {
        assert_eq!(tenths_digit(0x00), None);
        assert_eq!(units_digit(0x00), None);
        assert_eq!(tens_digit(0x00, 0x00), None);
    }

    #[test]
    fn test_tens_requires_joint_match() {
        // Row halves from different digits must not match
        assert_eq!(tens_digit(0x2E, 0x40), None); // hi of 0, lo of 1
        assert_eq!(tens_digit(0x04, 0xC0), None); // hi of 1, lo of 0
    }
}
