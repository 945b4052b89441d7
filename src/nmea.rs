//! # NMEA 0183 Sentence Assembly
//!
//! XOR checksum calculation and sentence framing for NMEA 0183 output.
//!
//! The checksum covers every character strictly between `$` and `*` and is
//! rendered as uppercase hexadecimal without zero padding: values below 0x10
//! produce a single hex digit, matching what the receiving routers on this
//! link accept.

/// Sentence terminator required by NMEA 0183
pub const SENTENCE_TERMINATOR: &str = "\r\n";

/// Calculate the XOR checksum over a sentence body
///
/// # Arguments
///
/// * `body` - Sentence content between `$` and `*`, exclusive
///
/// # Returns
///
/// * `u8` - XOR of every byte in the body
///
/// # Examples
///
/// ```
/// use nmea_bridge::nmea::checksum;
///
/// assert_eq!(checksum("SDDPT,23.3,0.0"), 0x65);
/// ```
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, byte| acc ^ byte)
}

/// Frame a sentence body as `$<body>*<checksum>\r\n`
///
/// # Arguments
///
/// * `body` - Sentence content without `$`, `*` or the checksum
///
/// # Returns
///
/// * `String` - Complete CR/LF-terminated sentence
pub fn sentence(body: &str) -> String {
    format!("${}*{:X}{}", body, checksum(body), SENTENCE_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_empty_body() {
        assert_eq!(checksum(""), 0);
    }

    #[test]
    fn test_checksum_known_body() {
        // 'S' ^ 'D' ^ 'D' ^ 'P' ^ 'T' ^ ',' ... for the documented depth example
        assert_eq!(checksum("SDDPT,23.3,0.0"), 0x65);
    }

    #[test]
    fn test_sentence_framing() {
        assert_eq!(sentence("SDDPT,23.3,0.0"), "$SDDPT,23.3,0.0*65\r\n");
    }

    #[test]
    fn test_sentence_single_digit_checksum_is_unpadded() {
        // '4' ^ '5' = 0x07: must render as "7", not "07"
        assert_eq!(checksum("45"), 0x07);
        assert_eq!(sentence("45"), "$45*7\r\n");
    }

    #[test]
    fn test_checksum_is_order_insensitive_xor() {
        assert_eq!(checksum("AB"), checksum("BA"));
        assert_eq!(checksum("AA"), 0);
    }
}
