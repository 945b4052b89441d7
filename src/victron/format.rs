//! # Value Formatter
//!
//! Scales raw integer telemetry tokens (millivolts, milliamps, watts,
//! centi-kilowatt-hours) into fixed-decimal text.
//!
//! The controller transmits plain decimal tokens; the number of digits in a
//! token determines how many count as whole units versus fraction. Tokens
//! with fewer digits than expected are left-padded with `0` rather than
//! rejected.

/// Longest numeric run accepted from a value token
///
/// Anything longer is a corrupt token; the rest is dropped.
const MAX_NUMERIC_LEN: usize = 7;

/// Leading run of digit characters, sign excluded
fn leading_digits(raw: &str) -> &str {
    let raw = raw.strip_prefix('-').unwrap_or(raw);
    let end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len())
        .min(MAX_NUMERIC_LEN);
    &raw[..end]
}

/// Leading run of digit or sign characters, verbatim
fn numeric_span(raw: &str) -> &str {
    let end = raw
        .find(|c: char| !c.is_ascii_digit() && c != '-')
        .unwrap_or(raw.len())
        .min(MAX_NUMERIC_LEN);
    &raw[..end]
}

fn is_negative(raw: &str) -> bool {
    raw.starts_with('-')
}

/// Split a milli-unit digit string into whole part and 3-digit fraction
fn split_milli(digits: &str) -> (&str, String) {
    if digits.len() > 3 {
        let (whole, frac) = digits.split_at(digits.len() - 3);
        (whole, frac.to_string())
    } else {
        ("0", format!("{:0>3}", digits))
    }
}

/// Voltage in default precision: all of the 10 mV and 1 mV digits resolved
///
/// `"12345"` formats to `"12.345"`, `"5"` to `"0.005"`.
pub fn voltage_default(raw: &str) -> String {
    let (whole, frac) = split_milli(leading_digits(raw));
    format!("{}.{}", whole, frac)
}

/// Voltage in custom-template precision: two decimals, the mV digit dropped
///
/// `"12345"` formats to `"12.34"`, `"5"` to `"0.00"`.
pub fn voltage_custom(raw: &str) -> String {
    let (whole, frac) = split_milli(leading_digits(raw));
    format!("{}.{}", whole, &frac[..2])
}

/// Current in default precision: the raw milliamp token digit for digit,
/// sign preserved
pub fn current_default(raw: &str) -> String {
    numeric_span(raw).to_string()
}

/// Current in custom-template precision: amps with one decimal at 100 mA
/// resolution, sign preserved
///
/// `"12345"` formats to `"12.3"`, `"-1234"` to `"-1.2"`, `"5"` to `"0.0"`.
pub fn current_custom(raw: &str) -> String {
    let (whole, frac) = split_milli(leading_digits(raw));
    let sign = if is_negative(raw) { "-" } else { "" };
    format!("{}{}.{}", sign, whole, &frac[..1])
}

/// Power in default precision: the raw watt token with a fixed `.0`
pub fn power_default(raw: &str) -> String {
    format!("{}.0", leading_digits(raw))
}

/// Power in custom-template precision: padded to two whole digits, fixed `.0`
///
/// `"45"` formats to `"45.0"`, `"5"` to `"05.0"`.
pub fn power_custom(raw: &str) -> String {
    let sign = if is_negative(raw) { "-" } else { "" };
    format!("{}{:0>2}.0", sign, leading_digits(raw))
}

/// Energy value: raw token (in 0.01 kWh) with a trailing `0`, yielding
/// watt-hours; used identically by default and custom output
pub fn energy_value(raw: &str) -> String {
    format!("{}0", numeric_span(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_default_five_digits() {
        assert_eq!(voltage_default("12345"), "12.345");
    }

    #[test]
    fn test_voltage_default_short_tokens_pad_left() {
        assert_eq!(voltage_default("1234"), "1.234");
        assert_eq!(voltage_default("345"), "0.345");
        assert_eq!(voltage_default("45"), "0.045");
        assert_eq!(voltage_default("5"), "0.005");
    }

    #[test]
    fn test_voltage_custom_drops_millivolt_digit() {
        assert_eq!(voltage_custom("12345"), "12.34");
        assert_eq!(voltage_custom("5"), "0.00");
    }

    #[test]
    fn test_voltage_ignores_trailing_garbage() {
        assert_eq!(voltage_default("12345abc"), "12.345");
    }

    #[test]
    fn test_current_default_is_verbatim_with_sign() {
        assert_eq!(current_default("-1500"), "-1500");
        assert_eq!(current_default("420"), "420");
    }

    #[test]
    fn test_current_custom_scales_to_amps() {
        assert_eq!(current_custom("12345"), "12.3");
        assert_eq!(current_custom("-1234"), "-1.2");
        assert_eq!(current_custom("5"), "0.0");
    }

    #[test]
    fn test_power_formats() {
        assert_eq!(power_default("45"), "45.0");
        assert_eq!(power_default("345"), "345.0");
        assert_eq!(power_custom("45"), "45.0");
        assert_eq!(power_custom("5"), "05.0");
    }

    #[test]
    fn test_energy_appends_trailing_zero() {
        assert_eq!(energy_value("520"), "5200");
        assert_eq!(energy_value("0"), "00");
    }

    #[test]
    fn test_runaway_tokens_are_bounded() {
        assert_eq!(current_default("123456789"), "1234567");
        assert_eq!(voltage_default("123456789"), "1234.567");
    }
}
