//! # Field Tokenizer & Mapper
//!
//! Splits a validated telemetry block into labeled fields and maps the
//! controller's native labels to semantic markers.

use tracing::warn;

/// Semantic classification of a telemetry field
///
/// The controller sends many more labels than these; only the ones listed
/// here are ever turned into sentences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Battery voltage, label `V`, millivolts
    BatteryVoltage,
    /// Solar panel voltage, label `VPV`, millivolts
    PanelVoltage,
    /// Battery current, label `I`, milliamps, signed
    BatteryCurrent,
    /// Solar panel power, label `PPV`, watts
    PanelPower,
    /// Lifetime energy yield, label `H19`, 0.01 kWh
    EnergyTotal,
    /// Energy yield today, label `H20`, 0.01 kWh
    EnergyToday,
    /// Energy yield yesterday, label `H22`, 0.01 kWh
    EnergyYesterday,
}

impl Marker {
    /// Map a device-native label to its marker; labels are matched exactly
    pub fn from_label(label: &str) -> Option<Self> {
        Some(match label {
            "V" => Self::BatteryVoltage,
            "VPV" => Self::PanelVoltage,
            "I" => Self::BatteryCurrent,
            "PPV" => Self::PanelPower,
            "H19" => Self::EnergyTotal,
            "H20" => Self::EnergyToday,
            "H22" => Self::EnergyYesterday,
            _ => return None,
        })
    }

    /// Field prefix character used in the default combined sentence
    pub fn field_char(&self) -> char {
        match self {
            Self::BatteryVoltage => 'U',
            Self::PanelVoltage => 'P',
            Self::BatteryCurrent => 'I',
            Self::PanelPower => 'W',
            Self::EnergyTotal => 'O',
            Self::EnergyToday => 'E',
            Self::EnergyYesterday => 'Y',
        }
    }
}

/// One extracted `(marker, raw value)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryField {
    pub marker: Marker,
    /// Raw value token as transmitted, trailing CR stripped
    pub raw: String,
}

/// Extract recognized fields from a validated block, in block order
///
/// Tokens are split on newline and tab. A token outside the recognized label
/// set is ignored; tokenization simply continues with the next token. A
/// recognized label whose value token is missing at the end of the stream
/// logs a diagnostic and skips only that field.
pub fn extract_fields(block: &[u8]) -> Vec<TelemetryField> {
    let mut fields = Vec::new();
    let mut tokens = block
        .split(|&byte| byte == b'\n' || byte == b'\t')
        .filter(|token| !token.is_empty());

    while let Some(token) = tokens.next() {
        let Ok(label) = std::str::from_utf8(token) else {
            continue;
        };
        let Some(marker) = Marker::from_label(label.trim_end_matches('\r')) else {
            continue;
        };
        match tokens.next() {
            Some(value) => fields.push(TelemetryField {
                marker,
                raw: String::from_utf8_lossy(value)
                    .trim_end_matches('\r')
                    .to_string(),
            }),
            None => warn!("Value for {:?} missing at end of block", marker),
        }
    }

    fields
}
