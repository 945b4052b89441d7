//! # Charge Controller Decoder
//!
//! Decodes the Victron VE.Direct text stream into NMEA 0183 sentences.
//!
//! The controller transmits labeled key/value blocks terminated by a
//! checksum field. This module handles:
//! - Block acquisition and 8-bit sum validation
//! - Label-to-marker mapping and field extraction
//! - Rotation over configured output kinds, one sentence per decode call
//! - Fixed-decimal value formatting per output kind
//!
//! Unlike the depth sentences, charge-controller sentences carry no
//! checksum; they are terminated by CR/LF only.

pub mod block;
pub mod fields;
pub mod format;
pub mod rotation;

use std::time::Duration;
use tracing::debug;

use crate::error::Result;
use crate::nmea::SENTENCE_TERMINATOR;
use crate::serial::source::ByteSource;
use self::fields::{Marker, TelemetryField};
use self::rotation::{OutputKind, RotationState, SentenceTemplates};

/// Default combined sentence type
const DEFAULT_SENTENCE_TYPE: &str = "$IIXDR";

/// Transducer index suffix used in default-sentence fields
const TRANSDUCER_ID: &str = "U1";

/// Shortest sentence accepted from one decode pass; anything shorter is
/// treated as empty or truncated output and the whole acquisition retried
const MIN_SENTENCE_LEN: usize = 10;

/// Charge controller decoder
///
/// Each instance owns its serial source, template configuration and rotation
/// cursor; the cursor lives as long as the decoder and is never reset
/// mid-stream.
#[derive(Debug)]
pub struct VictronDecoder<S: ByteSource> {
    source: S,
    templates: SentenceTemplates,
    rotation: RotationState,
    poll_interval: Duration,
}

impl<S: ByteSource> VictronDecoder<S> {
    /// Create a decoder over a serial source
    ///
    /// # Arguments
    ///
    /// * `source` - Raw byte stream from the controller's serial line
    /// * `templates` - Per-marker custom sentence templates
    /// * `poll_interval` - Sleep between serial reads while accumulating
    pub fn new(source: S, templates: SentenceTemplates, poll_interval: Duration) -> Self {
        Self {
            source,
            templates,
            rotation: RotationState::new(),
            poll_interval,
        }
    }

    /// Acquire blocks until one yields a sentence
    ///
    /// Each pass acquires a checksum-valid block, advances the rotation
    /// cursor by one enabled kind and formats the corresponding sentence.
    /// A pass producing fewer than [`MIN_SENTENCE_LEN`] characters (the
    /// selected marker was absent from the block, or the block was empty)
    /// retries the entire acquisition; retrying re-advances the cursor so a
    /// marker the controller never transmits cannot stall the decoder.
    ///
    /// # Errors
    ///
    /// Returns error if the serial read fails
    pub async fn read_sentence(&mut self) -> Result<String> {
        loop {
            let raw_block = block::read_block(&mut self.source, self.poll_interval).await?;
            let extracted = fields::extract_fields(&raw_block);
            let kind = self.rotation.advance(&self.templates);
            debug!("Selected output kind {:?}, {} fields", kind, extracted.len());

            let sentence = match kind {
                OutputKind::Default => format_default(&extracted),
                OutputKind::Custom(marker) => {
                    format_custom(marker, &extracted, &self.templates)
                }
            };

            if sentence.len() < MIN_SENTENCE_LEN {
                debug!("Undersized sentence ({} chars), retrying", sentence.len());
                continue;
            }
            return Ok(sentence);
        }
    }
}

/// Render one field of the default combined sentence
fn default_field(field: &TelemetryField) -> String {
    let prefix = field.marker.field_char();
    match field.marker {
        Marker::BatteryVoltage | Marker::PanelVoltage => format!(
            ",{},{},V,{}",
            prefix,
            format::voltage_default(&field.raw),
            TRANSDUCER_ID
        ),
        Marker::BatteryCurrent => format!(
            ",{},{},mA,{}",
            prefix,
            format::current_default(&field.raw),
            TRANSDUCER_ID
        ),
        Marker::PanelPower => format!(
            ",{},{},W,{}",
            prefix,
            format::power_default(&field.raw),
            TRANSDUCER_ID
        ),
        Marker::EnergyTotal | Marker::EnergyToday | Marker::EnergyYesterday => format!(
            ",{},{},Wh,{}",
            prefix,
            format::energy_value(&field.raw),
            TRANSDUCER_ID
        ),
    }
}

/// Build the combined default sentence covering every field in block order
///
/// The sentence type is written once, ahead of the first field; a block
/// without recognized fields yields only the terminator, which the caller
/// rejects as undersized.
fn format_default(extracted: &[TelemetryField]) -> String {
    let mut sentence = String::new();
    for field in extracted {
        if sentence.is_empty() {
            sentence.push_str(DEFAULT_SENTENCE_TYPE);
        }
        sentence.push_str(&default_field(field));
    }
    sentence.push_str(SENTENCE_TERMINATOR);
    sentence
}

/// Build one custom-template sentence for the selected marker
///
/// Uses the first matching field in the block. Energy sentences always
/// render the unit `Wh` regardless of the configured unit character.
fn format_custom(
    marker: Marker,
    extracted: &[TelemetryField],
    templates: &SentenceTemplates,
) -> String {
    let Some(template) = templates.get(marker) else {
        // Rotation only selects configured markers; treat as absent
        return SENTENCE_TERMINATOR.to_string();
    };
    let Some(field) = extracted.iter().find(|field| field.marker == marker) else {
        return SENTENCE_TERMINATOR.to_string();
    };

    let body = match marker {
        Marker::BatteryVoltage | Marker::PanelVoltage => format!(
            "{},{},{}",
            template.template,
            format::voltage_custom(&field.raw),
            template.unit
        ),
        Marker::BatteryCurrent => format!(
            "{},{},{}",
            template.template,
            format::current_custom(&field.raw),
            template.unit
        ),
        Marker::PanelPower => format!(
            "{},{},{}",
            template.template,
            format::power_custom(&field.raw),
            template.unit
        ),
        Marker::EnergyTotal | Marker::EnergyToday | Marker::EnergyYesterday => format!(
            "{},{},Wh",
            template.template,
            format::energy_value(&field.raw)
        ),
    };
    format!("{}{}", body, SENTENCE_TERMINATOR)
}
