//! # Depth Instrument Decoder
//!
//! Decodes the NASA Clipper depth display bus into `$SDDPT` sentences.
//!
//! The instrument drives its seven-segment LCD over a slave bus; every
//! display refresh is a fixed frame of a 5-byte preamble followed by 6
//! payload bytes encoding the lit segments. This module handles:
//! - Frame synchronization on the preamble
//! - Seven-segment digit reconstruction per display position
//! - Depth-indicator gating (frames without the DEPTH symbol are discarded)
//! - `$SDDPT` sentence assembly with XOR checksum

pub mod digits;
pub mod frame;

use tracing::{debug, trace};

use crate::error::Result;
use crate::nmea;
use crate::serial::source::BusTransfer;
use self::digits::{TENS_SEGMENT_MASKS, TENTHS_SEGMENT_MASK, UNITS_SEGMENT_MASK};
use self::frame::{FrameSync, PAYLOAD_LEN};

/// Bit flagging the DEPTH indicator symbol in payload byte 0
const DEPTH_FLAG_MASK: u8 = 0x01;

/// Bit flagging the decimal point in payload byte 3
const DECIMAL_POINT_MASK: u8 = 0x80;

/// One decoded display frame
///
/// Up to three digit characters plus decimal-point and depth-indicator
/// flags. A reading is emittable only when the indicator is present and at
/// least one digit decoded; anything else is discarded as bad data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthReading {
    /// Leftmost digit, `None` if its segment pattern matched no table row
    pub tens: Option<char>,
    /// Middle digit (before the decimal point)
    pub units: Option<char>,
    /// Rightmost digit (after the decimal point)
    pub tenths: Option<char>,
    /// Decimal point lit between units and tenths
    pub decimal_point: bool,
    /// DEPTH indicator symbol lit on the display
    pub depth_present: bool,
}

impl DepthReading {
    /// Decode a completed 6-byte frame payload
    pub fn from_payload(payload: &[u8; PAYLOAD_LEN]) -> Self {
        let (tens_hi_mask, tens_lo_mask) = TENS_SEGMENT_MASKS;
        Self {
            tens: digits::tens_digit(payload[4] & tens_hi_mask, payload[5] & tens_lo_mask),
            units: digits::units_digit(payload[0] & UNITS_SEGMENT_MASK),
            tenths: digits::tenths_digit(payload[1] & TENTHS_SEGMENT_MASK),
            decimal_point: payload[3] & DECIMAL_POINT_MASK == DECIMAL_POINT_MASK,
            depth_present: payload[0] & DEPTH_FLAG_MASK == DEPTH_FLAG_MASK,
        }
    }

    /// Whether this reading may produce a sentence
    pub fn is_emittable(&self) -> bool {
        self.depth_present
            && (self.tens.is_some() || self.units.is_some() || self.tenths.is_some())
    }

    /// Render the display text: tens, units, decimal point, tenths, in that
    /// order, skipping absent elements, with no separators
    pub fn display_text(&self) -> String {
        let mut text = String::with_capacity(4);
        if let Some(digit) = self.tens {
            text.push(digit);
        }
        if let Some(digit) = self.units {
            text.push(digit);
        }
        if self.decimal_point {
            text.push('.');
        }
        if let Some(digit) = self.tenths {
            text.push(digit);
        }
        text
    }
}

/// Decode one completed frame payload into a sentence
///
/// # Returns
///
/// * `Option<String>` - The `$SDDPT` sentence, or `None` when the frame is
///   discarded (indicator clear or no digit decoded)
pub fn decode_frame(payload: &[u8; PAYLOAD_LEN]) -> Option<String> {
    let reading = DepthReading::from_payload(payload);
    if !reading.is_emittable() {
        debug!("Bad data from depth instrument: {:?}", reading);
        return None;
    }
    Some(nmea::sentence(&format!("SDDPT,{},0.0", reading.display_text())))
}

/// Depth instrument decoder
///
/// Owns the bus handle and the synchronizer state, which persists across
/// calls so frames split over bus transfers reassemble correctly.
#[derive(Debug)]
pub struct ClipperDecoder<B: BusTransfer> {
    bus: B,
    sync: FrameSync,
}

impl<B: BusTransfer> ClipperDecoder<B> {
    /// Create a decoder over a bus transfer source
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            sync: FrameSync::new(),
        }
    }

    /// Poll the bus until one frame completes, then decode it
    ///
    /// Transfers are polled back to back with no inter-call delay; a silent
    /// bus keeps this call pending indefinitely.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(sentence))` - A valid frame produced a sentence
    /// * `Ok(None)` - A frame completed but was discarded as bad data
    ///
    /// # Errors
    ///
    /// Returns error if the bus transfer fails
    pub async fn read_sentence(&mut self) -> Result<Option<String>> {
        loop {
            let chunk = self.bus.transfer().await?;
            trace!("Bus transfer returned {} bytes", chunk.len());
            for &byte in &chunk {
                if let Some(payload) = self.sync.push(byte) {
                    return Ok(decode_frame(&payload));
                }
            }
        }
    }
}
