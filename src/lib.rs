//! # NMEA Bridge Library
//!
//! Translates proprietary marine instrument telemetry into NMEA 0183
//! sentences.
//!
//! Two decoders are provided:
//! - [`clipper`]: reconstructs seven-segment depth readings from the NASA
//!   Clipper display bus and emits `$SDDPT` sentences
//! - [`victron`]: parses the Victron VE.Direct labeled telemetry stream and
//!   reformats selected fields into configurable sentences

pub mod clipper;
pub mod config;
pub mod error;
pub mod nmea;
pub mod serial;
pub mod victron;
