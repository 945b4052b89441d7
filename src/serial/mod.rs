//! # Serial Communication Module
//!
//! Opens the charge controller's serial line with the settings the VE.Direct
//! interface expects (8N1, 19200 baud by default) and provides the byte
//! source abstractions both decoders read from.

pub mod source;

use tokio_serial::SerialPortBuilderExt;
use tracing::info;

use crate::error::{NmeaBridgeError, Result};

/// Default VE.Direct baud rate
pub const VEDIRECT_BAUD_RATE: u32 = 19_200;

/// Baud rates the interface accepts
pub const SUPPORTED_BAUD_RATES: [u32; 6] = [4800, 9600, 19200, 38400, 57600, 115200];

/// Open a serial port with 8N1 settings
///
/// # Arguments
///
/// * `path` - Device path (e.g., "/dev/ttyAMA0")
/// * `baud_rate` - Line speed, one of [`SUPPORTED_BAUD_RATES`]
///
/// # Returns
///
/// * `Result<SerialStream>` - Opened serial port
///
/// # Errors
///
/// Returns error if the port cannot be opened
pub fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
    let port = tokio_serial::new(path, baud_rate)
        .data_bits(tokio_serial::DataBits::Eight)
        .parity(tokio_serial::Parity::None)
        .stop_bits(tokio_serial::StopBits::One)
        .flow_control(tokio_serial::FlowControl::None)
        .open_native_async()
        .map_err(|e| NmeaBridgeError::Serial(format!("Failed to open {}: {}", path, e)))?;

    info!("Opened serial device {} at {} baud", path, baud_rate);
    Ok(port)
}
