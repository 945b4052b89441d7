//! # Telemetry Block Reader
//!
//! Accumulates serial bytes until one complete controller transmission is
//! present, then validates its 8-bit sum checksum. Invalid blocks are
//! discarded wholesale and acquisition restarts from an empty buffer.

use bytes::BytesMut;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::error::Result;
use crate::serial::source::ByteSource;

/// Maximum bytes accumulated for one block
pub const BLOCK_CAPACITY: usize = 4000;

/// Slack kept below capacity before accepting a partial buffer
const CAPACITY_SLACK: usize = 20;

/// Literal marker text introducing the trailing checksum field
///
/// Matched without its first letter so the controller's casing does not
/// matter; the checksum byte itself follows the tab.
const CHECKSUM_MARKER: &[u8] = b"hecksum\t";

/// Read chunk size per serial poll
const READ_CHUNK: usize = 256;

/// Locate the checksum byte: the byte immediately after the marker
///
/// Returns `None` until both the marker and the byte after it are buffered.
fn checksum_offset(buf: &[u8]) -> Option<usize> {
    let marker_at = buf
        .windows(CHECKSUM_MARKER.len())
        .position(|window| window == CHECKSUM_MARKER)?;
    let offset = marker_at + CHECKSUM_MARKER.len();
    (offset < buf.len()).then_some(offset)
}

/// Wrapping 8-bit sum over a byte range
fn block_sum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &byte| acc.wrapping_add(byte))
}

/// Whether a buffered block validates: the sum of every byte up to and
/// including the checksum byte must be zero
pub fn is_valid_block(buf: &[u8]) -> bool {
    match checksum_offset(buf) {
        Some(offset) => block_sum(&buf[..=offset]) == 0,
        None => false,
    }
}

/// Acquire one checksum-valid block from the serial source
///
/// Sleeps `poll_interval` between reads to avoid busy-spinning on a slow
/// link. If the buffer approaches [`BLOCK_CAPACITY`] without the checksum
/// marker, the partial buffer is accepted for validation, which then fails
/// and triggers a retry. There is no retry bound; the physical link is
/// trusted to produce valid data eventually.
///
/// # Errors
///
/// Returns error if the serial read fails
pub async fn read_block<S: ByteSource>(source: &mut S, poll_interval: Duration) -> Result<BytesMut> {
    loop {
        let mut buf = BytesMut::with_capacity(BLOCK_CAPACITY);
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            sleep(poll_interval).await;
            let read = source.read(&mut chunk).await?;
            buf.extend_from_slice(&chunk[..read]);
            trace!("Accumulated {} block bytes", buf.len());

            if checksum_offset(&buf).is_some() || buf.len() >= BLOCK_CAPACITY - CAPACITY_SLACK {
                break;
            }
        }

        if is_valid_block(&buf) {
            return Ok(buf);
        }
        debug!("Block checksum mismatch, discarding {} bytes", buf.len());
    }
}
