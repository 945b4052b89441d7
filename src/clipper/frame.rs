//! # Frame Synchronizer
//!
//! Resynchronizes the raw bus byte stream on the fixed 5-byte preamble the
//! depth instrument sends ahead of every display refresh, then collects the
//! 6-byte payload that follows.

/// Preamble marking the start of a valid display frame
pub const PREAMBLE: [u8; 5] = [0xCE, 0x80, 0xE0, 0xF8, 0x70];

/// Number of payload bytes following the preamble
pub const PAYLOAD_LEN: usize = 6;

/// Synchronizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SyncState {
    /// Matching preamble byte `n`; any mismatch resets to `Seeking(0)`
    Seeking(usize),
    /// Preamble matched; collecting payload bytes unconditionally
    Collecting,
}

/// Incremental frame synchronizer
///
/// Bytes arrive in arbitrary-size chunks with no framing guarantee, so the
/// synchronizer keeps its progress across calls. Feed bytes one at a time
/// with [`FrameSync::push`]; a completed payload is returned once 6 bytes
/// following an exact preamble have been collected.
///
/// There is no timeout: if the upstream source never completes a preamble the
/// synchronizer stays in `Seeking` and the caller is responsible for bounding
/// its polling.
#[derive(Debug)]
pub struct FrameSync {
    state: SyncState,
    payload: [u8; PAYLOAD_LEN],
    collected: usize,
}

impl FrameSync {
    /// Create a synchronizer waiting for the start of a preamble
    pub fn new() -> Self {
        Self {
            state: SyncState::Seeking(0),
            payload: [0; PAYLOAD_LEN],
            collected: 0,
        }
    }

    /// Feed one byte from the bus
    ///
    /// # Returns
    ///
    /// * `Option<[u8; 6]>` - The completed payload once the sixth byte after
    ///   the preamble arrives, `None` otherwise
    ///
    /// A byte that breaks the preamble is dropped outright; it is not
    /// reconsidered as the start of a new preamble.
    pub fn push(&mut self, byte: u8) -> Option<[u8; PAYLOAD_LEN]> {
        match self.state {
            SyncState::Seeking(n) => {
                if byte == PREAMBLE[n] {
                    if n + 1 == PREAMBLE.len() {
                        self.state = SyncState::Collecting;
                        self.collected = 0;
                    } else {
                        self.state = SyncState::Seeking(n + 1);
                    }
                } else {
                    self.state = SyncState::Seeking(0);
                }
                None
            }
            SyncState::Collecting => {
                self.payload[self.collected] = byte;
                self.collected += 1;
                if self.collected == PAYLOAD_LEN {
                    self.state = SyncState::Seeking(0);
                    Some(self.payload)
                } else {
                    None
                }
            }
        }
    }
}

impl Default for FrameSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(sync: &mut FrameSync, bytes: &[u8]) -> Option<[u8; PAYLOAD_LEN]> {
        let mut completed = None;
        for &byte in bytes {
            if let Some(payload) = sync.push(byte) {
                completed = Some(payload);
            }
        }
        completed
    }

    #[test]
    fn test_complete_frame_in_one_chunk() {
        let mut sync = FrameSync::new();
        let payload = feed(&mut sync, &[0xCE, 0x80, 0xE0, 0xF8, 0x70, 1, 2, 3, 4, 5, 6]);
        assert_eq!(payload, Some([1, 2, 3, 4, 5, 6]));
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut sync = FrameSync::new();
        assert_eq!(feed(&mut sync, &[0xCE, 0x80, 0xE0]), None);
        assert_eq!(feed(&mut sync, &[0xF8, 0x70, 0xAA, 0xBB]), None);
        let payload = feed(&mut sync, &[0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(payload, Some([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]));
    }

    #[test]
    fn test_single_byte_deviation_resets_sync() {
        // Corrupt each preamble position in turn; none may produce a frame
        for corrupt_at in 0..PREAMBLE.len() {
            let mut stream = PREAMBLE.to_vec();
            stream[corrupt_at] ^= 0xFF;
            stream.extend_from_slice(&[0; PAYLOAD_LEN]);

            let mut sync = FrameSync::new();
            assert_eq!(feed(&mut sync, &stream), None, "corrupt position {}", corrupt_at);
        }
    }

    #[test]
    fn test_mismatch_byte_is_not_reconsidered_as_preamble_start() {
        // 0xCE in the middle of a broken preamble is dropped, so the
        // 0x80 following it must not be taken as the second preamble byte.
        let mut sync = FrameSync::new();
        feed(&mut sync, &[0xCE, 0x80, 0xCE, 0x80]);
        // A full preamble from here must still be required
        assert_eq!(feed(&mut sync, &[0xE0, 0xF8, 0x70, 0, 0, 0, 0, 0, 0]), None);
        let payload = feed(
            &mut sync,
            &[0xCE, 0x80, 0xE0, 0xF8, 0x70, 9, 8, 7, 6, 5, 4],
        );
        assert_eq!(payload, Some([9, 8, 7, 6, 5, 4]));
    }

    #[test]
    fn test_payload_bytes_collected_regardless_of_value() {
        // Preamble bytes inside the payload window are data, not sync
        let mut sync = FrameSync::new();
        let mut stream = PREAMBLE.to_vec();
        stream.extend_from_slice(&PREAMBLE);
        stream.push(0x42);
        let payload = feed(&mut sync, &stream);
        assert_eq!(payload, Some([0xCE, 0x80, 0xE0, 0xF8, 0x70, 0x42]));
    }

    #[test]
    fn test_resynchronizes_after_garbage() {
        let mut sync = FrameSync::new();
        let mut stream = vec![0x00, 0xFF, 0xCE, 0x12, 0x80];
        stream.extend_from_slice(&PREAMBLE);
        stream.extend_from_slice(&[10, 20, 30, 40, 50, 60]);
        let payload = feed(&mut sync, &stream);
        assert_eq!(payload, Some([10, 20, 30, 40, 50, 60]));
    }
}
