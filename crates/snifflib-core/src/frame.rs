//! Captured frame types.
//!
//! A "frame" here is an operationally defined unit: exactly the bytes the
//! receive FIFO held at the moment a poll observed nonzero occupancy. It
//! is not a protocol-verified packet -- at high traffic rates two
//! back-to-back transmissions can land in one frame, and nothing in this
//! layer attempts to reassemble or split them.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Maximum payload length of a single captured frame.
///
/// The receive FIFO holds 64 bytes, but the occupancy register reports
/// the count in a 7-bit field whose top value coincides with appended
/// status; in practice a single drain never exceeds 63 data bytes.
pub const MAX_FRAME_LEN: usize = 63;

/// Wall-clock format used in emitted records, e.g. `2026-08-07 14:03:59`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One drained receive-FIFO read, stamped at capture time.
///
/// Ownership transfers to the frame sink immediately after capture; the
/// driver retains nothing once the record has been emitted.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// The raw payload bytes, in FIFO order.
    pub bytes: Vec<u8>,
    /// When the drain completed.
    pub captured_at: DateTime<Local>,
}

impl CapturedFrame {
    /// Create a frame stamped with the current wall-clock time.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self::at(bytes, Local::now())
    }

    /// Create a frame with an explicit capture time.
    pub fn at(bytes: Vec<u8>, captured_at: DateTime<Local>) -> Self {
        Self { bytes, captured_at }
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The payload as an uppercase hex string, e.g. `"DEADBE"`.
    pub fn hex_payload(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02X}")).collect()
    }

    /// Render the frame as the record handed to the logging collaborator.
    pub fn record(&self) -> FrameRecord {
        FrameRecord {
            timestamp: self.captured_at.format(TIMESTAMP_FORMAT).to_string(),
            byte_length: self.len(),
            payload: self.hex_payload(),
        }
    }
}

/// The record emitted once per drained FIFO read.
///
/// This is the full interface to the downstream logging/persistence
/// collaborator -- the driver does no buffering or persistence of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameRecord {
    /// Wall-clock capture time, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Payload length in bytes (0-63).
    pub byte_length: usize,
    /// Uppercase hex-encoded payload.
    pub payload: String,
}
