//! Bounded Sample Queue
//!
//! Provides the fixed-size accelerometer sample record and a bounded
//! drop-oldest ring buffer for moving samples from the interrupt-context
//! drain to blocking readers.

mod queue;

pub use queue::SampleQueue;

use serde::{Deserialize, Serialize};

/// Default queue capacity (16 samples, the reference configuration)
pub const DEFAULT_CAPACITY: usize = 16;

/// Number of bytes in one sample on the wire (three LE 16-bit words)
pub const SAMPLE_BYTES: usize = 6;

/// One accelerometer sample in raw device units, two's complement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Sample {
    /// Create a sample from explicit axis values
    pub fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode a sample from a 6-byte bus read: three little-endian
    /// 16-bit words in source order X, Y, Z.
    pub fn from_le_bytes(raw: [u8; SAMPLE_BYTES]) -> Self {
        Self {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// Encode the sample back into its 6-byte wire layout
    pub fn to_le_bytes(&self) -> [u8; SAMPLE_BYTES] {
        let x = self.x.to_le_bytes();
        let y = self.y.to_le_bytes();
        let z = self.z.to_le_bytes();
        [x[0], x[1], y[0], y[1], z[0], z[1]]
    }
}
