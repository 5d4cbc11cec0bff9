//! Axis-Selection Mode

use std::sync::atomic::{AtomicU8, Ordering};

use sample_queue::Sample;
use serde::{Deserialize, Serialize};

/// Which part of a popped sample a read call returns.
///
/// The raw selector values 0..=3 are the control-surface encoding; `All`
/// is settable like the single-axis modes and is also the initial value
/// of a freshly bound device (a read issued before any `set_axis` call
/// projects all three axes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum AxisMode {
    X = 0,
    Y = 1,
    Z = 2,
    #[default]
    All = 3,
}

impl AxisMode {
    /// Decode a control-surface selector; `None` for values outside 0..=3
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(AxisMode::X),
            1 => Some(AxisMode::Y),
            2 => Some(AxisMode::Z),
            3 => Some(AxisMode::All),
            _ => None,
        }
    }

    /// Number of bytes a read returns in this mode
    pub fn projected_len(&self) -> usize {
        match self {
            AxisMode::X | AxisMode::Y | AxisMode::Z => 2,
            AxisMode::All => 6,
        }
    }

    /// Write the projection of `sample` into `out` and return the byte
    /// count. `out` must be at least `projected_len()` bytes.
    pub fn project(&self, sample: &Sample, out: &mut [u8]) -> usize {
        match self {
            AxisMode::X => out[..2].copy_from_slice(&sample.x.to_le_bytes()),
            AxisMode::Y => out[..2].copy_from_slice(&sample.y.to_le_bytes()),
            AxisMode::Z => out[..2].copy_from_slice(&sample.z.to_le_bytes()),
            AxisMode::All => out[..6].copy_from_slice(&sample.to_le_bytes()),
        }
        self.projected_len()
    }
}

/// Atomically shared mode cell: written by the control call, read by the
/// consumer at pop time.
pub(crate) struct AxisCell(AtomicU8);

impl AxisCell {
    pub(crate) fn new(mode: AxisMode) -> Self {
        Self(AtomicU8::new(mode as u8))
    }

    pub(crate) fn load(&self) -> AxisMode {
        // The cell only ever holds values stored from a valid AxisMode
        AxisMode::from_raw(self.0.load(Ordering::Acquire)).unwrap_or(AxisMode::All)
    }

    pub(crate) fn store(&self, mode: AxisMode) {
        self.0.store(mode as u8, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_decoding() {
        assert_eq!(AxisMode::from_raw(0), Some(AxisMode::X));
        assert_eq!(AxisMode::from_raw(1), Some(AxisMode::Y));
        assert_eq!(AxisMode::from_raw(2), Some(AxisMode::Z));
        assert_eq!(AxisMode::from_raw(3), Some(AxisMode::All));
        assert_eq!(AxisMode::from_raw(4), None);
        assert_eq!(AxisMode::from_raw(0xFF), None);
    }

    #[test]
    fn test_projection_law() {
        let sample = Sample::new(100, -50, 3200);
        let mut out = [0u8; 6];

        assert_eq!(AxisMode::X.project(&sample, &mut out), 2);
        assert_eq!(&out[..2], &100i16.to_le_bytes());

        assert_eq!(AxisMode::Y.project(&sample, &mut out), 2);
        assert_eq!(&out[..2], &(-50i16).to_le_bytes());

        assert_eq!(AxisMode::Z.project(&sample, &mut out), 2);
        assert_eq!(&out[..2], &3200i16.to_le_bytes());

        assert_eq!(AxisMode::All.project(&sample, &mut out), 6);
        assert_eq!(Sample::from_le_bytes(out), sample);
    }

    #[test]
    fn test_cell_round_trip() {
        let cell = AxisCell::new(AxisMode::default());
        assert_eq!(cell.load(), AxisMode::All);
        cell.store(AxisMode::Y);
        assert_eq!(cell.load(), AxisMode::Y);
    }
}
