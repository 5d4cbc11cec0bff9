//! Mock ADXL345 Endpoint
//!
//! Simulates the accelerometer's register file for testing without
//! hardware: identity register, writable configuration registers, a FIFO
//! count register and burst sample reads, plus fault injection hooks.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::endpoint::BusEndpoint;
use crate::error::BusError;

// Register addresses the simulation responds to specially. The driver
// crate owns the canonical map (duplicated here to avoid a circular dep).
const REG_DEVID: u8 = 0x00;
const REG_FIFO_STATUS: u8 = 0x39;
const REG_DATAX0: u8 = 0x32;

/// Fixed identity value of a real ADXL345
const DEVID_VALUE: u8 = 0xE5;

/// Hardware FIFO depth; FIFO_STATUS reports at most this many entries
const HW_FIFO_DEPTH: usize = 31;

const SAMPLE_BYTES: usize = 6;

struct MockState {
    /// Writable register file
    registers: [u8; 0x40],
    /// Chronological log of (register, value) writes
    write_log: Vec<(u8, u8)>,
    /// Samples waiting in the simulated hardware FIFO
    pending: VecDeque<[u8; SAMPLE_BYTES]>,
    /// Bus operations performed so far
    ops: usize,
    /// Fail every operation after this many have succeeded
    fail_after: Option<usize>,
    /// Fail writes addressed to this register
    fail_write_reg: Option<u8>,
    /// Identity value returned for DEVID reads
    devid: u8,
    /// Seed for deterministic sample generation
    seed: u64,
    /// Samples generated so far (feeds the hash)
    generated: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            registers: [0; 0x40],
            write_log: Vec::new(),
            pending: VecDeque::new(),
            ops: 0,
            fail_after: None,
            fail_write_reg: None,
            devid: 0,
            seed: 0,
            generated: 0,
        }
    }
}

/// Mock ADXL345 sitting on a simulated bus (no hardware required)
pub struct MockAdxl345 {
    state: Mutex<MockState>,
}

impl MockAdxl345 {
    /// Create a mock device with the default seed
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a mock device generating a deterministic sample stream
    pub fn with_seed(seed: u64) -> Self {
        debug!("creating mock ADXL345 endpoint (seed {})", seed);
        let state = MockState {
            devid: DEVID_VALUE,
            seed,
            ..Default::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue explicit samples in the simulated hardware FIFO
    pub fn load_samples(&self, samples: &[(i16, i16, i16)]) {
        let mut state = self.lock();
        for &(x, y, z) in samples {
            let (xb, yb, zb) = (x.to_le_bytes(), y.to_le_bytes(), z.to_le_bytes());
            state
                .pending
                .push_back([xb[0], xb[1], yb[0], yb[1], zb[0], zb[1]]);
        }
    }

    /// Generate `count` deterministic pseudo-random samples into the
    /// simulated hardware FIFO
    pub fn generate_samples(&self, count: usize) {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut state = self.lock();
        for _ in 0..count {
            let mut hasher = DefaultHasher::new();
            state.seed.hash(&mut hasher);
            state.generated.hash(&mut hasher);
            let hash = hasher.finish();
            state.generated += 1;

            // Spread the hash over plausible raw readings (~±2g full-res)
            let x = ((hash & 0xFFF) as i16) - 2048;
            let y = (((hash >> 12) & 0xFFF) as i16) - 2048;
            let z = (((hash >> 24) & 0xFFF) as i16) - 2048;
            let (xb, yb, zb) = (x.to_le_bytes(), y.to_le_bytes(), z.to_le_bytes());
            state
                .pending
                .push_back([xb[0], xb[1], yb[0], yb[1], zb[0], zb[1]]);
        }
    }

    /// Number of samples waiting in the simulated hardware FIFO
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Chronological log of register writes
    pub fn write_log(&self) -> Vec<(u8, u8)> {
        self.lock().write_log.clone()
    }

    /// Last value written to `register`, if any write reached it
    pub fn register_value(&self, register: u8) -> u8 {
        self.lock().registers[register as usize]
    }

    /// Report a different identity value (for arming-failure tests)
    pub fn set_devid(&self, devid: u8) {
        self.lock().devid = devid;
    }

    /// Fail every write addressed to `register`
    pub fn fail_writes_to(&self, register: u8) {
        self.lock().fail_write_reg = Some(register);
    }

    /// Let the next `count` bus operations succeed, then fail all
    /// subsequent ones
    pub fn fail_after_ops(&self, count: usize) {
        self.lock().fail_after = Some(count);
    }

    /// Remove all injected faults
    pub fn clear_faults(&self) {
        let mut state = self.lock();
        state.fail_after = None;
        state.fail_write_reg = None;
    }

    fn check_op(state: &mut MockState) -> Result<(), BusError> {
        state.ops += 1;
        if let Some(limit) = state.fail_after {
            if state.ops > limit {
                return Err(BusError::FaultInjected { op: state.ops });
            }
        }
        Ok(())
    }
}

impl Default for MockAdxl345 {
    fn default() -> Self {
        Self::new()
    }
}

impl BusEndpoint for MockAdxl345 {
    fn write(&self, bytes: &[u8]) -> Result<(), BusError> {
        let mut state = self.lock();
        Self::check_op(&mut state)?;

        match *bytes {
            [register, value] => {
                if state.fail_write_reg == Some(register) {
                    return Err(BusError::Nack(register));
                }
                state.write_log.push((register, value));
                state.registers[register as usize & 0x3F] = value;
                Ok(())
            }
            // Bare address write: sets the register pointer, which the
            // write_read path re-supplies anyway.
            [_register] => Ok(()),
            _ => Err(BusError::Io(format!(
                "unsupported write of {} bytes",
                bytes.len()
            ))),
        }
    }

    fn write_read(&self, wr: &[u8], rd: &mut [u8]) -> Result<(), BusError> {
        let mut state = self.lock();
        Self::check_op(&mut state)?;

        let register = match wr.first() {
            Some(&r) => r,
            None => return Err(BusError::Io("empty write in write_read".into())),
        };
        if rd.is_empty() {
            return Err(BusError::ShortRead { wanted: 1, got: 0 });
        }

        match register {
            REG_DEVID => {
                rd[0] = state.devid;
                Ok(())
            }
            REG_FIFO_STATUS => {
                // Low 6 bits report how many entries are buffered
                rd[0] = state.pending.len().min(HW_FIFO_DEPTH) as u8;
                Ok(())
            }
            REG_DATAX0 => {
                if rd.len() < SAMPLE_BYTES {
                    return Err(BusError::ShortRead {
                        wanted: SAMPLE_BYTES,
                        got: rd.len(),
                    });
                }
                let raw = state.pending.pop_front().unwrap_or_default();
                rd[..SAMPLE_BYTES].copy_from_slice(&raw);
                Ok(())
            }
            _ => {
                rd[0] = state.registers[register as usize & 0x3F];
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_devid_read() {
        let mock = MockAdxl345::new();
        assert_eq!(mock.read_register(REG_DEVID).unwrap(), 0xE5);

        mock.set_devid(0x33);
        assert_eq!(mock.read_register(REG_DEVID).unwrap(), 0x33);
    }

    #[test]
    fn test_write_log_records_order() {
        let mock = MockAdxl345::new();
        mock.write_register(0x2C, 0x0A).unwrap();
        mock.write_register(0x2D, 0x08).unwrap();
        assert_eq!(mock.write_log(), vec![(0x2C, 0x0A), (0x2D, 0x08)]);
        assert_eq!(mock.register_value(0x2D), 0x08);
    }

    #[test]
    fn test_fifo_status_and_burst_read() {
        let mock = MockAdxl345::new();
        mock.load_samples(&[(100, -50, 3200), (1, 2, 3)]);
        assert_eq!(mock.read_register(REG_FIFO_STATUS).unwrap(), 2);

        let mut raw = [0u8; 6];
        mock.read_block(REG_DATAX0, &mut raw).unwrap();
        assert_eq!(raw, [0x64, 0x00, 0xCE, 0xFF, 0x80, 0x0C]);
        assert_eq!(mock.read_register(REG_FIFO_STATUS).unwrap(), 1);
    }

    #[test]
    fn test_fifo_count_saturates_at_hw_depth() {
        let mock = MockAdxl345::new();
        mock.generate_samples(40);
        assert_eq!(mock.read_register(REG_FIFO_STATUS).unwrap(), 31);
    }

    #[test]
    fn test_register_write_fault() {
        let mock = MockAdxl345::new();
        mock.fail_writes_to(0x31);
        assert!(matches!(
            mock.write_register(0x31, 0x00),
            Err(BusError::Nack(0x31))
        ));
        // Other registers still work
        mock.write_register(0x2C, 0x0A).unwrap();
    }

    #[test]
    fn test_fail_after_ops() {
        let mock = MockAdxl345::new();
        mock.fail_after_ops(2);
        mock.write_register(0x2C, 0x0A).unwrap();
        mock.read_register(REG_DEVID).unwrap();
        assert!(matches!(
            mock.read_register(REG_DEVID),
            Err(BusError::FaultInjected { op: 3 })
        ));

        mock.clear_faults();
        mock.read_register(REG_DEVID).unwrap();
    }

    #[test]
    fn test_short_read_on_sample_burst() {
        let mock = MockAdxl345::new();
        mock.load_samples(&[(1, 2, 3)]);
        let mut raw = [0u8; 4];
        assert!(matches!(
            mock.read_block(REG_DATAX0, &mut raw),
            Err(BusError::ShortRead { wanted: 6, got: 4 })
        ));
    }

    #[test]
    fn test_generated_samples_are_deterministic() {
        let a = MockAdxl345::with_seed(7);
        let b = MockAdxl345::with_seed(7);
        a.generate_samples(4);
        b.generate_samples(4);

        let mut raw_a = [0u8; 6];
        let mut raw_b = [0u8; 6];
        for _ in 0..4 {
            a.read_block(REG_DATAX0, &mut raw_a).unwrap();
            b.read_block(REG_DATAX0, &mut raw_b).unwrap();
            assert_eq!(raw_a, raw_b);
        }
    }
}
