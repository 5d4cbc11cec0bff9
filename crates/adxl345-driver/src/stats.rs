//! Drain Diagnostics
//!
//! The interrupt handler always reports the interrupt as handled; drain
//! failures are recorded here instead of leaking into the handler's
//! return value.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters updated by the drain pass
#[derive(Debug, Default)]
pub struct DrainStats {
    passes: AtomicU64,
    failed_passes: AtomicU64,
    samples_queued: AtomicU64,
    samples_evicted: AtomicU64,
}

/// Point-in-time copy of the drain counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrainSnapshot {
    pub passes: u64,
    pub failed_passes: u64,
    pub samples_queued: u64,
    pub samples_evicted: u64,
}

impl DrainStats {
    pub(crate) fn record_pass(&self) {
        self.passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failed_pass(&self) {
        self.failed_passes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_queued(&self, count: u64) {
        self.samples_queued.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_evicted(&self) {
        self.samples_evicted.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counter values
    pub fn snapshot(&self) -> DrainSnapshot {
        DrainSnapshot {
            passes: self.passes.load(Ordering::Relaxed),
            failed_passes: self.failed_passes.load(Ordering::Relaxed),
            samples_queued: self.samples_queued.load(Ordering::Relaxed),
            samples_evicted: self.samples_evicted.load(Ordering::Relaxed),
        }
    }
}
