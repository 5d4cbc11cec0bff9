//! Driver Configuration

use serde::{Deserialize, Serialize};

/// Configuration for one device instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Capacity of the software sample queue (default: 16)
    pub queue_capacity: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            queue_capacity: sample_queue::DEFAULT_CAPACITY,
        }
    }
}
