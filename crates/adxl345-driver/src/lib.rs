//! ADXL345 Acquisition Driver
//!
//! The data path of an ADXL345 accelerometer: an interrupt-context drain
//! that moves hardware-buffered samples into a bounded drop-oldest queue,
//! and a blocking read interface that returns those samples projected onto
//! the selected axis. Device enumeration, the wire-level bus mechanics and
//! file-node plumbing live outside this crate; the bus is reached through
//! the `i2c-bus` endpoint abstraction.

mod config;
mod device;
mod error;
mod mode;
mod stats;

pub mod regs;

pub use config::DriverConfig;
pub use device::{Device, IrqStatus};
pub use error::DriverError;
pub use mode::AxisMode;
pub use stats::{DrainSnapshot, DrainStats};
