//! I2C Bus Endpoint Abstraction
//!
//! This crate provides the request/response primitive the accelerometer
//! driver talks through: a register-oriented write / write-then-read
//! endpoint, a single-slot interrupt line, and a mock ADXL345 endpoint
//! with fault injection for hardware-free testing.

mod endpoint;
mod error;
mod irq;
mod mock;

pub use endpoint::BusEndpoint;
pub use error::BusError;
pub use irq::{HandlerSlotTaken, InterruptLine};
pub use mock::MockAdxl345;
