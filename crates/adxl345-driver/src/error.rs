//! Driver Error Types

use i2c_bus::{BusError, HandlerSlotTaken};
use thiserror::Error;

/// Errors surfaced by the driver's public calls
#[derive(Debug, Error)]
pub enum DriverError {
    /// A bus request/response exchange failed
    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    /// DEVID did not match the expected identity value
    #[error("unexpected identity register value {devid:#04x}")]
    InvalidDevice { devid: u8 },

    /// A blocked read was cancelled before data arrived
    #[error("read interrupted before data arrived")]
    Interrupted,

    /// Caller passed a value outside the accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The interrupt line already had a handler at bind time
    #[error(transparent)]
    HandlerSlotTaken(#[from] HandlerSlotTaken),
}
