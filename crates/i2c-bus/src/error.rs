//! Bus Error Types

use thiserror::Error;

/// Errors that can occur during a bus request/response exchange
#[derive(Debug, Clone, Error)]
pub enum BusError {
    /// Device did not acknowledge the transfer
    #[error("no acknowledge for register {0:#04x}")]
    Nack(u8),

    /// Transport-level I/O failure
    #[error("bus I/O error: {0}")]
    Io(String),

    /// Device returned fewer bytes than requested
    #[error("short read: wanted {wanted} bytes, got {got}")]
    ShortRead { wanted: usize, got: usize },

    /// Injected fault (test endpoints only)
    #[error("injected fault at bus operation {op}")]
    FaultInjected { op: usize },
}

impl From<std::io::Error> for BusError {
    fn from(err: std::io::Error) -> Self {
        BusError::Io(err.to_string())
    }
}
