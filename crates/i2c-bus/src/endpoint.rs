//! Register-Oriented Bus Endpoint Trait

use crate::error::BusError;

/// Abstraction over the request/response primitive a device sits behind.
///
/// The driver only ever issues two shapes of transfer: a plain write
/// (register address, optionally followed by a value) and a
/// write-then-read (register address, then a burst of response bytes).
/// Implementations must be callable from any context, including the
/// simulated interrupt context, and must not block for unbounded time.
pub trait BusEndpoint: Send + Sync {
    /// Issue a plain write of the given bytes
    fn write(&self, bytes: &[u8]) -> Result<(), BusError>;

    /// Issue a write of `wr` followed by a read filling `rd` completely
    fn write_read(&self, wr: &[u8], rd: &mut [u8]) -> Result<(), BusError>;

    /// Write a single register
    fn write_register(&self, register: u8, value: u8) -> Result<(), BusError> {
        self.write(&[register, value])
    }

    /// Read a single register
    fn read_register(&self, register: u8) -> Result<u8, BusError> {
        let mut buf = [0u8];
        self.write_read(&[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Read a burst of consecutive registers into `buf`
    fn read_block(&self, register: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.write_read(&[register], buf)
    }
}
