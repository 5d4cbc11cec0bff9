//! ADXL345 register map and arming protocol constants

/// Identity register (read-only)
pub const DEVID: u8 = 0x00;
/// Output data rate / power mode
pub const BW_RATE: u8 = 0x2C;
/// Measurement / standby control
pub const POWER_CTL: u8 = 0x2D;
/// Interrupt source enable mask
pub const INT_ENABLE: u8 = 0x2E;
/// Resolution and range format
pub const DATA_FORMAT: u8 = 0x31;
/// First of six data registers (x, y, z as LE 16-bit words)
pub const DATAX0: u8 = 0x32;
/// FIFO operating mode and watermark threshold
pub const FIFO_CTL: u8 = 0x38;
/// FIFO entry count (read-only, low 6 bits)
pub const FIFO_STATUS: u8 = 0x39;

/// Fixed value every ADXL345 reports from DEVID
pub const DEVID_EXPECTED: u8 = 0xE5;

/// 100 Hz output rate, normal power
pub const BW_RATE_100HZ: u8 = 0x0A;
/// Enable the watermark interrupt source
pub const INT_ENABLE_WATERMARK: u8 = 0x02;
/// Default full-resolution/range format
pub const DATA_FORMAT_DEFAULT: u8 = 0x00;
/// Stream mode, watermark threshold in the low bits
pub const FIFO_CTL_STREAM: u8 = 0x54;
/// Measurement mode on
pub const POWER_CTL_MEASURE: u8 = 0x08;
/// Standby
pub const POWER_CTL_STANDBY: u8 = 0x00;

/// Entries D5-D0 of FIFO_STATUS report how many samples are buffered
pub const FIFO_COUNT_MASK: u8 = 0x3F;

/// Register writes that arm the device, in the required order. DEVID is
/// checked separately before this sequence runs; POWER_CTL must come last.
pub const ARMING_SEQUENCE: [(u8, u8); 5] = [
    (BW_RATE, BW_RATE_100HZ),
    (INT_ENABLE, INT_ENABLE_WATERMARK),
    (DATA_FORMAT, DATA_FORMAT_DEFAULT),
    (FIFO_CTL, FIFO_CTL_STREAM),
    (POWER_CTL, POWER_CTL_MEASURE),
];
