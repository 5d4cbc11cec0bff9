//! Accelerometer Monitor - Main Entry Point
//!
//! Wires a mock ADXL345 endpoint, a simulated interrupt line and a bound
//! device together, then walks the read surface the way the original
//! userspace exerciser did: select each axis in turn, read a burst of
//! samples, print the decoded values, finish with an all-axes burst.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use adxl345_driver::{Device, DriverConfig, DriverError};
use i2c_bus::{BusEndpoint, InterruptLine, MockAdxl345};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Samples the simulated hardware buffers between interrupts (the
/// watermark threshold armed in FIFO_CTL)
const WATERMARK: usize = 8;

/// Reads taken per selected axis
const READS_PER_AXIS: usize = 10;

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> Result<(), DriverError> {
    init_logging();

    info!("=== ADXL345 Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let mock = Arc::new(MockAdxl345::with_seed(42));
    let irq = Arc::new(InterruptLine::new());
    let device = Device::bind(
        Arc::clone(&mock) as Arc<dyn BusEndpoint>,
        Arc::clone(&irq),
        DriverConfig::default(),
    )?;

    // Simulated watermark interrupts: buffer a batch in the mock's
    // hardware FIFO, then assert the line.
    let running = Arc::new(AtomicBool::new(true));
    let ticker = {
        let mock = Arc::clone(&mock);
        let irq = Arc::clone(&irq);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                mock.generate_samples(WATERMARK);
                irq.raise();
                thread::sleep(Duration::from_millis(10));
            }
        })
    };

    let axis_names = ["X", "Y", "Z"];
    for (selector, name) in axis_names.iter().enumerate() {
        device.set_axis(selector as u8)?;
        info!("reading from axis {name}");
        for _ in 0..READS_PER_AXIS {
            let mut buf = [0u8; 2];
            device.read(&mut buf)?;
            info!("{name}: {}", i16::from_le_bytes(buf));
        }
    }

    device.set_axis(3)?;
    info!("reading all axes");
    for _ in 0..READS_PER_AXIS {
        let mut buf = [0u8; 6];
        device.read(&mut buf)?;
        let x = i16::from_le_bytes([buf[0], buf[1]]);
        let y = i16::from_le_bytes([buf[2], buf[3]]);
        let z = i16::from_le_bytes([buf[4], buf[5]]);
        info!("x={x} y={y} z={z}");
    }

    running.store(false, Ordering::Relaxed);
    let _ = ticker.join();

    let stats = device.stats();
    info!(
        "drain passes: {} ({} failed), samples queued: {}, evicted: {}",
        stats.passes, stats.failed_passes, stats.samples_queued, stats.samples_evicted
    );

    device.unbind()?;
    info!("device unbound, exiting");
    Ok(())
}
