//! Device Instance: Arming, Drain Pass and Blocking Reads

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};

use i2c_bus::{BusEndpoint, InterruptLine};
use sample_queue::{Sample, SampleQueue, SAMPLE_BYTES};
use tracing::{debug, info, warn};

use crate::config::DriverConfig;
use crate::error::DriverError;
use crate::mode::{AxisCell, AxisMode};
use crate::regs;
use crate::stats::{DrainSnapshot, DrainStats};

/// Outcome reported to the interrupt dispatcher.
///
/// Always `Handled`: the line must never be left unacknowledged, so drain
/// failures are logged and counted instead of propagating here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrqStatus {
    Handled,
}

/// State shared between the drain pass and readers, guarded by one lock.
/// Every critical section is O(1), so the interrupt-context producer's
/// hold time is bounded even with readers contending.
struct Shared {
    queue: SampleQueue,
    shutdown: bool,
}

/// One bound accelerometer.
///
/// Owns the sample queue and the per-device wake object; holds references
/// (not ownership) to the bus endpoint and the interrupt line. Created by
/// [`Device::bind`], torn down by [`Device::unbind`].
pub struct Device {
    endpoint: Arc<dyn BusEndpoint>,
    irq: Arc<InterruptLine>,
    shared: Mutex<Shared>,
    /// Wakes readers of this device only when its queue gains data
    data_ready: Condvar,
    mode: AxisCell,
    stats: DrainStats,
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device").finish_non_exhaustive()
    }
}

impl Device {
    /// Bind a device: allocate the instance, claim the interrupt line,
    /// then run the arming protocol. Any failure unwinds fully; no
    /// half-armed device is ever reachable.
    pub fn bind(
        endpoint: Arc<dyn BusEndpoint>,
        irq: Arc<InterruptLine>,
        config: DriverConfig,
    ) -> Result<Arc<Self>, DriverError> {
        info!(
            "binding ADXL345 device (queue capacity {})",
            config.queue_capacity
        );

        let device = Arc::new(Self {
            endpoint,
            irq,
            shared: Mutex::new(Shared {
                queue: SampleQueue::new(config.queue_capacity),
                shutdown: false,
            }),
            data_ready: Condvar::new(),
            mode: AxisCell::new(AxisMode::default()),
            stats: DrainStats::default(),
        });

        // The handler holds a weak reference so an unbound-but-leaked
        // registration can never keep the device alive.
        let weak: Weak<Device> = Arc::downgrade(&device);
        device.irq.register(Arc::new(move || {
            if let Some(device) = weak.upgrade() {
                device.handle_interrupt();
            }
        }))?;

        if let Err(err) = device.arm() {
            warn!("arming failed, unwinding bind: {err}");
            device.irq.unregister();
            return Err(err);
        }

        info!("ADXL345 armed");
        Ok(device)
    }

    /// Run the arming protocol: identity check, then the fixed register
    /// sequence ending in measurement mode. Order matters; each step must
    /// succeed before the next runs.
    fn arm(&self) -> Result<(), DriverError> {
        let devid = self.endpoint.read_register(regs::DEVID)?;
        if devid != regs::DEVID_EXPECTED {
            return Err(DriverError::InvalidDevice { devid });
        }
        for (register, value) in regs::ARMING_SEQUENCE {
            self.endpoint.write_register(register, value)?;
        }
        Ok(())
    }

    /// Entry point for one interrupt assertion.
    ///
    /// Runs a drain pass and always reports the interrupt handled; a
    /// failed drain is logged and counted in [`DrainStats`], never
    /// surfaced to the dispatcher.
    pub fn handle_interrupt(&self) -> IrqStatus {
        self.stats.record_pass();
        match self.drain() {
            Ok(queued) => debug!("drain pass queued {queued} samples"),
            Err(err) => {
                self.stats.record_failed_pass();
                warn!("drain pass aborted: {err}");
            }
        }
        IrqStatus::Handled
    }

    /// One drain pass: read the hardware FIFO count, pull that many
    /// samples over the bus, queue them, wake readers.
    ///
    /// The first bus failure stops the pass; samples already queued stay
    /// queued and readers are still woken for them. Never sleeps.
    fn drain(&self) -> Result<usize, DriverError> {
        let status = self.endpoint.read_register(regs::FIFO_STATUS)?;
        let pending = (status & regs::FIFO_COUNT_MASK) as usize;

        let mut queued = 0usize;
        let mut failure = None;
        for _ in 0..pending {
            let mut raw = [0u8; SAMPLE_BYTES];
            if let Err(err) = self.endpoint.read_block(regs::DATAX0, &mut raw) {
                failure = Some(err);
                break;
            }
            let sample = Sample::from_le_bytes(raw);
            let evicted = self.lock_shared().queue.push(sample);
            if evicted.is_some() {
                self.stats.record_evicted();
            }
            queued += 1;
        }

        if queued > 0 {
            self.stats.record_queued(queued as u64);
            self.data_ready.notify_all();
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(queued),
        }
    }

    /// Blocking read: wait for a sample, pop the oldest one, and return
    /// its projection under the current axis mode.
    ///
    /// Blocks cooperatively until data arrives or the device is shut
    /// down (then [`DriverError::Interrupted`], nothing consumed). A
    /// destination shorter than the projection is rejected without
    /// consuming a sample. Overlapping reads each pop their own sample.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, DriverError> {
        let mut shared = self.lock_shared();
        loop {
            if shared.shutdown {
                return Err(DriverError::Interrupted);
            }
            if !shared.queue.is_empty() {
                // Mode is sampled at pop time, not at call time
                let mode = self.mode.load();
                if buf.len() < mode.projected_len() {
                    return Err(DriverError::InvalidArgument(
                        "destination buffer shorter than the axis projection",
                    ));
                }
                if let Some(sample) = shared.queue.pop() {
                    drop(shared);
                    return Ok(mode.project(&sample, buf));
                }
            }
            shared = self
                .data_ready
                .wait(shared)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Control call: select the axis projection for subsequent reads.
    ///
    /// Accepts exactly 0=X, 1=Y, 2=Z, 3=All. Anything else is
    /// `InvalidArgument` and leaves the previous mode in place.
    pub fn set_axis(&self, raw: u8) -> Result<(), DriverError> {
        let mode = AxisMode::from_raw(raw)
            .ok_or(DriverError::InvalidArgument("axis selector out of range"))?;
        self.set_mode(mode);
        Ok(())
    }

    /// Typed variant of [`Device::set_axis`]
    pub fn set_mode(&self, mode: AxisMode) {
        debug!("axis mode set to {mode:?}");
        self.mode.store(mode);
    }

    /// Currently selected axis mode
    pub fn mode(&self) -> AxisMode {
        self.mode.load()
    }

    /// Number of samples currently queued
    pub fn queued(&self) -> usize {
        self.lock_shared().queue.len()
    }

    /// Drain pass diagnostics
    pub fn stats(&self) -> DrainSnapshot {
        self.stats.snapshot()
    }

    /// Cancel all blocked readers; they return [`DriverError::Interrupted`].
    pub fn shutdown(&self) {
        self.lock_shared().shutdown = true;
        self.data_ready.notify_all();
    }

    /// Unbind the device: standby the hardware, release the interrupt
    /// line, cancel blocked readers and discard queued samples.
    ///
    /// Teardown always completes; a failed standby write is reported
    /// after the software side is released.
    pub fn unbind(&self) -> Result<(), DriverError> {
        info!("unbinding ADXL345 device");
        let standby = self
            .endpoint
            .write_register(regs::POWER_CTL, regs::POWER_CTL_STANDBY);

        self.irq.unregister();
        {
            let mut shared = self.lock_shared();
            shared.shutdown = true;
            shared.queue.clear();
        }
        self.data_ready.notify_all();

        standby.map_err(DriverError::from)
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
