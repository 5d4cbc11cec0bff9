//! Interrupt Line Registration

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::debug;

type Handler = Arc<dyn Fn() + Send + Sync>;

/// Registration failed because the line already has a handler
#[derive(Debug, Clone, Error)]
#[error("interrupt line already has a handler registered")]
pub struct HandlerSlotTaken;

/// A single-slot interrupt line.
///
/// The host (or a test) raises the line; whatever handler is currently
/// registered runs synchronously in the raiser's context, which is how
/// the simulated interrupt context is established. At most one handler
/// can be registered at a time.
#[derive(Default)]
pub struct InterruptLine {
    slot: Mutex<Option<Handler>>,
}

impl InterruptLine {
    /// Create an unclaimed interrupt line
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`; fails if the slot is occupied
    pub fn register(&self, handler: Handler) -> Result<(), HandlerSlotTaken> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(HandlerSlotTaken);
        }
        debug!("interrupt handler registered");
        *slot = Some(handler);
        Ok(())
    }

    /// Remove the current handler, if any
    pub fn unregister(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            debug!("interrupt handler unregistered");
        }
    }

    /// Whether a handler is currently registered
    pub fn is_registered(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Assert the line once: run the registered handler in the calling
    /// context. Returns `false` if no handler was registered.
    pub fn raise(&self) -> bool {
        let handler = {
            let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
            slot.clone()
        };
        match handler {
            Some(h) => {
                h();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_raise_runs_handler() {
        let line = InterruptLine::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits2 = Arc::clone(&hits);
        line.register(Arc::new(move || {
            hits2.fetch_add(1, Ordering::SeqCst);
        }))
        .unwrap();

        assert!(line.raise());
        assert!(line.raise());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_single_slot() {
        let line = InterruptLine::new();
        line.register(Arc::new(|| {})).unwrap();
        assert!(line.register(Arc::new(|| {})).is_err());

        line.unregister();
        assert!(!line.is_registered());
        assert!(line.register(Arc::new(|| {})).is_ok());
    }

    #[test]
    fn test_raise_without_handler() {
        let line = InterruptLine::new();
        assert!(!line.raise());
    }
}
