use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::GraphicsError;

/// Queue of device errors not yet observed by a check.
///
/// Filled by the device's uncaptured-error handler; drained by
/// [`GraphicsErrorCheck::check`]. Cloning shares the same queue.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    pending: Arc<Mutex<Vec<String>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes every uncaptured error of `device` into this sink.
    pub fn install(&self, device: &wgpu::Device) {
        let sink = self.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            sink.push(err.to_string());
        }));
    }

    pub fn push(&self, error: impl Into<String>) {
        self.lock().push(error.into());
    }

    /// Removes and returns all pending errors, oldest first.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        // A poisoned queue still holds valid strings.
        self.pending.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Labeled error check run after state-changing GPU work.
///
/// Only reports; the caller decides whether to abort or propagate via
/// [`ErrorPolicy`](crate::error::ErrorPolicy).
#[derive(Debug, Clone, Default)]
pub struct GraphicsErrorCheck {
    sink: ErrorSink,
}

impl GraphicsErrorCheck {
    pub fn new(sink: ErrorSink) -> Self {
        Self { sink }
    }

    #[inline]
    pub fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    /// Drains every pending error, logging each against `operation`.
    pub fn check(&self, operation: &str) -> Result<(), GraphicsError> {
        let errors = self.sink.drain();
        if errors.is_empty() {
            return Ok(());
        }

        for e in &errors {
            log::error!("{operation}: graphics error: {e}");
        }

        Err(GraphicsError::Api {
            operation: operation.to_string(),
            errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_check_is_ok() {
        let check = GraphicsErrorCheck::default();
        assert_eq!(check.check("noop"), Ok(()));
    }

    #[test]
    fn check_drains_all_pending_errors() {
        let sink = ErrorSink::new();
        let check = GraphicsErrorCheck::new(sink.clone());

        sink.push("invalid buffer");
        sink.push("invalid pipeline");

        let err = check.check("draw").unwrap_err();
        assert_eq!(
            err,
            GraphicsError::Api {
                operation: "draw".into(),
                errors: vec!["invalid buffer".into(), "invalid pipeline".into()],
            }
        );

        assert!(sink.is_empty());
        assert_eq!(check.check("draw"), Ok(()));
    }

    #[test]
    fn clones_share_the_queue() {
        let sink = ErrorSink::new();
        let other = sink.clone();
        other.push("lost");
        assert_eq!(sink.drain(), vec!["lost".to_string()]);
    }
}
