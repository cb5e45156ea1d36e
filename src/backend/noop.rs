//! No-op backend for unsupported environments.

use super::{BackendError, BackendWindow, Rect, WindowBackend};

/// A backend with no monitors and no windows.
///
/// Used as a fallback when no supported compositor is detected, so the
/// service can still be registered and answer queries.
pub struct NoopBackend;

impl WindowBackend for NoopBackend {
    fn monitor_count(&self) -> Result<u32, BackendError> {
        Ok(0)
    }

    fn windows(&self) -> Result<Vec<BackendWindow>, BackendError> {
        Ok(Vec::new())
    }

    fn root_ancestor(&self, window: &BackendWindow) -> Result<BackendWindow, BackendError> {
        Ok(window.clone())
    }

    fn minimize(&self, _window: &BackendWindow) -> Result<(), BackendError> {
        Ok(())
    }

    fn move_resize_frame(&self, _window: &BackendWindow, _frame: Rect) -> Result<(), BackendError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Noop"
    }
}
