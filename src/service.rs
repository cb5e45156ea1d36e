//! Window control operations on top of a [`WindowBackend`].
//!
//! The service is stateless: every call reads live backend state and
//! discards it when it returns.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::backend::{BackendError, BackendWindow, Rect, WindowBackend};

/// Snapshot of one top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    /// Frame rectangle, excluding decorations
    pub geometry: Rect,
    pub minimized: bool,
    pub process_id: i32,
    /// Creation-order sequence, unique among live windows
    pub stable_sequence: u32,
    /// Window class, empty if unknown
    pub window_class: String,
    /// Reverse-domain application id, empty if unknown
    pub app_id: String,
}

impl WindowInfo {
    /// Build a snapshot, normalizing absent strings to empty.
    pub fn from_backend(window: BackendWindow) -> Self {
        Self {
            geometry: window.frame,
            minimized: window.minimized,
            process_id: window.pid,
            stable_sequence: window.stable_sequence,
            window_class: window.wm_class.unwrap_or_default(),
            app_id: window.app_id.unwrap_or_default(),
        }
    }
}

/// Desired frame for a window, and whether to minimize it first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometryRequest {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub minimize: bool,
}

impl GeometryRequest {
    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The window-control service.
#[derive(Debug, Clone)]
pub struct WindowControlService {
    backend: Arc<dyn WindowBackend>,
}

impl WindowControlService {
    pub fn new(backend: Arc<dyn WindowBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Number of active monitors, as reported by the backend.
    pub fn monitor_count(&self) -> Result<u32, BackendError> {
        self.backend.monitor_count()
    }

    /// All live top-level windows, in the backend's enumeration order.
    pub fn list_windows(&self) -> Result<Vec<WindowInfo>, BackendError> {
        let windows: Vec<WindowInfo> = self
            .top_level_windows()?
            .into_iter()
            .map(WindowInfo::from_backend)
            .collect();
        debug!(count = windows.len(), "Listed windows");
        Ok(windows)
    }

    /// Apply `request` to the newest window whose class is exactly `window_class`.
    ///
    /// Returns `Ok(false)` without touching any window when nothing matches.
    /// When `request.minimize` is set the window is minimized before the
    /// move-resize, which is always issued. The resulting frame is not checked:
    /// backends may silently ignore moves of fullscreen windows.
    pub fn set_window_geometry(
        &self,
        window_class: &str,
        request: GeometryRequest,
    ) -> Result<bool, BackendError> {
        let target = self
            .top_level_windows()?
            .into_iter()
            .filter(|w| w.wm_class.as_deref().unwrap_or_default() == window_class)
            .max_by_key(|w| w.stable_sequence);

        let Some(window) = target else {
            debug!(window_class, "No window matches class");
            return Ok(false);
        };

        debug!(
            window_class,
            stable_sequence = window.stable_sequence,
            ?request,
            "Applying window geometry"
        );

        if request.minimize {
            self.backend.minimize(&window)?;
        }
        self.backend.move_resize_frame(&window, request.frame())?;

        Ok(true)
    }

    /// Window actors resolved to their root ancestors, one entry per root.
    fn top_level_windows(&self) -> Result<Vec<BackendWindow>, BackendError> {
        let mut seen = HashSet::new();
        let mut roots = Vec::new();

        for window in self.backend.windows()? {
            let root = self.backend.root_ancestor(&window)?;
            if seen.insert(root.stable_sequence) {
                roots.push(root);
            }
        }

        Ok(roots)
    }
}
