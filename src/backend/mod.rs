//! Windowing backend abstraction.
//!
//! This module provides a trait-based abstraction over the compositor that
//! owns the live window set. The service layer only ever talks to a
//! `dyn WindowBackend`; implementations are provided for Hyprland (IPC
//! socket), an in-memory window table, and a no-op fallback.

mod detect;
mod error;
#[cfg(unix)]
pub mod hyprland;
pub mod memory;
mod noop;

pub use detect::{BackendKind, detect_backend};
pub use error::BackendError;
pub use memory::InMemoryBackend;
pub use noop::NoopBackend;

use std::fmt;

/// A frame rectangle in pixels, excluding window-manager decorations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A window actor as reported by a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendWindow {
    /// Backend-specific handle (e.g., "0x5678abcd" for Hyprland)
    pub id: String,
    /// Current frame rectangle
    pub frame: Rect,
    /// Whether the window is minimized
    pub minimized: bool,
    /// Owning process id
    pub pid: i32,
    /// Creation-order sequence, unique among live windows
    pub stable_sequence: u32,
    /// Window class, if the backend knows it
    pub wm_class: Option<String>,
    /// Reverse-domain application id, if the backend knows it
    pub app_id: Option<String>,
}

/// Trait for the compositor operations the service relies on.
///
/// Implementations must be thread-safe (Send + Sync) as the backend is
/// shared between the service and the bus object.
pub trait WindowBackend: Send + Sync {
    /// Number of active monitors.
    fn monitor_count(&self) -> Result<u32, BackendError>;

    /// All window actors, in the backend's native order.
    ///
    /// May include transient children; use [`WindowBackend::root_ancestor`]
    /// to reach the owning top-level window.
    fn windows(&self) -> Result<Vec<BackendWindow>, BackendError>;

    /// Resolve a window to its top-level ancestor (itself if it has no parent).
    fn root_ancestor(&self, window: &BackendWindow) -> Result<BackendWindow, BackendError>;

    /// Minimize a window.
    fn minimize(&self, window: &BackendWindow) -> Result<(), BackendError>;

    /// Move and resize a window's frame.
    ///
    /// The rectangle excludes decorations and is not constrained to any monitor.
    fn move_resize_frame(&self, window: &BackendWindow, frame: Rect) -> Result<(), BackendError>;

    /// Get the backend name for logging/debugging.
    fn name(&self) -> &'static str;
}

impl fmt::Debug for dyn WindowBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WindowBackend({})", self.name())
    }
}
