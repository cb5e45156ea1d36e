//! Test utilities and mock factories.
//!
//! Only compiled in test builds.

use std::sync::Arc;

use crate::backend::memory::WindowSpec;
use crate::backend::{InMemoryBackend, Rect};
use crate::service::GeometryRequest;

/// Create an in-memory backend with two monitors and three windows:
///
/// 1. `firefox` (`org.mozilla.firefox`)
/// 2. `kitty` (no app id)
/// 3. `org.gnome.Nautilus` (`org.gnome.Nautilus`)
pub fn mock_backend() -> Arc<InMemoryBackend> {
    let backend = InMemoryBackend::new(2);
    let windows = [
        WindowSpec::new("firefox")
            .app_id("org.mozilla.firefox")
            .pid(1001)
            .frame(Rect::new(0, 0, 1280, 800)),
        WindowSpec::new("kitty")
            .pid(1002)
            .frame(Rect::new(100, 100, 900, 600)),
        WindowSpec::new("org.gnome.Nautilus")
            .app_id("org.gnome.Nautilus")
            .pid(1003)
            .frame(Rect::new(1920, 0, 1000, 700)),
    ];
    for spec in windows {
        backend
            .open_window(spec)
            .expect("mock windows have no parents");
    }
    Arc::new(backend)
}

/// Create a geometry request for a 640x480 frame at (50, 60).
pub fn mock_request(minimize: bool) -> GeometryRequest {
    GeometryRequest {
        x: 50,
        y: 60,
        width: 640,
        height: 480,
        minimize,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WindowBackend;

    #[test]
    fn test_mock_backend() {
        let backend = mock_backend();
        assert_eq!(backend.monitor_count().unwrap(), 2);
        let windows = backend.windows().unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[1].wm_class.as_deref(), Some("kitty"));
        assert_eq!(windows[1].app_id, None);
    }

    #[test]
    fn test_mock_request() {
        let request = mock_request(true);
        assert!(request.minimize);
        assert_eq!(request.frame(), Rect::new(50, 60, 640, 480));
    }
}
