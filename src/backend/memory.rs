//! In-memory backend holding a mutable window table.
//!
//! Useful for running the service without a compositor and as the test
//! double for the service layer: every mutation is recorded in a call
//! journal that tests can inspect.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use tracing::debug;

use super::{BackendError, BackendWindow, Rect, WindowBackend};

/// A mutation issued against the in-memory backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    Minimize(u32),
    MoveResize(u32, Rect),
}

/// Description of a window to open.
///
/// Also the shape of a `[[windows]]` entry in a fixture file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub class: Option<String>,
    pub app_id: Option<String>,
    pub pid: i32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub minimized: bool,
    /// Stable sequence of the window this one is transient for.
    pub parent: Option<u32>,
}

impl WindowSpec {
    pub fn new(class: &str) -> Self {
        Self {
            class: Some(class.to_string()),
            width: 800,
            height: 600,
            ..Self::default()
        }
    }

    pub fn app_id(mut self, app_id: &str) -> Self {
        self.app_id = Some(app_id.to_string());
        self
    }

    pub fn pid(mut self, pid: i32) -> Self {
        self.pid = pid;
        self
    }

    pub fn frame(mut self, frame: Rect) -> Self {
        self.x = frame.x;
        self.y = frame.y;
        self.width = frame.width;
        self.height = frame.height;
        self
    }

    pub fn transient_for(mut self, parent: u32) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// Window table loaded from a TOML fixture.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub monitors: u32,
    pub windows: Vec<WindowSpec>,
}

impl Default for Fixture {
    fn default() -> Self {
        Self {
            monitors: 1,
            windows: Vec::new(),
        }
    }
}

struct MemoryWindow {
    window: BackendWindow,
    parent: Option<u32>,
}

struct State {
    monitors: u32,
    windows: Vec<MemoryWindow>,
    next_sequence: u32,
    calls: Vec<BackendCall>,
}

impl State {
    fn find(&self, sequence: u32) -> Option<&MemoryWindow> {
        self.windows
            .iter()
            .find(|w| w.window.stable_sequence == sequence)
    }

    fn find_mut(&mut self, sequence: u32) -> Option<&mut MemoryWindow> {
        self.windows
            .iter_mut()
            .find(|w| w.window.stable_sequence == sequence)
    }
}

/// Backend whose windows live in process memory.
///
/// Stable sequences start at 1 and come from a counter that never goes
/// backwards, so they are unique and never reused.
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    /// Create an empty backend with the given number of monitors.
    pub fn new(monitors: u32) -> Self {
        Self {
            state: Mutex::new(State {
                monitors,
                windows: Vec::new(),
                next_sequence: 1,
                calls: Vec::new(),
            }),
        }
    }

    /// Build a backend from a parsed fixture.
    ///
    /// Windows are opened in file order, so the Nth entry gets sequence N and
    /// `parent` refers to an earlier entry by that number.
    pub fn from_fixture(fixture: Fixture) -> Result<Self, BackendError> {
        let backend = Self::new(fixture.monitors);
        for spec in fixture.windows {
            backend
                .open_window(spec)
                .map_err(|e| BackendError::Fixture(e.to_string()))?;
        }
        Ok(backend)
    }

    /// Parse a TOML fixture and build a backend from it.
    pub fn from_fixture_str(content: &str) -> Result<Self, BackendError> {
        let fixture: Fixture =
            toml::from_str(content).map_err(|e| BackendError::Fixture(e.to_string()))?;
        Self::from_fixture(fixture)
    }

    /// Load a TOML fixture file.
    pub fn load_fixture(path: &Path) -> Result<Self, BackendError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BackendError::Fixture(format!("{}: {}", path.display(), e)))?;
        let backend = Self::from_fixture_str(&content)?;
        debug!(path = %path.display(), "Loaded window fixture");
        Ok(backend)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a new window and return its stable sequence.
    pub fn open_window(&self, spec: WindowSpec) -> Result<u32, BackendError> {
        let mut state = self.lock();

        if let Some(parent) = spec.parent
            && state.find(parent).is_none()
        {
            return Err(BackendError::WindowNotFound(parent.to_string()));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.windows.push(MemoryWindow {
            window: BackendWindow {
                id: sequence.to_string(),
                frame: Rect::new(spec.x, spec.y, spec.width, spec.height),
                minimized: spec.minimized,
                pid: spec.pid,
                stable_sequence: sequence,
                wm_class: spec.class,
                app_id: spec.app_id,
            },
            parent: spec.parent,
        });

        Ok(sequence)
    }

    /// Close a window. Returns false if it was not open.
    pub fn close_window(&self, sequence: u32) -> bool {
        let mut state = self.lock();
        let before = state.windows.len();
        state
            .windows
            .retain(|w| w.window.stable_sequence != sequence);
        state.windows.len() != before
    }

    /// Move a window to the end of the enumeration order, as raising it to the
    /// top of the stack does. Returns false if it was not open.
    pub fn raise_window(&self, sequence: u32) -> bool {
        let mut state = self.lock();
        let Some(index) = state
            .windows
            .iter()
            .position(|w| w.window.stable_sequence == sequence)
        else {
            return false;
        };
        let window = state.windows.remove(index);
        state.windows.push(window);
        true
    }

    pub fn set_monitor_count(&self, monitors: u32) {
        self.lock().monitors = monitors;
    }

    /// Current state of a window, if it is open.
    pub fn window(&self, sequence: u32) -> Option<BackendWindow> {
        self.lock().find(sequence).map(|w| w.window.clone())
    }

    /// Every mutation issued so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    fn sequence_of(window: &BackendWindow) -> Result<u32, BackendError> {
        window
            .id
            .parse()
            .map_err(|_| BackendError::WindowNotFound(window.id.clone()))
    }
}

impl WindowBackend for InMemoryBackend {
    fn monitor_count(&self) -> Result<u32, BackendError> {
        Ok(self.lock().monitors)
    }

    fn windows(&self) -> Result<Vec<BackendWindow>, BackendError> {
        Ok(self.lock().windows.iter().map(|w| w.window.clone()).collect())
    }

    fn root_ancestor(&self, window: &BackendWindow) -> Result<BackendWindow, BackendError> {
        let state = self.lock();
        let mut current = state
            .find(Self::sequence_of(window)?)
            .ok_or_else(|| BackendError::WindowNotFound(window.id.clone()))?;

        // Parents always have a lower sequence, so this terminates.
        while let Some(parent) = current.parent.and_then(|p| state.find(p)) {
            current = parent;
        }

        Ok(current.window.clone())
    }

    fn minimize(&self, window: &BackendWindow) -> Result<(), BackendError> {
        let sequence = Self::sequence_of(window)?;
        let mut state = self.lock();
        let target = state
            .find_mut(sequence)
            .ok_or_else(|| BackendError::WindowNotFound(window.id.clone()))?;
        target.window.minimized = true;
        state.calls.push(BackendCall::Minimize(sequence));
        Ok(())
    }

    fn move_resize_frame(&self, window: &BackendWindow, frame: Rect) -> Result<(), BackendError> {
        let sequence = Self::sequence_of(window)?;
        let mut state = self.lock();
        let target = state
            .find_mut(sequence)
            .ok_or_else(|| BackendError::WindowNotFound(window.id.clone()))?;
        target.window.frame = frame;
        state.calls.push(BackendCall::MoveResize(sequence, frame));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_monotonic_and_not_reused() {
        let backend = InMemoryBackend::new(1);
        let a = backend.open_window(WindowSpec::new("a")).unwrap();
        let b = backend.open_window(WindowSpec::new("b")).unwrap();
        assert!(backend.close_window(b));
        let c = backend.open_window(WindowSpec::new("c")).unwrap();

        assert_eq!(a, 1);
        assert_eq!(b, 2);
        assert_eq!(c, 3);
        assert!(backend.window(b).is_none());
    }

    #[test]
    fn test_close_unknown_window() {
        let backend = InMemoryBackend::new(1);
        assert!(!backend.close_window(42));
    }

    #[test]
    fn test_raise_window_reorders_enumeration() {
        let backend = InMemoryBackend::new(1);
        for class in ["a", "b", "c"] {
            backend.open_window(WindowSpec::new(class)).unwrap();
        }
        assert!(backend.raise_window(1));
        assert!(!backend.raise_window(42));

        let order: Vec<u32> = backend
            .windows()
            .unwrap()
            .iter()
            .map(|w| w.stable_sequence)
            .collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn test_root_ancestor_walks_parents() {
        let backend = InMemoryBackend::new(1);
        let root = backend.open_window(WindowSpec::new("gimp")).unwrap();
        let dialog = backend
            .open_window(WindowSpec::new("gimp").transient_for(root))
            .unwrap();
        let nested = backend
            .open_window(WindowSpec::new("gimp").transient_for(dialog))
            .unwrap();

        let nested_window = backend.window(nested).unwrap();
        let resolved = backend.root_ancestor(&nested_window).unwrap();
        assert_eq!(resolved.stable_sequence, root);
    }

    #[test]
    fn test_root_ancestor_after_parent_closed() {
        let backend = InMemoryBackend::new(1);
        let root = backend.open_window(WindowSpec::new("app")).unwrap();
        let dialog = backend
            .open_window(WindowSpec::new("app").transient_for(root))
            .unwrap();
        backend.close_window(root);

        let dialog_window = backend.window(dialog).unwrap();
        let resolved = backend.root_ancestor(&dialog_window).unwrap();
        assert_eq!(resolved.stable_sequence, dialog);
    }

    #[test]
    fn test_open_with_missing_parent_fails() {
        let backend = InMemoryBackend::new(1);
        let result = backend.open_window(WindowSpec::new("x").transient_for(9));
        assert!(matches!(result, Err(BackendError::WindowNotFound(_))));
        assert!(backend.windows().unwrap().is_empty());
    }

    #[test]
    fn test_mutations_update_state_and_journal() {
        let backend = InMemoryBackend::new(1);
        let seq = backend.open_window(WindowSpec::new("term")).unwrap();
        let window = backend.window(seq).unwrap();

        backend.minimize(&window).unwrap();
        backend
            .move_resize_frame(&window, Rect::new(-5, 10, 640, 480))
            .unwrap();

        let updated = backend.window(seq).unwrap();
        assert!(updated.minimized);
        assert_eq!(updated.frame, Rect::new(-5, 10, 640, 480));
        assert_eq!(
            backend.calls(),
            vec![
                BackendCall::Minimize(seq),
                BackendCall::MoveResize(seq, Rect::new(-5, 10, 640, 480)),
            ]
        );
    }

    #[test]
    fn test_mutating_closed_window_fails() {
        let backend = InMemoryBackend::new(1);
        let seq = backend.open_window(WindowSpec::new("term")).unwrap();
        let window = backend.window(seq).unwrap();
        backend.close_window(seq);

        assert!(backend.minimize(&window).is_err());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_fixture_parsing() {
        let backend = InMemoryBackend::from_fixture_str(
            r#"
            monitors = 2

            [[windows]]
            class = "firefox"
            app_id = "org.mozilla.firefox"
            pid = 100
            x = 0
            y = 0
            width = 1280
            height = 720

            [[windows]]
            class = "firefox"
            pid = 100
            parent = 1
            "#,
        )
        .unwrap();

        assert_eq!(backend.monitor_count().unwrap(), 2);
        let windows = backend.windows().unwrap();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[0].app_id.as_deref(), Some("org.mozilla.firefox"));
        assert_eq!(windows[0].frame, Rect::new(0, 0, 1280, 720));
        assert_eq!(windows[1].app_id, None);

        let root = backend.root_ancestor(&windows[1]).unwrap();
        assert_eq!(root.stable_sequence, 1);
    }

    #[test]
    fn test_fixture_defaults_to_one_monitor() {
        let backend = InMemoryBackend::from_fixture_str("").unwrap();
        assert_eq!(backend.monitor_count().unwrap(), 1);
    }

    #[test]
    fn test_fixture_with_forward_parent_is_rejected() {
        let result = InMemoryBackend::from_fixture_str(
            r#"
            [[windows]]
            class = "a"
            parent = 2

            [[windows]]
            class = "b"
            "#,
        );
        assert!(matches!(result, Err(BackendError::Fixture(_))));
    }

    #[test]
    fn test_fixture_invalid_toml() {
        let result = InMemoryBackend::from_fixture_str("monitors = \"two\"");
        assert!(matches!(result, Err(BackendError::Fixture(_))));
    }
}
