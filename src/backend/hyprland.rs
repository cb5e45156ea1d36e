//! Hyprland backend using the IPC socket.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::Deserialize;
use tracing::{debug, warn};

use super::{BackendError, BackendWindow, Rect, WindowBackend};

/// Special workspace minimized windows are parked on.
const MINIMIZED_WORKSPACE: &str = "special:minimized";

/// Hyprland client using IPC socket communication.
pub struct HyprlandBackend {
    socket_path: PathBuf,
    sequences: Mutex<SequenceRegistry>,
}

impl HyprlandBackend {
    /// Create a new Hyprland backend.
    ///
    /// Returns None if the required environment variables are not set.
    pub fn new() -> Option<Self> {
        let signature = std::env::var("HYPRLAND_INSTANCE_SIGNATURE").ok()?;
        let runtime_dir = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".to_string());

        let socket_path = PathBuf::from(format!("{}/hypr/{}/.socket.sock", runtime_dir, signature));

        Some(Self {
            socket_path,
            sequences: Mutex::new(SequenceRegistry::default()),
        })
    }

    /// Send a command to Hyprland and receive the response.
    fn send_command(&self, cmd: &str) -> Result<String, BackendError> {
        let mut stream = UnixStream::connect(&self.socket_path)?;

        stream
            .write_all(cmd.as_bytes())
            .map_err(|e| BackendError::IpcError(format!("write failed: {}", e)))?;

        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .map_err(|e| BackendError::IpcError(format!("read failed: {}", e)))?;

        Ok(response)
    }

    /// Run a dispatcher. Hyprland answers "ok" on success; anything else is
    /// logged and otherwise ignored.
    fn dispatch(&self, args: &str) -> Result<(), BackendError> {
        let response = self.send_command(&format!("dispatch {}", args))?;
        if response.trim() != "ok" {
            warn!(dispatch = args, response = response.trim(), "Hyprland rejected dispatch");
        }
        Ok(())
    }
}

impl WindowBackend for HyprlandBackend {
    fn monitor_count(&self) -> Result<u32, BackendError> {
        let json = self.send_command("j/monitors")?;
        let monitors: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        Ok(monitors.len() as u32)
    }

    fn windows(&self) -> Result<Vec<BackendWindow>, BackendError> {
        // j/clients returns JSON output, in creation order
        let json = self.send_command("j/clients")?;
        let clients = parse_clients(&json)?;

        let mut sequences = self
            .sequences
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(windows_from_clients(clients, &mut sequences))
    }

    fn root_ancestor(&self, window: &BackendWindow) -> Result<BackendWindow, BackendError> {
        // Hyprland does not report transient parents.
        Ok(window.clone())
    }

    fn minimize(&self, window: &BackendWindow) -> Result<(), BackendError> {
        debug!(address = %window.id, "Minimizing window");
        self.dispatch(&format!(
            "movetoworkspacesilent {},address:{}",
            MINIMIZED_WORKSPACE, window.id
        ))
    }

    fn move_resize_frame(&self, window: &BackendWindow, frame: Rect) -> Result<(), BackendError> {
        // Only floating windows honor these dispatchers.
        self.dispatch(&format!(
            "movewindowpixel exact {} {},address:{}",
            frame.x, frame.y, window.id
        ))?;
        self.dispatch(&format!(
            "resizewindowpixel exact {} {},address:{}",
            frame.width, frame.height, window.id
        ))
    }

    fn name(&self) -> &'static str {
        "Hyprland"
    }
}

/// Assigns creation-order sequence numbers to client addresses.
///
/// Hyprland has no creation counter of its own. Clients get the next
/// number the first time they are seen and are forgotten once they are
/// gone, so a number is never handed out twice. Addresses are pointer
/// values that Hyprland may reuse, so a client is keyed by address and pid.
#[derive(Debug)]
struct SequenceRegistry {
    next: u32,
    assigned: HashMap<(String, i32), u32>,
}

impl Default for SequenceRegistry {
    fn default() -> Self {
        Self {
            next: 1,
            assigned: HashMap::new(),
        }
    }
}

impl SequenceRegistry {
    /// Drop clients that are no longer live.
    fn retain_live(&mut self, live: &[(&str, i32)]) {
        self.assigned
            .retain(|(address, pid), _| live.contains(&(address.as_str(), *pid)));
    }

    fn sequence_for(&mut self, address: &str, pid: i32) -> u32 {
        let key = (address.to_string(), pid);
        if let Some(&sequence) = self.assigned.get(&key) {
            return sequence;
        }
        let sequence = self.next;
        self.next += 1;
        self.assigned.insert(key, sequence);
        sequence
    }
}

fn parse_clients(json: &str) -> Result<Vec<HyprlandClient>, BackendError> {
    Ok(serde_json::from_str(json)?)
}

fn windows_from_clients(
    clients: Vec<HyprlandClient>,
    sequences: &mut SequenceRegistry,
) -> Vec<BackendWindow> {
    let clients: Vec<HyprlandClient> = clients.into_iter().filter(|c| c.mapped).collect();

    let live: Vec<(&str, i32)> = clients
        .iter()
        .map(|c| (c.address.as_str(), c.pid))
        .collect();
    sequences.retain_live(&live);

    clients
        .into_iter()
        .map(|c| {
            let stable_sequence = sequences.sequence_for(&c.address, c.pid);
            c.into_window(stable_sequence)
        })
        .collect()
}

/// Hyprland client (window) information from IPC.
#[derive(Debug, Deserialize)]
struct HyprlandClient {
    address: String,
    at: [i32; 2],
    size: [i32; 2],
    workspace: HyprlandWorkspace,
    class: String,
    pid: i32,
    #[serde(default)]
    xwayland: bool,
    #[serde(default)]
    mapped: bool,
}

impl HyprlandClient {
    fn into_window(self, stable_sequence: u32) -> BackendWindow {
        let minimized = self.workspace.name == MINIMIZED_WORKSPACE;
        let wm_class = (!self.class.is_empty()).then_some(self.class);
        // Native Wayland clients use their app id as class.
        let app_id = if self.xwayland {
            None
        } else {
            wm_class.clone()
        };

        BackendWindow {
            id: self.address,
            frame: Rect::new(self.at[0], self.at[1], self.size[0], self.size[1]),
            minimized,
            pid: self.pid,
            stable_sequence,
            wm_class,
            app_id,
        }
    }
}

/// Hyprland workspace information.
#[derive(Debug, Deserialize)]
struct HyprlandWorkspace {
    name: String,
}
