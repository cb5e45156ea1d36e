//! The exported D-Bus object.

use tracing::{debug, warn};
use zbus::{fdo, interface};

use crate::backend::BackendError;
use crate::service::WindowControlService;

use super::types::{WindowGeometry, WindowRecord};

/// Name of the exported interface.
pub const INTERFACE_NAME: &str = "com.github.clueliss.WindowCtl";

/// Bus object wrapping a [`WindowControlService`].
///
/// Methods are synchronous, so each call runs to completion before the next
/// one is dispatched. Backend I/O (the Hyprland socket round-trips) blocks the
/// current-thread runtime that also drives the bus connection while it runs.
pub struct WindowCtlObject {
    service: WindowControlService,
}

impl WindowCtlObject {
    pub fn new(service: WindowControlService) -> Self {
        Self { service }
    }
}

#[interface(name = "com.github.clueliss.WindowCtl")]
impl WindowCtlObject {
    #[zbus(out_args("numMonitors"))]
    fn get_num_monitors(&self) -> fdo::Result<u32> {
        debug!("GetNumMonitors");
        self.service.monitor_count().map_err(backend_failure)
    }

    #[zbus(out_args("result"))]
    fn list_windows(&self) -> fdo::Result<Vec<WindowRecord>> {
        debug!("ListWindows");
        let windows = self.service.list_windows().map_err(backend_failure)?;
        Ok(windows.into_iter().map(WindowRecord::from).collect())
    }

    #[zbus(out_args("success"))]
    fn set_window_geom_by_class(
        &self,
        window_class: &str,
        window_geometry: WindowGeometry,
    ) -> fdo::Result<bool> {
        debug!(window_class, "SetWindowGeomByClass");
        self.service
            .set_window_geometry(window_class, window_geometry.into())
            .map_err(backend_failure)
    }
}

/// Backend failures reach the caller as a generic D-Bus error reply.
fn backend_failure(err: BackendError) -> fdo::Error {
    warn!(%err, "Backend call failed");
    fdo::Error::Failed(err.to_string())
}
