//! Wire types of the `com.github.clueliss.WindowCtl` interface.
//!
//! The D-Bus signatures match the deployed interface so that existing
//! clients keep working: `(iiiib)` for a geometry and `((iiiib)iuss)` for a
//! window record.

use serde::{Deserialize, Serialize};
use zbus::zvariant::Type;

use crate::service::{GeometryRequest, WindowInfo};

/// Frame rectangle plus minimized flag, `(iiiib)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct WindowGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub minimized: bool,
}

/// One entry of `ListWindows`, `((iiiib)iuss)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
pub struct WindowRecord {
    pub geometry: WindowGeometry,
    pub process_id: i32,
    pub stable_sequence: u32,
    pub window_class: String,
    pub app_id: String,
}

impl From<WindowInfo> for WindowRecord {
    fn from(info: WindowInfo) -> Self {
        Self {
            geometry: WindowGeometry {
                x: info.geometry.x,
                y: info.geometry.y,
                width: info.geometry.width,
                height: info.geometry.height,
                minimized: info.minimized,
            },
            process_id: info.process_id,
            stable_sequence: info.stable_sequence,
            window_class: info.window_class,
            app_id: info.app_id,
        }
    }
}

impl From<WindowGeometry> for GeometryRequest {
    fn from(geometry: WindowGeometry) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            minimize: geometry.minimized,
        }
    }
}

impl From<GeometryRequest> for WindowGeometry {
    fn from(request: GeometryRequest) -> Self {
        Self {
            x: request.x,
            y: request.y,
            width: request.width,
            height: request.height,
            minimized: request.minimize,
        }
    }
}
