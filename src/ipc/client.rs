//! Client side of the window-control interface.

use zbus::names::BusName;
use zbus::{Connection, fdo, proxy};

use crate::config::{BusKind, ServiceConfig};

use super::types::{WindowGeometry, WindowRecord};

#[proxy(
    interface = "com.github.clueliss.WindowCtl",
    default_service = "com.github.clueliss.WindowCtl",
    default_path = "/com/github/clueliss/WindowCtl",
    gen_blocking = false
)]
pub trait WindowCtl {
    fn get_num_monitors(&self) -> zbus::Result<u32>;

    fn list_windows(&self) -> zbus::Result<Vec<WindowRecord>>;

    fn set_window_geom_by_class(
        &self,
        window_class: &str,
        window_geometry: WindowGeometry,
    ) -> zbus::Result<bool>;
}

/// Connect to the bus named in the config.
pub async fn connect(config: &ServiceConfig) -> zbus::Result<Connection> {
    match config.bus {
        BusKind::Session => Connection::session().await,
        BusKind::System => Connection::system().await,
    }
}

/// Build a proxy for the configured name and object path.
pub async fn window_ctl<'a>(
    connection: &Connection,
    config: &'a ServiceConfig,
) -> zbus::Result<WindowCtlProxy<'a>> {
    WindowCtlProxy::builder(connection)
        .destination(config.bus_name.as_str())?
        .path(config.object_path.as_str())?
        .build()
        .await
}

/// Check whether some process owns the service name.
pub async fn is_service_running(connection: &Connection, bus_name: &str) -> zbus::Result<bool> {
    let dbus = fdo::DBusProxy::new(connection).await?;
    let name = BusName::try_from(bus_name)?;
    Ok(dbus.name_has_owner(name).await?)
}
