//! Bus registration of the window-control object.

use tracing::{info, warn};
use zbus::{Connection, connection};

use crate::config::{BusKind, ServiceConfig};
use crate::service::WindowControlService;

use super::interface::{INTERFACE_NAME, WindowCtlObject};

/// A live registration of the service on the message bus.
///
/// Created by [`ServiceRegistration::start`] and torn down by
/// [`ServiceRegistration::stop`]. If it is dropped without `stop` (an error
/// path or a panic), the bus connection is closed, which makes the bus drop
/// the object and release the name.
pub struct ServiceRegistration {
    connection: Option<Connection>,
    /// Unset on peer-to-peer connections, where there is no name to own
    bus_name: Option<String>,
    object_path: String,
}

impl ServiceRegistration {
    /// Connect to the configured bus, export the object and own the name.
    ///
    /// Fails with [`zbus::Error::NameTaken`] when another process already
    /// owns the name.
    pub async fn start(config: &ServiceConfig, service: WindowControlService) -> zbus::Result<Self> {
        let builder = match config.bus {
            BusKind::Session => connection::Builder::session()?,
            BusKind::System => connection::Builder::system()?,
        };

        let registration = Self::export(
            builder,
            Some(config.bus_name.as_str()),
            config.object_path.as_str(),
            service,
        )
        .await?;

        info!(
            bus = ?config.bus,
            name = %config.bus_name,
            path = %config.object_path,
            interface = INTERFACE_NAME,
            "Registered window control service"
        );

        Ok(registration)
    }

    /// Build the connection described by `builder` with the object served at
    /// `object_path`, requesting `bus_name` if one is given.
    pub async fn export<'a>(
        builder: connection::Builder<'a>,
        bus_name: Option<&'a str>,
        object_path: &'a str,
        service: WindowControlService,
    ) -> zbus::Result<Self> {
        let builder = match bus_name {
            Some(name) => builder.name(name)?,
            None => builder,
        };

        let connection = builder
            .serve_at(object_path, WindowCtlObject::new(service))?
            .build()
            .await?;

        Ok(Self {
            connection: Some(connection),
            bus_name: bus_name.map(str::to_string),
            object_path: object_path.to_string(),
        })
    }

    /// Remove the object and release the name.
    pub async fn stop(mut self) -> zbus::Result<()> {
        let Some(connection) = self.connection.take() else {
            return Ok(());
        };

        connection
            .object_server()
            .remove::<WindowCtlObject, _>(self.object_path.as_str())
            .await?;
        if let Some(name) = &self.bus_name {
            connection.release_name(name.as_str()).await?;
        }

        info!(path = %self.object_path, "Unregistered window control service");
        Ok(())
    }
}

impl Drop for ServiceRegistration {
    fn drop(&mut self) {
        if self.connection.take().is_some() {
            warn!(
                path = %self.object_path,
                "Registration dropped without stop, closing bus connection"
            );
        }
    }
}
