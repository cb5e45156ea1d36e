//! D-Bus transport for the window-control service.

pub mod client;
pub mod interface;
pub mod server;
pub mod types;

pub use client::WindowCtlProxy;
pub use interface::{INTERFACE_NAME, WindowCtlObject};
pub use server::ServiceRegistration;
pub use types::{WindowGeometry, WindowRecord};
