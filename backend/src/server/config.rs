//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use bikecare::outbound::postgrest::StoreConnection;
use bikecare::settings::{AppSettings, SettingsError};

/// Validated configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: StoreConnection,
    pub(crate) diagnostics_enabled: bool,
}

impl ServerConfig {
    /// Validate settings into a runnable configuration.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            store: settings.store_connection()?,
            diagnostics_enabled: settings.diagnostics_enabled,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether the diagnostic routes are mounted.
    #[must_use]
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics_enabled
    }
}
