//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use auth_facade::settings::{FacadeSettings, SettingsError};
use url::Url;

/// Validated values needed to build the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) user_service_url: Url,
    pub(crate) request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Validate loaded settings into a server configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`SettingsError`] found.
    pub fn from_settings(settings: &FacadeSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            user_service_url: settings.user_service_url()?,
            request_timeout: settings.request_timeout()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
