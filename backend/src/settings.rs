//! Facade configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `AUTH_FACADE_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence. They are read once
//! at startup.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Raw configuration values for the facade.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AUTH_FACADE")]
pub struct FacadeSettings {
    /// Base URL of the downstream user store, e.g. `http://users:9000`.
    pub user_service_url: Option<String>,
    /// Socket address the HTTP server binds to.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// Per-request timeout for user store calls, in seconds.
    pub request_timeout_secs: Option<u64>,
}

/// Problems found while validating [`FacadeSettings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// No user store URL was configured.
    #[error("AUTH_FACADE_USER_SERVICE_URL must be set")]
    MissingUserServiceUrl,
    /// The user store URL does not parse as an absolute http(s) URL.
    #[error("invalid user service url {value:?}: {reason}")]
    InvalidUserServiceUrl { value: String, reason: String },
    /// The bind address does not parse as a socket address.
    #[error("invalid bind address {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },
    /// A zero timeout would fail every request.
    #[error("request timeout must be greater than zero seconds")]
    ZeroTimeout,
}

impl FacadeSettings {
    /// Validated user store base URL.
    ///
    /// # Errors
    ///
    /// Fails when the URL is absent, unparsable, or not `http`/`https`.
    pub fn user_service_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .user_service_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(SettingsError::MissingUserServiceUrl)?;
        let url = Url::parse(raw).map_err(|err| SettingsError::InvalidUserServiceUrl {
            value: raw.to_owned(),
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(SettingsError::InvalidUserServiceUrl {
                value: raw.to_owned(),
                reason: format!("unsupported scheme {other}"),
            }),
        }
    }

    /// Validated bind address. Defaults to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Fails when the configured value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.trim();
        raw.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                reason: err.to_string(),
            }
        })
    }

    /// Configured request timeout, or `None` for transport defaults.
    ///
    /// # Errors
    ///
    /// Fails when the timeout is zero.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError::ZeroTimeout),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for facade configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 3] = [
        "AUTH_FACADE_USER_SERVICE_URL",
        "AUTH_FACADE_BIND_ADDR",
        "AUTH_FACADE_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> FacadeSettings {
        FacadeSettings::load_from_iter([OsString::from("auth-facade")])
            .expect("config should load")
    }

    fn settings(url: Option<&str>, bind: &str, timeout: Option<u64>) -> FacadeSettings {
        FacadeSettings {
            user_service_url: url.map(str::to_owned),
            bind_addr: bind.to_owned(),
            request_timeout_secs: timeout,
        }
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.user_service_url.is_none());
        assert_eq!(
            settings.user_service_url(),
            Err(SettingsError::MissingUserServiceUrl)
        );
        assert_eq!(
            settings.bind_addr().expect("default bind"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("valid addr")
        );
        assert_eq!(settings.request_timeout(), Ok(None));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (VARS[0], Some("http://users.internal:9000".to_owned())),
            (VARS[1], Some("127.0.0.1:9090".to_owned())),
            (VARS[2], Some("5".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.user_service_url().expect("valid url").as_str(),
            "http://users.internal:9000/"
        );
        assert_eq!(
            settings.bind_addr().expect("valid bind"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("valid addr")
        );
        assert_eq!(
            settings.request_timeout(),
            Ok(Some(Duration::from_secs(5)))
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_url_counts_as_missing(#[case] value: &str) {
        assert_eq!(
            settings(Some(value), "0.0.0.0:8080", None).user_service_url(),
            Err(SettingsError::MissingUserServiceUrl)
        );
    }

    #[rstest]
    #[case("users.internal")]
    #[case("ftp://users.internal")]
    #[case("/relative/path")]
    fn rejects_non_http_urls(#[case] value: &str) {
        let error = settings(Some(value), "0.0.0.0:8080", None)
            .user_service_url()
            .expect_err("must be rejected");
        assert!(matches!(error, SettingsError::InvalidUserServiceUrl { .. }));
    }

    #[rstest]
    fn rejects_malformed_bind_address() {
        let error = settings(None, "localhost", None)
            .bind_addr()
            .expect_err("host names are not socket addresses");
        assert!(matches!(error, SettingsError::InvalidBindAddr { .. }));
    }

    #[rstest]
    fn rejects_zero_timeout() {
        assert_eq!(
            settings(None, "0.0.0.0:8080", Some(0)).request_timeout(),
            Err(SettingsError::ZeroTimeout)
        );
    }
}
