//! Driving port for login use-cases.
//!
//! Inbound adapters call this port to check credentials without knowing how
//! users are stored. HTTP handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginOutcome};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials against the user directory.
    ///
    /// Unknown emails and wrong passwords are [`LoginOutcome`] values; `Err`
    /// is reserved for directory failures.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
