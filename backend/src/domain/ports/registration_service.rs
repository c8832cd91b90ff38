//! Driving port for registration use-cases.

use async_trait::async_trait;

use crate::domain::{Error, RegistrationOutcome, UserRecord};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Validate `candidate` and create it downstream.
    ///
    /// The inner `Result` carries policy rejections; the outer one carries
    /// directory failures.
    async fn register(&self, candidate: UserRecord) -> Result<RegistrationOutcome, Error>;
}
