//! Authentication service implementing the login and registration ports.
//!
//! Policy as built:
//! - login looks the email up with a full listing scan and compares the
//!   stored password to the provided one with plain string equality;
//! - registration checks the email is free, then that email, password and
//!   name are present, then creates the record.
//!
//! The uniqueness check and the create are two independent downstream calls.
//! Concurrent registrations for one email can both pass the check; only the
//! store can close that gap.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{LoginService, RegistrationService, UserDirectory, UserDirectoryError};
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, LoginOutcome, RegistrationOutcome,
    RegistrationRejection, RequiredField, UserRecord,
};

/// Facade service backed by a [`UserDirectory`].
#[derive(Clone)]
pub struct AuthService<D> {
    directory: Arc<D>,
}

impl<D> AuthService<D> {
    /// Create a new service over the given directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

/// Map directory failures onto domain errors.
///
/// Unreachable stores become `ServiceUnavailable`; unusable answers become
/// `BadGateway`.
pub fn map_user_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Transport { message } | UserDirectoryError::Timeout { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Status { status, message } => {
            Error::bad_gateway(format!("user directory returned status {status}: {message}"))
        }
        UserDirectoryError::Decode { message } => {
            Error::bad_gateway(format!("user directory response invalid: {message}"))
        }
        UserDirectoryError::NotFoundAfterUpdate { id } => {
            Error::not_found(format!("user {id} not found after update"))
        }
    }
}

#[async_trait]
impl<D> LoginService for AuthService<D>
where
    D: UserDirectory,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let email = credentials.email();
        info!(email, "login attempt");

        let record = self
            .directory
            .find_by_email(email)
            .await
            .map_err(map_user_directory_error)?;
        let Some(record) = record else {
            warn!(email, "login rejected: user not found");
            return Ok(LoginOutcome::UserNotFound);
        };

        if !record.password_matches(credentials.password()) {
            warn!(email, "login rejected: invalid password");
            return Ok(LoginOutcome::InvalidPassword);
        }

        debug!(email, user_id = ?record.id, "login succeeded");
        Ok(LoginOutcome::Success(AuthenticatedUser::from(record)))
    }
}

#[async_trait]
impl<D> RegistrationService for AuthService<D>
where
    D: UserDirectory,
{
    async fn register(&self, candidate: UserRecord) -> Result<RegistrationOutcome, Error> {
        info!(email = ?candidate.email, "registration attempt");

        if let Some(email) = candidate.email.as_deref() {
            let existing = self
                .directory
                .find_by_email(email)
                .await
                .map_err(map_user_directory_error)?;
            if existing.is_some() {
                warn!(email, "registration rejected: email already registered");
                return Ok(Err(RegistrationRejection::EmailTaken {
                    email: email.to_owned(),
                }));
            }
        }

        if let Some(field) = RequiredField::first_missing(&candidate) {
            warn!(email = ?candidate.email, %field, "registration rejected: missing field");
            return Ok(Err(RegistrationRejection::MissingField { field }));
        }

        let created = self
            .directory
            .create(&candidate)
            .await
            .map_err(map_user_directory_error)?;
        debug!(user_id = ?created.id, "registered user");
        Ok(Ok(created))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
