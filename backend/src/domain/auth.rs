//! Login primitives: credentials, outcomes, and the response payload.
//!
//! Login failures are ordinary outcomes, not errors. Only downstream
//! failures travel through [`crate::domain::Error`].

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::{UserId, UserRecord};

/// Message returned when no record carries the supplied email.
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";
/// Message returned when the stored password is absent or differs.
pub const INVALID_PASSWORD_MESSAGE: &str = "invalid password";
/// Message returned on a successful login.
pub const LOGIN_SUCCEEDED_MESSAGE: &str = "login succeeded";

/// Credentials supplied to a login attempt.
///
/// Values are kept verbatim: no trimming, no normalisation. The password is
/// wiped from memory when the credentials are dropped.
///
/// # Examples
/// ```
/// use auth_facade::domain::LoginCredentials;
///
/// let creds = LoginCredentials::new("a@x.com", "p1");
/// assert_eq!(creds.email(), "a@x.com");
/// assert_eq!(creds.password(), "p1");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from raw request values.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Email used for the directory lookup.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identity fields released after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Store identifier.
    pub id: Option<UserId>,
    /// Email address.
    pub email: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

impl From<UserRecord> for AuthenticatedUser {
    fn from(record: UserRecord) -> Self {
        let UserRecord {
            id, email, name, ..
        } = record;
        Self { id, email, name }
    }
}

/// Result of checking credentials against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// No record carries the supplied email.
    UserNotFound,
    /// A record exists but its stored password is absent or differs.
    InvalidPassword,
    /// Credentials matched.
    Success(AuthenticatedUser),
}

impl LoginOutcome {
    /// Whether the caller is authenticated.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Human-readable message for the outcome.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::UserNotFound => USER_NOT_FOUND_MESSAGE,
            Self::InvalidPassword => INVALID_PASSWORD_MESSAGE,
            Self::Success(_) => LOGIN_SUCCEEDED_MESSAGE,
        }
    }
}

/// Response payload for a login attempt.
///
/// Identity fields are omitted from the JSON when absent, so failures render
/// as `{"success":false,"message":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Store identifier of the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Email of the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name of the authenticated user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Whether the login succeeded.
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
}

impl From<LoginOutcome> for LoginResult {
    fn from(outcome: LoginOutcome) -> Self {
        let message = outcome.message().to_owned();
        match outcome {
            LoginOutcome::Success(AuthenticatedUser { id, email, name }) => Self {
                id,
                email,
                name,
                success: true,
                message,
            },
            LoginOutcome::UserNotFound | LoginOutcome::InvalidPassword => Self {
                id: None,
                email: None,
                name: None,
                success: false,
                message,
            },
        }
    }
}
