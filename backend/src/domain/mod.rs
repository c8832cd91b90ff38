//! Domain primitives, ports and the authentication service.
//!
//! Purpose: keep the login and registration rules independent of HTTP and
//! of the downstream user store. Inbound adapters drive the
//! [`ports::LoginService`] and [`ports::RegistrationService`] ports; the
//! [`AuthService`] drives a [`ports::UserDirectory`].
//!
//! Public surface:
//! - Error, ErrorCode: failure payload returned to API callers.
//! - UserId, UserRecord: the user store's record shape.
//! - LoginCredentials, LoginOutcome, LoginResult: login inputs and results.
//! - RequiredField, RegistrationRejection: registration rules.
//! - TraceId: request-scoped correlation identifier.

pub mod auth;
pub mod auth_service;
pub mod error;
pub mod ports;
pub mod registration;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthenticatedUser, INVALID_PASSWORD_MESSAGE, LOGIN_SUCCEEDED_MESSAGE, LoginCredentials,
    LoginOutcome, LoginResult, USER_NOT_FOUND_MESSAGE,
};
pub use self::auth_service::{AuthService, map_user_directory_error};
pub use self::error::{Error, ErrorCode};
pub use self::registration::{RegistrationOutcome, RegistrationRejection, RequiredField};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserRecord};
