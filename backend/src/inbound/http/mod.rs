//! HTTP inbound adapter exposing the login, registration and health
//! endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;
