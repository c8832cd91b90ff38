//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(login: Arc<dyn LoginService>, registration: Arc<dyn RegistrationService>) -> Self {
        Self {
            login,
            registration,
        }
    }

    /// Construct state from one service implementing both ports.
    ///
    /// # Examples
    /// ```ignore
    /// let service = Arc::new(AuthService::new(directory));
    /// let state = HttpState::from_service(service);
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: LoginService + RegistrationService + 'static,
    {
        Self {
            login: service.clone(),
            registration: service,
        }
    }
}
