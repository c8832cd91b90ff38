//! Builders wiring the user store adapter into the HTTP state.

use std::sync::Arc;

use actix_web::web;

use auth_facade::domain::AuthService;
use auth_facade::inbound::http::state::HttpState;
use auth_facade::outbound::user_directory::HttpUserDirectory;

use super::ServerConfig;

/// Build handler state backed by the HTTP user directory.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let directory =
        HttpUserDirectory::with_timeout(config.user_service_url.clone(), config.request_timeout)
            .map_err(|err| std::io::Error::other(format!("user directory client: {err}")))?;
    let service = Arc::new(AuthService::new(Arc::new(directory)));
    Ok(web::Data::new(HttpState::from_service(service)))
}
