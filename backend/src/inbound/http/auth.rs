//! Login and registration handlers.
//!
//! ```text
//! POST /auth/login {"email":"a@x.com","password":"p1"}
//! POST /auth/register {"email":"c@x.com","hashedPassword":"p2","name":"C"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{LoginCredentials, LoginResult, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /auth/login`.
///
/// Absent and `null` fields are read as empty strings.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginRequest> for LoginCredentials {
    fn from(value: LoginRequest) -> Self {
        Self::new(
            value.email.unwrap_or_default(),
            value.password.unwrap_or_default(),
        )
    }
}

/// Check credentials against the user store.
///
/// Responds 200 with the identity on success and 401 with
/// `{"success":false,"message":...}` otherwise. Downstream failures use the
/// shared error envelope.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::from(payload.into_inner());
    let outcome = state.login.login(&credentials).await?;
    let mut response = if outcome.is_success() {
        HttpResponse::Ok()
    } else {
        HttpResponse::Unauthorized()
    };
    Ok(response.json(LoginResult::from(outcome)))
}

/// Register a new user record.
///
/// Responds 200 with the record the store created, or 400 with an empty body
/// when the email is taken or a required field is missing.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<UserRecord>,
) -> ApiResult<HttpResponse> {
    match state.registration.register(payload.into_inner()).await? {
        Ok(created) => Ok(HttpResponse::Ok().json(created)),
        Err(_rejection) => Ok(HttpResponse::BadRequest().finish()),
    }
}
