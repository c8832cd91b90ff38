//! Test utilities for the facade crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

pub mod user_store {
    //! In-process stand-in for the downstream user store.
    //!
    //! The stub serves the `/users` contract on an ephemeral loopback port and
    //! records every request so tests can assert on traffic. Failure modes
    //! (status overrides, raw bodies, slow responses, records vanishing after
    //! an update) are toggled through [`StubUserStore::with_state`].

    use std::io;
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex, PoisonError};
    use std::time::Duration;

    use actix_web::dev::ServerHandle;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};

    use crate::domain::{TRACE_ID_HEADER, UserId, UserRecord};

    /// Mutable state behind the stub store.
    #[derive(Debug, Default)]
    pub struct StubState {
        /// Records in listing order.
        pub users: Vec<UserRecord>,
        /// Identifier assigned to the next created record.
        pub next_id: i64,
        /// Raw body served by `GET /users` instead of the records.
        pub list_body: Option<String>,
        /// Raw body served by `POST /users` instead of the created record.
        pub create_body: Option<String>,
        /// Status returned by every route instead of the normal answer.
        pub fail_status: Option<u16>,
        /// Drop the record once a `PUT` succeeds, so the read-back misses.
        pub drop_after_update: bool,
        /// Delay applied before answering.
        pub response_delay: Option<Duration>,
        /// Requests seen, as `"METHOD /path"`.
        pub requests: Vec<String>,
        /// `trace-id` header values seen, in arrival order.
        pub trace_ids: Vec<String>,
    }

    type SharedState = Mutex<StubState>;

    /// Running stub store bound to `127.0.0.1`.
    pub struct StubUserStore {
        base_url: String,
        state: Arc<SharedState>,
        handle: ServerHandle,
    }

    impl StubUserStore {
        /// Start a stub server seeded with `users`.
        ///
        /// Must be called from within an Actix system, e.g. an
        /// `#[actix_web::test]`.
        ///
        /// # Errors
        ///
        /// Returns an error when the loopback listener cannot be bound.
        pub async fn start(users: Vec<UserRecord>) -> io::Result<Self> {
            let next_id = users
                .iter()
                .filter_map(|user| user.id)
                .map(UserId::get)
                .max()
                .unwrap_or(0)
                + 1;
            let state = Arc::new(Mutex::new(StubState {
                users,
                next_id,
                ..StubState::default()
            }));

            let listener = TcpListener::bind("127.0.0.1:0")?;
            let addr = listener.local_addr()?;
            let data = web::Data::from(state.clone());
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(data.clone())
                    .service(
                        web::resource("/users")
                            .route(web::get().to(list_users))
                            .route(web::post().to(create_user)),
                    )
                    .service(
                        web::resource("/users/{id}")
                            .route(web::get().to(get_user))
                            .route(web::put().to(update_user))
                            .route(web::delete().to(delete_user)),
                    )
            })
            .disable_signals()
            .workers(1)
            .listen(listener)?
            .run();
            let handle = server.handle();
            actix_web::rt::spawn(server);

            Ok(Self {
                base_url: format!("http://{addr}"),
                state,
                handle,
            })
        }

        /// Base URL to configure the facade with.
        pub fn base_url(&self) -> &str {
            self.base_url.as_str()
        }

        /// Snapshot of the stored records.
        pub fn users(&self) -> Vec<UserRecord> {
            self.with_state(|state| state.users.clone())
        }

        /// Requests seen so far.
        pub fn requests(&self) -> Vec<String> {
            self.with_state(|state| state.requests.clone())
        }

        /// Trace identifiers forwarded so far.
        pub fn trace_ids(&self) -> Vec<String> {
            self.with_state(|state| state.trace_ids.clone())
        }

        /// Inspect or change the stub state.
        pub fn with_state<R>(&self, f: impl FnOnce(&mut StubState) -> R) -> R {
            let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            f(&mut guard)
        }

        /// Stop the server and wait for it to shut down.
        pub async fn stop(self) {
            self.handle.stop(true).await;
        }
    }

    fn lock(state: &SharedState) -> std::sync::MutexGuard<'_, StubState> {
        state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the request and return the configured failure status and delay.
    fn observe(state: &SharedState, req: &HttpRequest) -> (Option<StatusCode>, Option<Duration>) {
        let mut guard = lock(state);
        guard
            .requests
            .push(format!("{} {}", req.method(), req.path()));
        if let Some(trace_id) = req
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            guard.trace_ids.push(trace_id.to_owned());
        }
        let failure = guard
            .fail_status
            .and_then(|status| StatusCode::from_u16(status).ok());
        (failure, guard.response_delay)
    }

    async fn prelude(state: &SharedState, req: &HttpRequest) -> Option<HttpResponse> {
        let (failure, delay) = observe(state, req);
        if let Some(delay) = delay {
            actix_web::rt::time::sleep(delay).await;
        }
        failure.map(|status| HttpResponse::build(status).body("stub failure"))
    }

    fn raw_json(body: String) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("application/json")
            .body(body)
    }

    async fn list_users(state: web::Data<SharedState>, req: HttpRequest) -> HttpResponse {
        if let Some(failure) = prelude(&state, &req).await {
            return failure;
        }
        let guard = lock(&state);
        match guard.list_body.clone() {
            Some(body) => raw_json(body),
            None => HttpResponse::Ok().json(&guard.users),
        }
    }

    async fn create_user(
        state: web::Data<SharedState>,
        req: HttpRequest,
        payload: web::Json<UserRecord>,
    ) -> HttpResponse {
        if let Some(failure) = prelude(&state, &req).await {
            return failure;
        }
        let mut guard = lock(&state);
        let mut record = payload.into_inner();
        record.id = Some(UserId::new(guard.next_id));
        guard.next_id += 1;
        guard.users.push(record.clone());
        match guard.create_body.clone() {
            Some(body) => raw_json(body),
            None => HttpResponse::Ok().json(record),
        }
    }

    async fn get_user(
        state: web::Data<SharedState>,
        req: HttpRequest,
        path: web::Path<i64>,
    ) -> HttpResponse {
        if let Some(failure) = prelude(&state, &req).await {
            return failure;
        }
        let id = UserId::new(path.into_inner());
        let guard = lock(&state);
        match guard.users.iter().find(|user| user.id == Some(id)) {
            Some(user) => HttpResponse::Ok().json(user),
            None => HttpResponse::NotFound().finish(),
        }
    }

    async fn update_user(
        state: web::Data<SharedState>,
        req: HttpRequest,
        path: web::Path<i64>,
        payload: web::Json<UserRecord>,
    ) -> HttpResponse {
        if let Some(failure) = prelude(&state, &req).await {
            return failure;
        }
        let id = UserId::new(path.into_inner());
        let mut guard = lock(&state);
        let Some(index) = guard.users.iter().position(|user| user.id == Some(id)) else {
            return HttpResponse::NotFound().finish();
        };
        if guard.drop_after_update {
            guard.users.remove(index);
        } else {
            let mut record = payload.into_inner();
            record.id = Some(id);
            guard.users[index] = record;
        }
        HttpResponse::Ok().finish()
    }

    async fn delete_user(
        state: web::Data<SharedState>,
        req: HttpRequest,
        path: web::Path<i64>,
    ) -> HttpResponse {
        if let Some(failure) = prelude(&state, &req).await {
            return failure;
        }
        let id = UserId::new(path.into_inner());
        lock(&state).users.retain(|user| user.id != Some(id));
        HttpResponse::NoContent().finish()
    }
}

pub use user_store::{StubState, StubUserStore};

/// Build a fully populated user record.
pub fn user(id: i64, email: &str, name: &str, password: &str) -> crate::domain::UserRecord {
    crate::domain::UserRecord {
        id: Some(crate::domain::UserId::new(id)),
        email: Some(email.to_owned()),
        name: Some(name.to_owned()),
        hashed_password: Some(password.to_owned()),
    }
}
