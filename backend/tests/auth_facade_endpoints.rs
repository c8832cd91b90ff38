//! End-to-end coverage for the auth endpoints.
//!
//! Each test runs the facade on an ephemeral port, backed by the real HTTP
//! user directory adapter talking to the in-process stub user store, and
//! drives it with `awc`.

use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpServer, web};
use serde_json::{Value, json};
use url::Url;

use auth_facade::Trace;
use auth_facade::domain::{AuthService, TRACE_ID_HEADER};
use auth_facade::inbound::http::auth::{login, register};
use auth_facade::inbound::http::state::HttpState;
use auth_facade::outbound::user_directory::HttpUserDirectory;
use auth_facade::test_support::{StubUserStore, user};

struct Facade {
    base_url: String,
    handle: ServerHandle,
}

impl Facade {
    async fn start(store: &StubUserStore) -> Self {
        let base = Url::parse(store.base_url()).expect("stub url parses");
        let directory = HttpUserDirectory::new(base).expect("client builds");
        let service = Arc::new(AuthService::new(Arc::new(directory)));
        let state = web::Data::new(HttpState::from_service(service));

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind facade listener");
        let addr = listener.local_addr().expect("facade addr");
        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(Trace)
                .service(web::scope("/auth").service(login).service(register))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .expect("listen on facade socket")
        .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Option<String>, Vec<u8>) {
        let mut response = awc::Client::default()
            .post(format!("{}{path}", self.base_url))
            .send_json(&body)
            .await
            .expect("facade responds");
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.body().await.expect("read body");
        (response.status(), trace_id, bytes.to_vec())
    }

    async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let (status, _, bytes) = self.post(path, body).await;
        let value = serde_json::from_slice(&bytes).expect("json body");
        (status, value)
    }

    async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn scenario() -> (StubUserStore, Facade) {
    let store = StubUserStore::start(vec![user(1, "a@x.com", "A", "p1")])
        .await
        .expect("stub starts");
    let facade = Facade::start(&store).await;
    (store, facade)
}

#[actix_web::test]
async fn login_with_stored_password_succeeds() {
    let (store, facade) = scenario().await;

    let (status, body) = facade
        .post_json("/auth/login", json!({"email": "a@x.com", "password": "p1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "email": "a@x.com",
            "name": "A",
            "success": true,
            "message": "login succeeded"
        })
    );

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn login_failures_are_unauthorised() {
    let (store, facade) = scenario().await;

    let (status, body) = facade
        .post_json("/auth/login", json!({"email": "a@x.com", "password": "wrong"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "invalid password"}));

    let (status, body) = facade
        .post_json("/auth/login", json!({"email": "b@x.com", "password": "p1"}))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "user not found"}));

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn duplicate_registration_is_rejected_without_create() {
    let (store, facade) = scenario().await;

    let (status, _, body) = facade
        .post(
            "/auth/register",
            json!({"email": "a@x.com", "hashedPassword": "other", "name": "Other"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(store.requests(), ["GET /users"]);
    assert_eq!(store.users().len(), 1);

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn incomplete_registration_is_rejected() {
    let (store, facade) = scenario().await;

    let (status, _, body) = facade
        .post(
            "/auth/register",
            json!({"email": "c@x.com", "hashedPassword": "p2"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_empty());
    assert_eq!(store.users().len(), 1);

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn registered_user_can_log_in() {
    let (store, facade) = scenario().await;

    let (status, body) = facade
        .post_json(
            "/auth/register",
            json!({"email": "c@x.com", "hashedPassword": "p2", "name": "C"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["email"], "c@x.com");
    assert_eq!(store.users().len(), 2);

    let (status, body) = facade
        .post_json("/auth/login", json!({"email": "c@x.com", "password": "p2"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["success"], true);

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn trace_id_reaches_the_user_store() {
    let (store, facade) = scenario().await;

    let (_, trace_id, _) = facade
        .post("/auth/login", json!({"email": "a@x.com", "password": "p1"}))
        .await;
    let trace_id = trace_id.expect("trace-id header on response");
    assert_eq!(store.trace_ids(), [trace_id]);

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn store_failures_surface_as_gateway_errors() {
    let (store, facade) = scenario().await;
    store.with_state(|state| state.fail_status = Some(500));

    let (status, body) = facade
        .post_json("/auth/login", json!({"email": "a@x.com", "password": "p1"}))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "bad_gateway");
    assert!(body["traceId"].is_string());

    facade.stop().await;
    store.stop().await;
}

#[actix_web::test]
async fn unreachable_store_surfaces_as_service_unavailable() {
    let (store, facade) = scenario().await;
    store.stop().await;

    let (status, body) = facade
        .post_json(
            "/auth/register",
            json!({"email": "c@x.com", "hashedPassword": "p2", "name": "C"}),
        )
        .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");

    facade.stop().await;
}
