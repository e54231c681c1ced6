//! Shared harness for HTTP-level integration tests.
//!
//! Builds the production route table over a store persisted to a temporary
//! JSON file, with the fixture password hasher so tests stay fast.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_http::Request;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};
use tempfile::TempDir;

use relief_backend::Trace;
use relief_backend::domain::ports::FixturePasswordHasher;
use relief_backend::inbound::http::api_services;
use relief_backend::inbound::http::session_config::{SESSION_COOKIE_NAME, SessionSettings};
use relief_backend::inbound::http::state::HttpState;
use relief_backend::outbound::{JsonFileSnapshotRepository, MemoryStore};

/// Temporary data directory plus the snapshot path inside it.
pub struct DataDir {
    _dir: TempDir,
    path: PathBuf,
}

impl DataDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("data").join("relief.json");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Open a store over the snapshot at `path`.
pub fn open_store(path: &Path) -> Arc<MemoryStore> {
    let repository = JsonFileSnapshotRepository::open(path).expect("snapshot repository");
    let store =
        MemoryStore::open(Arc::new(repository), Arc::new(DefaultClock)).expect("store opens");
    Arc::new(store)
}

/// Session settings suitable for plain-HTTP tests.
pub fn session_settings() -> SessionSettings {
    SessionSettings {
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

/// The `/api` route table over `store`.
pub fn app(
    store: Arc<MemoryStore>,
    session: &SessionSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let state = HttpState::from_store(store, Arc::new(FixturePasswordHasher));
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(session.middleware())
                .configure(api_services),
        )
}

/// Send `req` and decode the JSON body alongside the status code.
pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: test::TestRequest,
) -> (u16, Value, Option<Cookie<'static>>) {
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status().as_u16();
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned);
    let body: Value = test::read_body_json(res).await;
    (status, body, cookie)
}

/// Sign up and return the new user's id and session cookie.
pub async fn signup(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> (String, Cookie<'static>) {
    let (status, body, cookie) = send(
        app,
        test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, 201, "signup failed: {body}");
    let id = body["user"]["id"].as_str().expect("user id").to_owned();
    (id, cookie.expect("session cookie"))
}

/// Claim `code` with the given session.
pub async fn claim(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    cookie: &Cookie<'static>,
    code: &str,
) -> (u16, Value) {
    let (status, body, _) = send(
        app,
        test::TestRequest::post()
            .uri("/api/barangay/claim")
            .cookie(cookie.clone())
            .set_json(json!({ "barangayCode": code })),
    )
    .await;
    (status, body)
}
