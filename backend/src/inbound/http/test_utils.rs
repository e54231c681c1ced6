//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use crate::domain::ports::{FixturePasswordHasher, NoopSnapshotRepository};
use crate::inbound::http::api_services;
use crate::inbound::http::auth::CredentialsRequest;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::MemoryStore;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation and disables the `Secure` flag for
/// local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// Clock frozen at a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Milliseconds since the epoch reported by [`memory_state`]'s clock.
pub const FIXED_NOW_MILLIS: i64 = 1_700_000_000_000;

/// HTTP state over a memory-only store with the fast fixture hasher.
pub fn memory_state() -> HttpState {
    let now = DateTime::<Utc>::from_timestamp_millis(FIXED_NOW_MILLIS).expect("fixed timestamp");
    let store = MemoryStore::open(Arc::new(NoopSnapshotRepository), Arc::new(FixedClock(now)))
        .expect("memory store");
    HttpState::from_store(Arc::new(store), Arc::new(FixturePasswordHasher))
}

/// Application exposing every `/api` handler over `state`.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(
            web::scope("/api")
                .wrap(test_session_middleware())
                .configure(api_services),
        )
}

/// Pull the session cookie out of a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .expect("session cookie")
        .into_owned()
}

/// Sign up `username` and return the session cookie.
pub async fn signup_cookie(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> Cookie<'static> {
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(CredentialsRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request();
    let res = test::call_service(app, req).await;
    assert!(res.status().is_success(), "signup failed: {}", res.status());
    session_cookie(&res)
}
