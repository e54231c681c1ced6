//! Account API handlers.
//!
//! ```text
//! POST /api/auth/signup {"username":"brgy_org","password":"secret1"}
//! POST /api/auth/login  {"username":"brgy_org","password":"secret1"}
//! POST /api/auth/logout
//! GET  /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LoginCredentials, SignupCredentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{login_credentials_error, signup_credentials_error};

/// Body for signup and login.
///
/// Missing fields deserialise as empty strings so validation, not the JSON
/// extractor, reports them.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[schema(example = "brgy_org")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Public view of an account; never includes the password hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "brgy_org")]
    pub username: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// Response for signup and login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserView,
}

/// Response for `GET /api/auth/me`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: UserView,
}

/// Register an account and sign it in.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid input or username taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials =
        SignupCredentials::try_from_parts(&username, &password).map_err(signup_credentials_error)?;
    let user = state.accounts.signup(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User created successfully".to_owned(),
        user: UserView::from(&user),
    }))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(login_credentials_error)?;
    let user = state.accounts.login(&credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_owned(),
        user: UserView::from(&user),
    }))
}

/// End the caller's session.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session cleared", body = MessageResponse)),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> web::Json<MessageResponse> {
    session.purge();
    web::Json(MessageResponse::new("Logout successful"))
}

/// Return the signed-in account.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Not authenticated or user gone", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MeResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.current_user(&user_id).await?;
    Ok(web::Json(MeResponse {
        user: UserView::from(&user),
    }))
}
