//! Development reset endpoint.
//!
//! ```text
//! POST /api/reset-all
//! ```

use actix_web::{post, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageResponse};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Erase every user, claim, and profile, then end the caller's session.
#[utoipa::path(
    post,
    path = "/api/reset-all",
    responses(
        (status = 200, description = "All data removed", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "resetAll",
    security([])
)]
#[post("/reset-all")]
pub async fn reset_all(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<MessageResponse>> {
    state.reset.reset_all().await?;
    session.purge();
    Ok(web::Json(MessageResponse::new(
        "All data has been reset successfully",
    )))
}
