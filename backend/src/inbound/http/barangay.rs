//! Barangay claim API handlers.
//!
//! ```text
//! POST /api/barangay/claim {"barangayCode":"PH137401001"}
//! GET  /api/barangay/claim/PH137401001
//! GET  /api/barangay/claims
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BarangayClaim, BarangayCode, ClaimStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{barangay_code_error, json_body};

/// Body for `POST /api/barangay/claim`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(default)]
    #[schema(example = "PH137401001")]
    pub barangay_code: String,
}

/// Wire form of a claim.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimView {
    #[schema(example = "PH137401001")]
    pub barangay_code: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "brgy_org")]
    pub username: String,
    /// Milliseconds since the Unix epoch.
    #[schema(example = 1_700_000_000_000_i64)]
    pub claimed_at: i64,
}

impl From<&BarangayClaim> for ClaimView {
    fn from(claim: &BarangayClaim) -> Self {
        Self {
            barangay_code: claim.barangay_code().to_string(),
            user_id: claim.user_id().to_string(),
            username: claim.username().to_string(),
            claimed_at: claim.claimed_at_millis(),
        }
    }
}

/// Response for a successful claim.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimResponse {
    pub success: bool,
    pub claim: ClaimView,
}

/// Claim status of one barangay.
///
/// `claimant` and `claimedAt` are present only when `claimed` is true.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatusResponse {
    pub claimed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "brgy_org")]
    pub claimant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<i64>,
}

impl From<ClaimStatus> for ClaimStatusResponse {
    fn from(status: ClaimStatus) -> Self {
        match status {
            ClaimStatus::Unclaimed => Self {
                claimed: false,
                claimant: None,
                claimed_at: None,
            },
            ClaimStatus::Claimed(claim) => Self {
                claimed: true,
                claimant: Some(claim.username().to_string()),
                claimed_at: Some(claim.claimed_at_millis()),
            },
        }
    }
}

/// Every claim, oldest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimsResponse {
    pub claims: Vec<ClaimView>,
}

/// Claim a barangay for the signed-in user.
#[utoipa::path(
    post,
    path = "/api/barangay/claim",
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "Barangay claimed", body = ClaimResponse),
        (status = 400, description = "Missing or invalid barangay code", body = ErrorSchema),
        (status = 401, description = "Not authenticated", body = ErrorSchema),
        (status = 409, description = "Barangay already claimed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["barangay"],
    operation_id = "claimBarangay"
)]
#[post("/barangay/claim")]
pub async fn claim_barangay(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<ClaimRequest>, actix_web::Error>,
) -> ApiResult<web::Json<ClaimResponse>> {
    let user_id = session.require_user_id()?;
    let request = json_body(payload)?;
    let code = BarangayCode::new(request.barangay_code).map_err(barangay_code_error)?;
    let claim = state.claims.claim(&user_id, &code).await?;
    Ok(web::Json(ClaimResponse {
        success: true,
        claim: ClaimView::from(&claim),
    }))
}

/// Look up whether a barangay is claimed.
///
/// A code that could never be claimed reports `claimed: false`.
#[utoipa::path(
    get,
    path = "/api/barangay/claim/{code}",
    params(("code" = String, Path, description = "Barangay (ADM4) code")),
    responses(
        (status = 200, description = "Claim status", body = ClaimStatusResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["barangay"],
    operation_id = "getBarangayClaim",
    security([])
)]
#[get("/barangay/claim/{code}")]
pub async fn claim_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ClaimStatusResponse>> {
    let Ok(code) = BarangayCode::new(path.into_inner()) else {
        return Ok(web::Json(ClaimStatusResponse::from(ClaimStatus::Unclaimed)));
    };
    let status = state.claims_query.status(&code).await?;
    Ok(web::Json(ClaimStatusResponse::from(status)))
}

/// List every claim.
#[utoipa::path(
    get,
    path = "/api/barangay/claims",
    responses(
        (status = 200, description = "All claims", body = ClaimsResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["barangay"],
    operation_id = "listBarangayClaims",
    security([])
)]
#[get("/barangay/claims")]
pub async fn list_claims(state: web::Data<HttpState>) -> ApiResult<web::Json<ClaimsResponse>> {
    let claims = state.claims_query.list().await?;
    Ok(web::Json(ClaimsResponse {
        claims: claims.iter().map(ClaimView::from).collect(),
    }))
}

#[cfg(test)]
#[path = "barangay_tests.rs"]
mod tests;
