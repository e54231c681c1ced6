//! Public profile API handlers.
//!
//! ```text
//! POST /api/profile {"summary":"Relief hub","socialLinks":[{"name":"Facebook","link":"fb.me/hub"}]}
//! GET  /api/profile/brgy_org
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ProfileFields, SocialLink, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::json_body;

/// Named social link on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SocialLinkDto {
    #[schema(example = "Facebook")]
    pub name: String,
    #[schema(example = "https://facebook.com/brgy.org")]
    pub link: String,
}

impl From<SocialLinkDto> for SocialLink {
    fn from(value: SocialLinkDto) -> Self {
        Self {
            name: value.name,
            link: value.link,
        }
    }
}

impl From<&SocialLink> for SocialLinkDto {
    fn from(value: &SocialLink) -> Self {
        Self {
            name: value.name.clone(),
            link: value.link.clone(),
        }
    }
}

/// Body for `POST /api/profile`. Omitted fields are cleared.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub social_links: Option<Vec<SocialLinkDto>>,
}

impl From<ProfileRequest> for ProfileFields {
    fn from(value: ProfileRequest) -> Self {
        Self {
            summary: value.summary,
            email: value.email,
            phone: value.phone,
            social_links: value
                .social_links
                .map(|links| links.into_iter().map(SocialLink::from).collect()),
        }
    }
}

/// Acknowledgement for a saved profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveProfileResponse {
    pub success: bool,
    #[schema(example = "Profile saved")]
    pub message: String,
}

/// Public profile; unsaved profiles render with empty fields.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub username: String,
    pub summary: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub social_links: Vec<SocialLinkDto>,
}

impl ProfileView {
    fn empty(username: String) -> Self {
        Self {
            user_id: None,
            username,
            summary: None,
            email: None,
            phone: None,
            social_links: Vec::new(),
        }
    }
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        let fields = profile.fields();
        Self {
            user_id: Some(profile.user_id().to_string()),
            username: profile.username().to_string(),
            summary: fields.summary.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            social_links: fields
                .social_links
                .iter()
                .flatten()
                .map(SocialLinkDto::from)
                .collect(),
        }
    }
}

/// Save the signed-in user's public profile.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Profile saved", body = SaveProfileResponse),
        (status = 401, description = "Not authenticated or user gone", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "saveProfile"
)]
#[post("/profile")]
pub async fn save_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<ProfileRequest>, actix_web::Error>,
) -> ApiResult<web::Json<SaveProfileResponse>> {
    let user_id = session.require_user_id()?;
    let request = json_body(payload)?;
    state
        .profiles
        .save(&user_id, ProfileFields::from(request))
        .await?;
    Ok(web::Json(SaveProfileResponse {
        success: true,
        message: "Profile saved".to_owned(),
    }))
}

/// Fetch a public profile by username, matched case-insensitively.
#[utoipa::path(
    get,
    path = "/api/profile/{username}",
    params(("username" = String, Path, description = "Account name")),
    responses(
        (status = 200, description = "Saved profile or empty defaults", body = ProfileView),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "getProfile",
    security([])
)]
#[get("/profile/{username}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileView>> {
    let username = path.into_inner();
    let view = match state.profiles_query.fetch(&username).await? {
        Some(profile) => ProfileView::from(&profile),
        None => ProfileView::empty(username),
    };
    Ok(web::Json(view))
}

#[cfg(test)]
#[path = "profile_tests.rs"]
mod tests;
