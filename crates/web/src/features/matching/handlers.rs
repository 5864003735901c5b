use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use storage::{
    Database,
    dto::invitation::InvitationResponse,
    dto::matching::MatchesResponse,
};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::client::MatchingClient;
use super::services;

const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize, IntoParams)]
pub struct MatchQuery {
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/matches",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id"),
        MatchQuery
    ),
    responses(
        (status = 200, description = "Ranked teammate suggestions", body = MatchesResponse),
        (status = 400, description = "Team is already full"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Team not found")
    ),
    tag = "matching"
)]
pub async fn get_matches(
    State(db): State<Database>,
    Extension(client): Extension<MatchingClient>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<MatchQuery>,
) -> Result<Json<MatchesResponse>, WebError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    let matches = services::get_matches(db.pool(), &client, user.user_id, id, limit).await?;

    Ok(Json(matches))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/matches/{user_id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id"),
        ("user_id" = Uuid, Path, description = "Suggested candidate to invite")
    ),
    responses(
        (status = 201, description = "Invitation sent to the suggested candidate", body = InvitationResponse),
        (status = 400, description = "Team full or candidate not available"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Team or candidate not found"),
        (status = 409, description = "Candidate already invited or already in a team")
    ),
    tag = "matching"
)]
pub async fn invite_match(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path((id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<Response, WebError> {
    let invitation = services::invite_match(db.pool(), user.user_id, id, candidate_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(InvitationResponse::from(invitation)),
    )
        .into_response())
}
