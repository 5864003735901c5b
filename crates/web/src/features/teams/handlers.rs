use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{
    Database,
    dto::invitation::{
        InvitationResponse, InviteRequest, PendingInvitationEntry, RespondToInvitationRequest,
    },
    dto::team::{CreateTeamRequest, MyTeamEntry, TeamDetailResponse, TeamResponse, UpdateTeamRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/teams",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Teams the caller belongs to", body = Vec<MyTeamEntry>)
    ),
    tag = "teams"
)]
pub async fn my_teams(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MyTeamEntry>>, WebError> {
    let teams = services::my_teams(db.pool(), user.user_id).await?;

    Ok(Json(teams))
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Team detail", body = TeamDetailResponse),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamDetailResponse>, WebError> {
    let team = services::get_team(db.pool(), id).await?;

    Ok(Json(team))
}

#[utoipa::path(
    post,
    path = "/api/teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created with the caller as captain", body = TeamResponse),
        (status = 400, description = "Hackathon not active, caller not registered or bad size"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Caller already in a team")
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let team = services::create_team(db.pool(), user.user_id, &req).await?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(team))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, WebError> {
    req.validate()?;

    let team = services::update_team(db.pool(), user.user_id, id, &req).await?;

    Ok(Json(TeamResponse::from(team)))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Team disbanded, members back to registered"),
        (status = 400, description = "Team is no longer forming"),
        (status = 403, description = "Caller is not the captain"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, WebError> {
    services::delete_team(db.pool(), user.user_id, id).await?;

    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/leave",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    responses(
        (status = 200, description = "Left the team"),
        (status = 400, description = "Captain cannot leave"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Team not found")
    ),
    tag = "teams"
)]
pub async fn leave_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, WebError> {
    services::leave_team(db.pool(), user.user_id, id).await?;

    Ok(Json(json!({ "success": true })))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/invite",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Team id")
    ),
    request_body = InviteRequest,
    responses(
        (status = 201, description = "Invitation sent", body = InvitationResponse),
        (status = 400, description = "Team full, not forming, or invitee not registered"),
        (status = 403, description = "Caller is not a member"),
        (status = 404, description = "Team or invitee not found"),
        (status = 409, description = "Invitee already in a team or already invited")
    ),
    tag = "teams"
)]
pub async fn invite_to_team(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<InviteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let invitation =
        services::invite_to_team(db.pool(), user.user_id, id, req.user_id, req.message.as_deref())
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(InvitationResponse::from(invitation)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/teams/invitations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Pending invitations for the caller", body = Vec<PendingInvitationEntry>)
    ),
    tag = "teams"
)]
pub async fn my_invitations(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<PendingInvitationEntry>>, WebError> {
    let invitations = services::my_invitations(db.pool(), user.user_id).await?;

    Ok(Json(invitations))
}

#[utoipa::path(
    post,
    path = "/api/teams/invitations/{id}/respond",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Invitation id")
    ),
    request_body = RespondToInvitationRequest,
    responses(
        (status = 200, description = "Invitation resolved", body = InvitationResponse),
        (status = 400, description = "Invitation expired, no longer pending, or team filled up"),
        (status = 404, description = "Invitation not found"),
        (status = 409, description = "Caller joined another team meanwhile")
    ),
    tag = "teams"
)]
pub async fn respond_to_invitation(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondToInvitationRequest>,
) -> Result<Json<InvitationResponse>, WebError> {
    let invitation =
        services::respond_to_invitation(db.pool(), user.user_id, id, req.accept).await?;

    Ok(Json(InvitationResponse::from(invitation)))
}
