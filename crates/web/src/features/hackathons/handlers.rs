use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use storage::{
    Database,
    dto::common::{PaginatedResponse, PaginationParams},
    dto::hackathon::{HackathonFilter, HackathonListItem, MyHackathonEntry, ParticipantEntry},
    models::HackathonParticipant,
};
use uuid::Uuid;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/hackathons",
    params(HackathonFilter),
    responses(
        (status = 200, description = "List non-draft hackathons", body = PaginatedResponse<HackathonListItem>)
    ),
    tag = "hackathons"
)]
pub async fn list_hackathons(
    State(db): State<Database>,
    Query(filter): Query<HackathonFilter>,
) -> Result<Json<PaginatedResponse<HackathonListItem>>, WebError> {
    let page = services::list_hackathons(db.pool(), &filter).await?;

    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{id}",
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Hackathon found", body = HackathonListItem),
        (status = 404, description = "Hackathon not found or still draft")
    ),
    tag = "hackathons"
)]
pub async fn get_hackathon(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonListItem>, WebError> {
    let hackathon = services::get_hackathon(db.pool(), id).await?;

    Ok(Json(hackathon))
}

#[utoipa::path(
    get,
    path = "/api/hackathons/mine",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hackathons the student is registered for", body = Vec<MyHackathonEntry>)
    ),
    tag = "hackathons"
)]
pub async fn my_hackathons(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<MyHackathonEntry>>, WebError> {
    let entries = services::my_hackathons(db.pool(), user.user_id).await?;

    Ok(Json(entries))
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{id}/register",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Registered", body = HackathonParticipant),
        (status = 400, description = "Registration closed, deadline passed or hackathon full"),
        (status = 404, description = "Hackathon not found"),
        (status = 409, description = "Already registered")
    ),
    tag = "hackathons"
)]
pub async fn register(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonParticipant>, WebError> {
    let participant = services::register(db.pool(), user.user_id, id).await?;

    Ok(Json(participant))
}

#[utoipa::path(
    post,
    path = "/api/hackathons/{id}/withdraw",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Withdrawn", body = HackathonParticipant),
        (status = 400, description = "Not registered or still in a team")
    ),
    tag = "hackathons"
)]
pub async fn withdraw(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonParticipant>, WebError> {
    let participant = services::withdraw(db.pool(), user.user_id, id).await?;

    Ok(Json(participant))
}

#[utoipa::path(
    get,
    path = "/api/hackathons/{id}/participants",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Active participants", body = PaginatedResponse<ParticipantEntry>),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "hackathons"
)]
pub async fn list_participants(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedResponse<ParticipantEntry>>, WebError> {
    let page = services::list_participants(db.pool(), id, &pagination).await?;

    Ok(Json(page))
}
