use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::hackathon::{
        CreateHackathonRequest, HackathonListItem, HackathonResponse, StatusUpdateRequest,
        UpdateHackathonRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/organizer/hackathons",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Hackathons owned by the caller", body = Vec<HackathonListItem>)
    ),
    tag = "organizer"
)]
pub async fn my_hackathons(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<HackathonListItem>>, WebError> {
    let hackathons = services::my_hackathons(db.pool(), user.user_id).await?;

    Ok(Json(hackathons))
}

#[utoipa::path(
    get,
    path = "/api/organizer/hackathons/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Hackathon detail", body = HackathonListItem),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "organizer"
)]
pub async fn get_hackathon(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonListItem>, WebError> {
    let hackathon = services::get_hackathon(db.pool(), user.user_id, id).await?;

    Ok(Json(hackathon))
}

#[utoipa::path(
    post,
    path = "/api/organizer/hackathons",
    security(("bearer_auth" = [])),
    request_body = CreateHackathonRequest,
    responses(
        (status = 201, description = "Hackathon created as draft", body = HackathonResponse),
        (status = 400, description = "Validation error or inconsistent dates")
    ),
    tag = "organizer"
)]
pub async fn create_hackathon(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<CreateHackathonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let hackathon = services::create_hackathon(db.pool(), user.user_id, &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(HackathonResponse::from(hackathon)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/organizer/hackathons/{id}",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    request_body = UpdateHackathonRequest,
    responses(
        (status = 200, description = "Hackathon updated", body = HackathonResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Hackathon not found")
    ),
    tag = "organizer"
)]
pub async fn update_hackathon(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateHackathonRequest>,
) -> Result<Json<HackathonResponse>, WebError> {
    req.validate()?;

    let hackathon = services::update_hackathon(db.pool(), user.user_id, id, &req).await?;

    Ok(Json(HackathonResponse::from(hackathon)))
}

#[utoipa::path(
    post,
    path = "/api/organizer/hackathons/{id}/publish",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Registration opened", body = HackathonResponse),
        (status = 400, description = "Not in draft"),
        (status = 403, description = "Not the owner")
    ),
    tag = "organizer"
)]
pub async fn publish_hackathon(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonResponse>, WebError> {
    let hackathon = services::publish(db.pool(), user.user_id, id).await?;

    Ok(Json(HackathonResponse::from(hackathon)))
}

#[utoipa::path(
    post,
    path = "/api/organizer/hackathons/{id}/status",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = HackathonResponse),
        (status = 400, description = "Illegal transition"),
        (status = 403, description = "Not the owner")
    ),
    tag = "organizer"
)]
pub async fn update_status(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<Json<HackathonResponse>, WebError> {
    let hackathon = services::update_status(db.pool(), user.user_id, id, req.status).await?;

    Ok(Json(HackathonResponse::from(hackathon)))
}

#[utoipa::path(
    post,
    path = "/api/organizer/hackathons/{id}/cancel",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Hackathon id")
    ),
    responses(
        (status = 200, description = "Hackathon cancelled", body = HackathonResponse),
        (status = 400, description = "Already in a terminal state"),
        (status = 403, description = "Not the owner")
    ),
    tag = "organizer"
)]
pub async fn cancel_hackathon(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HackathonResponse>, WebError> {
    let hackathon = services::cancel(db.pool(), user.user_id, id).await?;

    Ok(Json(HackathonResponse::from(hackathon)))
}
