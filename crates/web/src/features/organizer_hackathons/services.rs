use sqlx::PgPool;
use storage::dto::hackathon::{
    CreateHackathonRequest, HackathonListItem, UpdateHackathonRequest,
};
use storage::models::{Hackathon, HackathonStatus};
use storage::repository::hackathon::HackathonRepository;
use uuid::Uuid;

use crate::error::{DomainError, WebResult};

/// Ownership guard shared by every organizer-side mutation.
pub async fn verify_ownership(
    pool: &PgPool,
    organizer_id: Uuid,
    hackathon_id: Uuid,
) -> WebResult<Hackathon> {
    let repo = HackathonRepository::new(pool);
    let hackathon = repo
        .find_by_id(hackathon_id)
        .await?
        .ok_or(DomainError::HackathonNotFound)?;

    if hackathon.organizer_id != organizer_id {
        return Err(DomainError::NotOwner.into());
    }

    Ok(hackathon)
}

pub async fn my_hackathons(pool: &PgPool, organizer_id: Uuid) -> WebResult<Vec<HackathonListItem>> {
    let repo = HackathonRepository::new(pool);
    Ok(repo.list_for_organizer(organizer_id).await?)
}

pub async fn get_hackathon(
    pool: &PgPool,
    organizer_id: Uuid,
    hackathon_id: Uuid,
) -> WebResult<HackathonListItem> {
    verify_ownership(pool, organizer_id, hackathon_id).await?;

    let repo = HackathonRepository::new(pool);
    let item = repo
        .find_with_counts(hackathon_id)
        .await?
        .ok_or(DomainError::HackathonNotFound)?;

    Ok(item)
}

/// Create a hackathon in `draft`
pub async fn create_hackathon(
    pool: &PgPool,
    organizer_id: Uuid,
    req: &CreateHackathonRequest,
) -> WebResult<Hackathon> {
    if req.end_date <= req.start_date || req.registration_deadline > req.start_date {
        return Err(DomainError::InvalidDates.into());
    }
    if req.max_team_size_or_default() < req.min_team_size_or_default() {
        return Err(DomainError::InvalidTeamSize.into());
    }

    let repo = HackathonRepository::new(pool);
    Ok(repo.insert(organizer_id, req).await?)
}

pub async fn update_hackathon(
    pool: &PgPool,
    organizer_id: Uuid,
    hackathon_id: Uuid,
    req: &UpdateHackathonRequest,
) -> WebResult<Hackathon> {
    let existing = verify_ownership(pool, organizer_id, hackathon_id).await?;

    // validate the dates the row would end up with, not just the patch
    let start_date = req.start_date.unwrap_or(existing.start_date);
    let end_date = req.end_date.unwrap_or(existing.end_date);
    let registration_deadline = req
        .registration_deadline
        .unwrap_or(existing.registration_deadline);
    if end_date <= start_date || registration_deadline > start_date {
        return Err(DomainError::InvalidDates.into());
    }

    let repo = HackathonRepository::new(pool);
    Ok(repo.update(hackathon_id, req).await?)
}

/// Move a hackathon through its lifecycle. Only the transitions of the
/// forward-only state machine are accepted.
pub async fn update_status(
    pool: &PgPool,
    organizer_id: Uuid,
    hackathon_id: Uuid,
    next: HackathonStatus,
) -> WebResult<Hackathon> {
    let hackathon = verify_ownership(pool, organizer_id, hackathon_id).await?;

    if !hackathon.status.can_transition_to(next) {
        return Err(DomainError::InvalidTransition {
            from: hackathon.status,
            to: next,
        }
        .into());
    }

    let repo = HackathonRepository::new(pool);
    let updated = repo.set_status(hackathon_id, next).await?;

    tracing::info!(
        hackathon_id = %hackathon_id,
        from = %hackathon.status,
        to = %next,
        "hackathon status changed"
    );

    Ok(updated)
}

/// Shorthand for the draft → registration_open transition
pub async fn publish(pool: &PgPool, organizer_id: Uuid, hackathon_id: Uuid) -> WebResult<Hackathon> {
    update_status(
        pool,
        organizer_id,
        hackathon_id,
        HackathonStatus::RegistrationOpen,
    )
    .await
}

pub async fn cancel(pool: &PgPool, organizer_id: Uuid, hackathon_id: Uuid) -> WebResult<Hackathon> {
    update_status(pool, organizer_id, hackathon_id, HackathonStatus::Cancelled).await
}
