use chrono::Utc;
use sqlx::PgPool;
use storage::dto::common::{PaginatedResponse, PaginationParams};
use storage::dto::hackathon::{
    HackathonFilter, HackathonListItem, MyHackathonEntry, ParticipantEntry,
};
use storage::models::{HackathonParticipant, HackathonStatus, ParticipantStatus};
use storage::repository::hackathon::HackathonRepository;
use storage::repository::participant::ParticipantRepository;
use uuid::Uuid;

use crate::error::{DomainError, WebError, WebResult};

/// Browse non-draft hackathons with optional status filter and search
pub async fn list_hackathons(
    pool: &PgPool,
    filter: &HackathonFilter,
) -> WebResult<PaginatedResponse<HackathonListItem>> {
    let pagination = filter.pagination();
    pagination.validate().map_err(WebError::BadRequest)?;

    let repo = HackathonRepository::new(pool);
    let (items, total) = repo.list_public(filter).await?;

    Ok(PaginatedResponse::new(
        items,
        pagination.page,
        pagination.page_size,
        total,
    ))
}

/// Hackathon detail; drafts stay invisible outside the organizer view
pub async fn get_hackathon(pool: &PgPool, hackathon_id: Uuid) -> WebResult<HackathonListItem> {
    let repo = HackathonRepository::new(pool);
    let item = repo
        .find_with_counts(hackathon_id)
        .await?
        .ok_or(DomainError::HackathonNotFound)?;

    if item.hackathon.status == HackathonStatus::Draft {
        return Err(DomainError::HackathonNotFound.into());
    }

    Ok(item)
}

/// Register the student for a hackathon.
///
/// A withdrawn row is reactivated with a fresh timestamp so the (hackathon,
/// user) pair never grows a second row. The capacity gate is a plain count;
/// see the repository note on the accepted race.
pub async fn register(
    pool: &PgPool,
    user_id: Uuid,
    hackathon_id: Uuid,
) -> WebResult<HackathonParticipant> {
    let hackathons = HackathonRepository::new(pool);
    let participants = ParticipantRepository::new(pool);

    let hackathon = hackathons
        .find_by_id(hackathon_id)
        .await?
        .ok_or(DomainError::HackathonNotFound)?;

    if hackathon.status != HackathonStatus::RegistrationOpen {
        return Err(DomainError::RegistrationClosed.into());
    }
    if hackathon.registration_deadline < Utc::now() {
        return Err(DomainError::RegistrationDeadlinePassed.into());
    }
    if let Some(max_participants) = hackathon.max_participants {
        let count = participants.count_active(hackathon_id).await?;
        if count >= max_participants as i64 {
            return Err(DomainError::HackathonFull.into());
        }
    }

    match participants.find(hackathon_id, user_id).await? {
        Some(existing) if existing.status == ParticipantStatus::Withdrawn => {
            Ok(participants.reactivate(existing.participant_id).await?)
        }
        Some(_) => Err(DomainError::AlreadyRegistered.into()),
        None => Ok(participants.insert(hackathon_id, user_id).await?),
    }
}

/// Withdraw from a hackathon. Team members must leave their team first:
/// membership, not registration, is the source of truth for commitment.
pub async fn withdraw(
    pool: &PgPool,
    user_id: Uuid,
    hackathon_id: Uuid,
) -> WebResult<HackathonParticipant> {
    let participants = ParticipantRepository::new(pool);

    let participant = participants
        .find(hackathon_id, user_id)
        .await?
        .filter(|p| p.is_active())
        .ok_or(DomainError::NotRegistered)?;

    if participant.status == ParticipantStatus::InTeam {
        return Err(DomainError::InTeam.into());
    }

    Ok(participants
        .mark_withdrawn(participant.participant_id)
        .await?)
}

pub async fn my_hackathons(pool: &PgPool, user_id: Uuid) -> WebResult<Vec<MyHackathonEntry>> {
    let repo = ParticipantRepository::new(pool);
    Ok(repo.list_for_user(user_id).await?)
}

pub async fn list_participants(
    pool: &PgPool,
    hackathon_id: Uuid,
    pagination: &PaginationParams,
) -> WebResult<PaginatedResponse<ParticipantEntry>> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let hackathons = HackathonRepository::new(pool);
    if hackathons.find_by_id(hackathon_id).await?.is_none() {
        return Err(DomainError::HackathonNotFound.into());
    }

    let participants = ParticipantRepository::new(pool);
    let (entries, total) = participants.list_active(hackathon_id, pagination).await?;

    Ok(PaginatedResponse::new(
        entries,
        pagination.page,
        pagination.page_size,
        total,
    ))
}
