use chrono::{Duration, Utc};
use sqlx::PgPool;
use storage::dto::common::UserSummary;
use storage::dto::invitation::PendingInvitationEntry;
use storage::dto::team::{
    CreateTeamRequest, MyTeamEntry, TeamDetailResponse, TeamResponse, UpdateTeamRequest,
};
use storage::dto::hackathon::HackathonSummary;
use storage::error::StorageError;
use storage::models::{
    InvitationStatus, MemberRole, ParticipantStatus, Team, TeamInvitation, TeamStatus, UserRole,
};
use storage::repository::hackathon::HackathonRepository;
use storage::repository::invitation::InvitationRepository;
use storage::repository::participant::ParticipantRepository;
use storage::repository::team::TeamRepository;
use storage::repository::user::UserRepository;
use uuid::Uuid;

use crate::error::{DomainError, WebError, WebResult};

const INVITATION_TTL_DAYS: i64 = 7;

pub async fn my_teams(pool: &PgPool, user_id: Uuid) -> WebResult<Vec<MyTeamEntry>> {
    let repo = TeamRepository::new(pool);
    Ok(repo.list_for_user(user_id).await?)
}

pub async fn get_team(pool: &PgPool, team_id: Uuid) -> WebResult<TeamDetailResponse> {
    let teams = TeamRepository::new(pool);
    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    let hackathon = HackathonRepository::new(pool)
        .find_by_id(team.hackathon_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let creator = UserRepository::new(pool)
        .find_by_id(team.creator_id)
        .await?
        .ok_or(StorageError::NotFound)?;

    let members = teams.members_with_users(team_id).await?;
    let open_spots = team.open_spots();

    Ok(TeamDetailResponse {
        hackathon: HackathonSummary {
            hackathon_id: hackathon.hackathon_id,
            title: hackathon.title,
            status: hackathon.status,
        },
        creator: UserSummary {
            user_id: creator.user_id,
            username: creator.username,
            full_name: creator.full_name,
            avatar_url: creator.avatar_url,
        },
        members,
        open_spots,
        team: TeamResponse::from(team),
    })
}

/// Create a team and seat its captain.
///
/// Team row, captain membership and the participant flip to `in_team`
/// commit together; a partial write would let the captain join a second
/// team before the flip lands.
pub async fn create_team(pool: &PgPool, user_id: Uuid, req: &CreateTeamRequest) -> WebResult<Team> {
    let hackathon = HackathonRepository::new(pool)
        .find_by_id(req.hackathon_id)
        .await?
        .ok_or(DomainError::HackathonNotFound)?;

    if !hackathon.status.accepts_teams() {
        return Err(DomainError::HackathonNotActive.into());
    }

    let participant = ParticipantRepository::new(pool)
        .find(req.hackathon_id, user_id)
        .await?
        .filter(|p| p.is_active())
        .ok_or(DomainError::NotRegistered)?;

    if participant.status == ParticipantStatus::InTeam {
        return Err(DomainError::AlreadyInTeam.into());
    }

    let max_size = req.max_size.unwrap_or(hackathon.max_team_size);
    if max_size < hackathon.min_team_size || max_size > hackathon.max_team_size {
        return Err(DomainError::InvalidTeamSize.into());
    }

    let mut tx = pool.begin().await.map_err(StorageError::from)?;

    let team = TeamRepository::insert(&mut tx, req.hackathon_id, user_id, req, max_size).await?;
    TeamRepository::insert_member(&mut tx, team.team_id, user_id, MemberRole::Captain).await?;
    ParticipantRepository::assign_team(&mut tx, participant.participant_id, team.team_id).await?;

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(team_id = %team.team_id, hackathon_id = %team.hackathon_id, "team created");

    Ok(team)
}

pub async fn update_team(
    pool: &PgPool,
    user_id: Uuid,
    team_id: Uuid,
    req: &UpdateTeamRequest,
) -> WebResult<Team> {
    let teams = TeamRepository::new(pool);

    if teams.find_by_id(team_id).await?.is_none() {
        return Err(DomainError::TeamNotFound.into());
    }

    let membership = teams.find_member(team_id, user_id).await?;
    if !matches!(membership, Some(m) if m.role == MemberRole::Captain) {
        return Err(DomainError::NotCaptain.into());
    }

    Ok(teams.update_profile(team_id, req).await?)
}

/// Disband a forming team. Members return to `registered`, invitations and
/// memberships go before the team row does (children before parent).
pub async fn delete_team(pool: &PgPool, user_id: Uuid, team_id: Uuid) -> WebResult<()> {
    let team = TeamRepository::new(pool)
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    if team.creator_id != user_id {
        return Err(DomainError::NotCaptain.into());
    }
    if team.status != TeamStatus::Forming {
        return Err(DomainError::TeamNotForming.into());
    }

    let mut tx = pool.begin().await.map_err(StorageError::from)?;

    ParticipantRepository::clear_team_members(&mut tx, team_id).await?;
    InvitationRepository::delete_for_team(&mut tx, team_id).await?;
    TeamRepository::delete_members(&mut tx, team_id).await?;
    TeamRepository::delete(&mut tx, team_id).await?;

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(team_id = %team_id, "team disbanded");

    Ok(())
}

pub async fn leave_team(pool: &PgPool, user_id: Uuid, team_id: Uuid) -> WebResult<()> {
    let teams = TeamRepository::new(pool);

    let membership = teams
        .find_member(team_id, user_id)
        .await?
        .ok_or(DomainError::NotAMember)?;

    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    // no captaincy transfer exists; disbanding is the only way out
    if membership.role == MemberRole::Captain {
        return Err(DomainError::CaptainCannotLeave.into());
    }

    let mut tx = pool.begin().await.map_err(StorageError::from)?;

    TeamRepository::delete_member(&mut tx, team_id, user_id).await?;
    TeamRepository::release_slot(&mut tx, team_id).await?;
    ParticipantRepository::clear_team(&mut tx, user_id, team.hackathon_id).await?;

    tx.commit().await.map_err(StorageError::from)?;

    Ok(())
}

/// Invite an eligible student to a forming team. Any member may invite.
pub async fn invite_to_team(
    pool: &PgPool,
    inviter_id: Uuid,
    team_id: Uuid,
    invitee_id: Uuid,
    message: Option<&str>,
) -> WebResult<TeamInvitation> {
    let teams = TeamRepository::new(pool);

    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    if team.status != TeamStatus::Forming {
        return Err(DomainError::TeamNotForming.into());
    }
    if team.is_full() {
        return Err(DomainError::TeamFull.into());
    }

    if teams.find_member(team_id, inviter_id).await?.is_none() {
        return Err(DomainError::NotAMember.into());
    }

    let invitee = UserRepository::new(pool).find_by_id(invitee_id).await?;
    if !matches!(invitee, Some(ref u) if u.role == UserRole::Student) {
        return Err(DomainError::InviteeNotFound.into());
    }

    let invitee_participant = ParticipantRepository::new(pool)
        .find(team.hackathon_id, invitee_id)
        .await?
        .filter(|p| p.is_active())
        .ok_or(DomainError::InviteeNotRegistered)?;

    if invitee_participant.status == ParticipantStatus::InTeam {
        return Err(DomainError::InviteeAlreadyInTeam.into());
    }

    let invitations = InvitationRepository::new(pool);
    if invitations
        .find_pending(team_id, invitee_id)
        .await?
        .is_some()
    {
        return Err(DomainError::AlreadyInvited.into());
    }

    let expires_at = Utc::now() + Duration::days(INVITATION_TTL_DAYS);
    let invitation = invitations
        .insert(team_id, inviter_id, invitee_id, message, expires_at)
        .await
        .map_err(|e| {
            // lost the race against a concurrent identical invite
            if e.is_unique_violation() || matches!(e, StorageError::ConstraintViolation(_)) {
                WebError::from(DomainError::AlreadyInvited)
            } else {
                WebError::from(e)
            }
        })?;

    Ok(invitation)
}

pub async fn my_invitations(pool: &PgPool, user_id: Uuid) -> WebResult<Vec<PendingInvitationEntry>> {
    let repo = InvitationRepository::new(pool);
    Ok(repo.list_pending_for_user(user_id).await?)
}

/// Accept or reject an invitation.
///
/// Expiry is resolved lazily here. On accept the seat is claimed with a
/// conditional increment inside the transaction, so two invitees racing for
/// the last open slot cannot both join.
pub async fn respond_to_invitation(
    pool: &PgPool,
    user_id: Uuid,
    invitation_id: Uuid,
    accept: bool,
) -> WebResult<TeamInvitation> {
    let invitations = InvitationRepository::new(pool);

    let invitation = invitations
        .find_by_id(invitation_id)
        .await?
        .filter(|i| i.invitee_id == user_id)
        .ok_or(DomainError::InvitationNotFound)?;

    if invitation.status != InvitationStatus::Pending {
        return Err(DomainError::InvitationNotPending.into());
    }

    if invitation.is_expired(Utc::now()) {
        invitations.mark_expired(invitation_id).await?;
        return Err(DomainError::InvitationExpired.into());
    }

    if !accept {
        return Ok(invitations.mark_rejected(invitation_id).await?);
    }

    let team = TeamRepository::new(pool)
        .find_by_id(invitation.team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    let participant = ParticipantRepository::new(pool)
        .find(team.hackathon_id, user_id)
        .await?;

    if matches!(participant.as_ref(), Some(p) if p.status == ParticipantStatus::InTeam) {
        return Err(DomainError::AlreadyInTeam.into());
    }

    let mut tx = pool.begin().await.map_err(StorageError::from)?;

    if !TeamRepository::claim_slot(&mut tx, team.team_id).await? {
        tx.rollback().await.map_err(StorageError::from)?;
        return Err(DomainError::TeamFull.into());
    }

    let accepted = InvitationRepository::mark_accepted(&mut tx, invitation_id).await?;
    TeamRepository::insert_member(&mut tx, team.team_id, user_id, MemberRole::Member).await?;
    if let Some(participant) = participant {
        ParticipantRepository::assign_team(&mut tx, participant.participant_id, team.team_id)
            .await?;
    }

    tx.commit().await.map_err(StorageError::from)?;

    tracing::info!(team_id = %team.team_id, invitation_id = %invitation_id, "invitation accepted");

    Ok(accepted)
}
