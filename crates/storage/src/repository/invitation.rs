use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::UserSummary;
use crate::dto::hackathon::HackathonSummary;
use crate::dto::invitation::{InvitedTeamSummary, PendingInvitationEntry};
use crate::error::{Result, StorageError};
use crate::models::{HackathonStatus, InvitationStatus, TeamInvitation};

const INVITATION_COLUMNS: &str = "invitation_id, team_id, inviter_id, invitee_id, status, \
     message, created_at, expires_at, responded_at";

#[derive(FromRow)]
struct PendingInvitationRow {
    invitation_id: Uuid,
    message: Option<String>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    team_id: Uuid,
    team_name: String,
    current_size: i32,
    max_size: i32,
    hackathon_id: Uuid,
    hackathon_title: String,
    hackathon_status: HackathonStatus,
    inviter_id: Uuid,
    inviter_username: String,
    inviter_full_name: String,
    inviter_avatar_url: Option<String>,
}

/// Repository for team invitation database operations
pub struct InvitationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> InvitationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, invitation_id: Uuid) -> Result<Option<TeamInvitation>> {
        let sql =
            format!("SELECT {INVITATION_COLUMNS} FROM team_invitations WHERE invitation_id = $1");
        let invitation = sqlx::query_as::<_, TeamInvitation>(&sql)
            .bind(invitation_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(invitation)
    }

    pub async fn find_pending(
        &self,
        team_id: Uuid,
        invitee_id: Uuid,
    ) -> Result<Option<TeamInvitation>> {
        let sql = format!(
            "SELECT {INVITATION_COLUMNS} FROM team_invitations \
             WHERE team_id = $1 AND invitee_id = $2 AND status = $3"
        );
        let invitation = sqlx::query_as::<_, TeamInvitation>(&sql)
            .bind(team_id)
            .bind(invitee_id)
            .bind(InvitationStatus::Pending)
            .fetch_optional(self.pool)
            .await?;

        Ok(invitation)
    }

    pub async fn insert(
        &self,
        team_id: Uuid,
        inviter_id: Uuid,
        invitee_id: Uuid,
        message: Option<&str>,
        expires_at: DateTime<Utc>,
    ) -> Result<TeamInvitation> {
        let sql = format!(
            "INSERT INTO team_invitations (team_id, inviter_id, invitee_id, status, message, expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {INVITATION_COLUMNS}"
        );

        let invitation = sqlx::query_as::<_, TeamInvitation>(&sql)
            .bind(team_id)
            .bind(inviter_id)
            .bind(invitee_id)
            .bind(InvitationStatus::Pending)
            .bind(message)
            .bind(expires_at)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                // Partial unique index on pending (team, invitee) pairs
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23505") {
                        return StorageError::ConstraintViolation(
                            "User already has a pending invitation".to_string(),
                        );
                    }
                }
                StorageError::from(e)
            })?;

        Ok(invitation)
    }

    pub async fn mark_expired(&self, invitation_id: Uuid) -> Result<TeamInvitation> {
        self.set_status(invitation_id, InvitationStatus::Expired, false)
            .await
    }

    pub async fn mark_rejected(&self, invitation_id: Uuid) -> Result<TeamInvitation> {
        self.set_status(invitation_id, InvitationStatus::Rejected, true)
            .await
    }

    async fn set_status(
        &self,
        invitation_id: Uuid,
        status: InvitationStatus,
        responded: bool,
    ) -> Result<TeamInvitation> {
        let sql = format!(
            "UPDATE team_invitations \
             SET status = $2, responded_at = CASE WHEN $3 THEN now() ELSE responded_at END \
             WHERE invitation_id = $1 \
             RETURNING {INVITATION_COLUMNS}"
        );
        let invitation = sqlx::query_as::<_, TeamInvitation>(&sql)
            .bind(invitation_id)
            .bind(status)
            .bind(responded)
            .fetch_one(self.pool)
            .await?;

        Ok(invitation)
    }

    pub async fn mark_accepted(
        conn: &mut PgConnection,
        invitation_id: Uuid,
    ) -> Result<TeamInvitation> {
        let sql = format!(
            "UPDATE team_invitations SET status = $2, responded_at = now() \
             WHERE invitation_id = $1 \
             RETURNING {INVITATION_COLUMNS}"
        );
        let invitation = sqlx::query_as::<_, TeamInvitation>(&sql)
            .bind(invitation_id)
            .bind(InvitationStatus::Accepted)
            .fetch_one(conn)
            .await?;

        Ok(invitation)
    }

    pub async fn delete_for_team(conn: &mut PgConnection, team_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM team_invitations WHERE team_id = $1")
            .bind(team_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_pending_for_user(&self, user_id: Uuid) -> Result<Vec<PendingInvitationEntry>> {
        let rows = sqlx::query_as::<_, PendingInvitationRow>(
            "SELECT i.invitation_id, i.message, i.created_at, i.expires_at, \
                    t.team_id, t.name AS team_name, t.current_size, t.max_size, \
                    h.hackathon_id, h.title AS hackathon_title, h.status AS hackathon_status, \
                    u.user_id AS inviter_id, u.username AS inviter_username, \
                    u.full_name AS inviter_full_name, u.avatar_url AS inviter_avatar_url \
             FROM team_invitations i \
             INNER JOIN teams t ON t.team_id = i.team_id \
             INNER JOIN hackathons h ON h.hackathon_id = t.hackathon_id \
             INNER JOIN users u ON u.user_id = i.inviter_id \
             WHERE i.invitee_id = $1 AND i.status = 'pending' \
             ORDER BY i.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| PendingInvitationEntry {
                invitation_id: row.invitation_id,
                message: row.message,
                created_at: row.created_at,
                expires_at: row.expires_at,
                team: InvitedTeamSummary {
                    team_id: row.team_id,
                    name: row.team_name,
                    current_size: row.current_size,
                    max_size: row.max_size,
                    hackathon: HackathonSummary {
                        hackathon_id: row.hackathon_id,
                        title: row.hackathon_title,
                        status: row.hackathon_status,
                    },
                },
                inviter: UserSummary {
                    user_id: row.inviter_id,
                    username: row.inviter_username,
                    full_name: row.inviter_full_name,
                    avatar_url: row.inviter_avatar_url,
                },
            })
            .collect())
    }
}
