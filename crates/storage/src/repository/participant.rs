use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::{PaginationParams, UserSummary};
use crate::dto::hackathon::{HackathonSummary, MyHackathonEntry, ParticipantEntry};
use crate::error::Result;
use crate::models::{HackathonParticipant, HackathonStatus, ParticipantStatus};

const PARTICIPANT_COLUMNS: &str =
    "participant_id, hackathon_id, user_id, status, team_id, registered_at";

#[derive(FromRow)]
struct ParticipantUserRow {
    participant_id: Uuid,
    status: ParticipantStatus,
    registered_at: DateTime<Utc>,
    user_id: Uuid,
    username: String,
    full_name: String,
    avatar_url: Option<String>,
}

#[derive(FromRow)]
struct MyHackathonRow {
    participant_id: Uuid,
    status: ParticipantStatus,
    registered_at: DateTime<Utc>,
    team_id: Option<Uuid>,
    hackathon_id: Uuid,
    title: String,
    hackathon_status: HackathonStatus,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
}

/// Repository for hackathon participation rows
pub struct ParticipantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(
        &self,
        hackathon_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<HackathonParticipant>> {
        let sql = format!(
            "SELECT {PARTICIPANT_COLUMNS} FROM hackathon_participants \
             WHERE hackathon_id = $1 AND user_id = $2"
        );
        let participant = sqlx::query_as::<_, HackathonParticipant>(&sql)
            .bind(hackathon_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(participant)
    }

    /// Count of non-withdrawn participants, used for the capacity gate.
    /// Plain count, no lock: concurrent registrations can transiently
    /// overshoot `max_participants` by the number of racing requests.
    pub async fn count_active(&self, hackathon_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM hackathon_participants \
             WHERE hackathon_id = $1 AND status <> 'withdrawn'",
        )
        .bind(hackathon_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn insert(&self, hackathon_id: Uuid, user_id: Uuid) -> Result<HackathonParticipant> {
        let sql = format!(
            "INSERT INTO hackathon_participants (hackathon_id, user_id, status) \
             VALUES ($1, $2, $3) \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let participant = sqlx::query_as::<_, HackathonParticipant>(&sql)
            .bind(hackathon_id)
            .bind(user_id)
            .bind(ParticipantStatus::Registered)
            .fetch_one(self.pool)
            .await?;

        Ok(participant)
    }

    /// Re-registration flips a withdrawn row back instead of inserting a
    /// duplicate, keeping one row per (hackathon, user).
    pub async fn reactivate(&self, participant_id: Uuid) -> Result<HackathonParticipant> {
        let sql = format!(
            "UPDATE hackathon_participants \
             SET status = $2, team_id = NULL, registered_at = now() \
             WHERE participant_id = $1 \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let participant = sqlx::query_as::<_, HackathonParticipant>(&sql)
            .bind(participant_id)
            .bind(ParticipantStatus::Registered)
            .fetch_one(self.pool)
            .await?;

        Ok(participant)
    }

    pub async fn mark_withdrawn(&self, participant_id: Uuid) -> Result<HackathonParticipant> {
        let sql = format!(
            "UPDATE hackathon_participants SET status = $2 \
             WHERE participant_id = $1 \
             RETURNING {PARTICIPANT_COLUMNS}"
        );
        let participant = sqlx::query_as::<_, HackathonParticipant>(&sql)
            .bind(participant_id)
            .bind(ParticipantStatus::Withdrawn)
            .fetch_one(self.pool)
            .await?;

        Ok(participant)
    }

    pub async fn assign_team(
        conn: &mut PgConnection,
        participant_id: Uuid,
        team_id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE hackathon_participants SET status = $2, team_id = $3 \
             WHERE participant_id = $1",
        )
        .bind(participant_id)
        .bind(ParticipantStatus::InTeam)
        .bind(team_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn clear_team(
        conn: &mut PgConnection,
        user_id: Uuid,
        hackathon_id: Uuid,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE hackathon_participants SET status = $3, team_id = NULL \
             WHERE user_id = $1 AND hackathon_id = $2",
        )
        .bind(user_id)
        .bind(hackathon_id)
        .bind(ParticipantStatus::Registered)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Disband path: every member of the team goes back to `registered`.
    pub async fn clear_team_members(conn: &mut PgConnection, team_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE hackathon_participants SET status = $2, team_id = NULL \
             WHERE team_id = $1",
        )
        .bind(team_id)
        .bind(ParticipantStatus::Registered)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn list_active(
        &self,
        hackathon_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<ParticipantEntry>, i64)> {
        let rows = sqlx::query_as::<_, ParticipantUserRow>(
            "SELECT p.participant_id, p.status, p.registered_at, \
                    u.user_id, u.username, u.full_name, u.avatar_url \
             FROM hackathon_participants p \
             INNER JOIN users u ON u.user_id = p.user_id \
             WHERE p.hackathon_id = $1 AND p.status <> 'withdrawn' \
             ORDER BY p.registered_at ASC \
             LIMIT $2 OFFSET $3",
        )
        .bind(hackathon_id)
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM hackathon_participants \
             WHERE hackathon_id = $1 AND status <> 'withdrawn'",
        )
        .bind(hackathon_id)
        .fetch_one(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| ParticipantEntry {
                participant_id: row.participant_id,
                status: row.status,
                registered_at: row.registered_at,
                user: UserSummary {
                    user_id: row.user_id,
                    username: row.username,
                    full_name: row.full_name,
                    avatar_url: row.avatar_url,
                },
            })
            .collect();

        Ok((entries, total))
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MyHackathonEntry>> {
        let rows = sqlx::query_as::<_, MyHackathonRow>(
            "SELECT p.participant_id, p.status, p.registered_at, p.team_id, \
                    h.hackathon_id, h.title, h.status AS hackathon_status, \
                    h.start_date, h.end_date \
             FROM hackathon_participants p \
             INNER JOIN hackathons h ON h.hackathon_id = p.hackathon_id \
             WHERE p.user_id = $1 AND p.status <> 'withdrawn' \
             ORDER BY p.registered_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| MyHackathonEntry {
                participant_id: row.participant_id,
                status: row.status,
                registered_at: row.registered_at,
                team_id: row.team_id,
                hackathon: HackathonSummary {
                    hackathon_id: row.hackathon_id,
                    title: row.title,
                    status: row.hackathon_status,
                },
                start_date: row.start_date,
                end_date: row.end_date,
            })
            .collect();

        Ok(entries)
    }

    /// Matching candidate pool: registered, team-less participants of the
    /// hackathon, minus the given user ids (the team's current members).
    /// Deterministic order so fallback scoring ties are reproducible.
    pub async fn candidates(
        &self,
        hackathon_id: Uuid,
        exclude: &[Uuid],
    ) -> Result<Vec<UserSummary>> {
        #[derive(FromRow)]
        struct CandidateRow {
            user_id: Uuid,
            username: String,
            full_name: String,
            avatar_url: Option<String>,
        }

        let rows = sqlx::query_as::<_, CandidateRow>(
            "SELECT u.user_id, u.username, u.full_name, u.avatar_url \
             FROM hackathon_participants p \
             INNER JOIN users u ON u.user_id = p.user_id \
             WHERE p.hackathon_id = $1 AND p.status = 'registered' \
               AND p.user_id <> ALL($2) \
             ORDER BY p.registered_at ASC",
        )
        .bind(hackathon_id)
        .bind(exclude)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| UserSummary {
                user_id: row.user_id,
                username: row.username,
                full_name: row.full_name,
                avatar_url: row.avatar_url,
            })
            .collect())
    }
}
