use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::common::UserSummary;
use crate::dto::hackathon::HackathonSummary;
use crate::dto::team::{
    CreateTeamRequest, MyTeamEntry, TeamMemberEntry, TeamResponse, UpdateTeamRequest,
};
use crate::error::Result;
use crate::models::{HackathonStatus, MemberRole, Team, TeamMember, TeamStatus};

const TEAM_COLUMNS: &str = "team_id, hackathon_id, creator_id, name, description, status, \
     current_size, max_size, is_public, project_idea, created_at, updated_at";

const MEMBER_COLUMNS: &str = "member_id, team_id, user_id, role, joined_at";

#[derive(FromRow)]
struct MemberUserRow {
    member_id: Uuid,
    role: MemberRole,
    joined_at: DateTime<Utc>,
    user_id: Uuid,
    username: String,
    full_name: String,
    avatar_url: Option<String>,
}

#[derive(FromRow)]
struct MyTeamRow {
    member_id: Uuid,
    role: MemberRole,
    joined_at: DateTime<Utc>,
    team_id: Uuid,
    hackathon_id: Uuid,
    creator_id: Uuid,
    name: String,
    description: Option<String>,
    status: TeamStatus,
    current_size: i32,
    max_size: i32,
    is_public: bool,
    project_idea: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    hackathon_title: String,
    hackathon_status: HackathonStatus,
    pending_invitations: i64,
}

/// Repository for team and team-membership database operations
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let sql = format!("SELECT {TEAM_COLUMNS} FROM teams WHERE team_id = $1");
        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(team_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(team)
    }

    pub async fn find_member(&self, team_id: Uuid, user_id: Uuid) -> Result<Option<TeamMember>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM team_members WHERE team_id = $1 AND user_id = $2"
        );
        let member = sqlx::query_as::<_, TeamMember>(&sql)
            .bind(team_id)
            .bind(user_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(member)
    }

    pub async fn member_user_ids(&self, team_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM team_members WHERE team_id = $1")
                .bind(team_id)
                .fetch_all(self.pool)
                .await?;

        Ok(ids)
    }

    pub async fn members_with_users(&self, team_id: Uuid) -> Result<Vec<TeamMemberEntry>> {
        let rows = sqlx::query_as::<_, MemberUserRow>(
            "SELECT tm.member_id, tm.role, tm.joined_at, \
                    u.user_id, u.username, u.full_name, u.avatar_url \
             FROM team_members tm \
             INNER JOIN users u ON u.user_id = tm.user_id \
             WHERE tm.team_id = $1 \
             ORDER BY tm.joined_at ASC",
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TeamMemberEntry {
                member_id: row.member_id,
                role: row.role,
                joined_at: row.joined_at,
                user: UserSummary {
                    user_id: row.user_id,
                    username: row.username,
                    full_name: row.full_name,
                    avatar_url: row.avatar_url,
                },
            })
            .collect())
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<MyTeamEntry>> {
        let rows = sqlx::query_as::<_, MyTeamRow>(
            "SELECT tm.member_id, tm.role, tm.joined_at, \
                    t.team_id, t.hackathon_id, t.creator_id, t.name, t.description, t.status, \
                    t.current_size, t.max_size, t.is_public, t.project_idea, \
                    t.created_at, t.updated_at, \
                    h.title AS hackathon_title, h.status AS hackathon_status, \
                    (SELECT COUNT(*) FROM team_invitations i \
                       WHERE i.team_id = t.team_id AND i.status = 'pending') AS pending_invitations \
             FROM team_members tm \
             INNER JOIN teams t ON t.team_id = tm.team_id \
             INNER JOIN hackathons h ON h.hackathon_id = t.hackathon_id \
             WHERE tm.user_id = $1 \
             ORDER BY tm.joined_at DESC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| MyTeamEntry {
                member_id: row.member_id,
                role: row.role,
                joined_at: row.joined_at,
                hackathon: HackathonSummary {
                    hackathon_id: row.hackathon_id,
                    title: row.hackathon_title,
                    status: row.hackathon_status,
                },
                pending_invitations: row.pending_invitations,
                team: TeamResponse {
                    team_id: row.team_id,
                    hackathon_id: row.hackathon_id,
                    creator_id: row.creator_id,
                    name: row.name,
                    description: row.description,
                    status: row.status,
                    current_size: row.current_size,
                    max_size: row.max_size,
                    is_public: row.is_public,
                    project_idea: row.project_idea,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                },
            })
            .collect())
    }

    pub async fn update_profile(&self, team_id: Uuid, req: &UpdateTeamRequest) -> Result<Team> {
        let sql = format!(
            "UPDATE teams SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                project_idea = COALESCE($4, project_idea), \
                is_public = COALESCE($5, is_public), \
                updated_at = now() \
             WHERE team_id = $1 \
             RETURNING {TEAM_COLUMNS}"
        );

        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(team_id)
            .bind(&req.name)
            .bind(&req.description)
            .bind(&req.project_idea)
            .bind(req.is_public)
            .fetch_one(self.pool)
            .await?;

        Ok(team)
    }

    pub async fn insert(
        conn: &mut PgConnection,
        hackathon_id: Uuid,
        creator_id: Uuid,
        req: &CreateTeamRequest,
        max_size: i32,
    ) -> Result<Team> {
        let sql = format!(
            "INSERT INTO teams (hackathon_id, creator_id, name, description, status, \
             current_size, max_size, is_public, project_idea) \
             VALUES ($1, $2, $3, $4, $5, 1, $6, $7, $8) \
             RETURNING {TEAM_COLUMNS}"
        );

        let team = sqlx::query_as::<_, Team>(&sql)
            .bind(hackathon_id)
            .bind(creator_id)
            .bind(&req.name)
            .bind(&req.description)
            .bind(TeamStatus::Forming)
            .bind(max_size)
            .bind(req.is_public.unwrap_or(true))
            .bind(&req.project_idea)
            .fetch_one(conn)
            .await?;

        Ok(team)
    }

    pub async fn insert_member(
        conn: &mut PgConnection,
        team_id: Uuid,
        user_id: Uuid,
        role: MemberRole,
    ) -> Result<TeamMember> {
        let sql = format!(
            "INSERT INTO team_members (team_id, user_id, role) \
             VALUES ($1, $2, $3) \
             RETURNING {MEMBER_COLUMNS}"
        );

        let member = sqlx::query_as::<_, TeamMember>(&sql)
            .bind(team_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(conn)
            .await?;

        Ok(member)
    }

    pub async fn delete_member(
        conn: &mut PgConnection,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id)
            .bind(user_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    /// Conditional increment: succeeds only while the team is still forming
    /// and below capacity, so two acceptances racing for the last seat
    /// cannot both get it.
    pub async fn claim_slot(conn: &mut PgConnection, team_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE teams SET current_size = current_size + 1, updated_at = now() \
             WHERE team_id = $1 AND status = $2 AND current_size < max_size",
        )
        .bind(team_id)
        .bind(TeamStatus::Forming)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn release_slot(conn: &mut PgConnection, team_id: Uuid) -> Result<()> {
        sqlx::query(
            "UPDATE teams SET current_size = current_size - 1, updated_at = now() \
             WHERE team_id = $1",
        )
        .bind(team_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    pub async fn delete_members(conn: &mut PgConnection, team_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1")
            .bind(team_id)
            .execute(conn)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, team_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM teams WHERE team_id = $1")
            .bind(team_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
