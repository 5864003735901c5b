use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::UserSummary;
use crate::dto::hackathon::{
    CreateHackathonRequest, HackathonFilter, HackathonListItem, HackathonResponse,
    UpdateHackathonRequest,
};
use crate::error::Result;
use crate::models::{Hackathon, HackathonStatus};

const HACKATHON_COLUMNS: &str = "hackathon_id, organizer_id, title, description, status, \
     start_date, end_date, registration_deadline, location, is_virtual, max_participants, \
     min_team_size, max_team_size, prize_pool, rules, banner_url, website_url, \
     created_at, updated_at";

#[derive(FromRow)]
struct HackathonListRow {
    hackathon_id: Uuid,
    organizer_id: Uuid,
    title: String,
    description: String,
    status: HackathonStatus,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
    registration_deadline: DateTime<Utc>,
    location: Option<String>,
    is_virtual: bool,
    max_participants: Option<i32>,
    min_team_size: i32,
    max_team_size: i32,
    prize_pool: Option<String>,
    rules: Option<String>,
    banner_url: Option<String>,
    website_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    organizer_username: String,
    organizer_full_name: String,
    organizer_avatar_url: Option<String>,
    participant_count: i64,
    team_count: i64,
}

impl From<HackathonListRow> for HackathonListItem {
    fn from(row: HackathonListRow) -> Self {
        HackathonListItem {
            organizer: UserSummary {
                user_id: row.organizer_id,
                username: row.organizer_username,
                full_name: row.organizer_full_name,
                avatar_url: row.organizer_avatar_url,
            },
            participant_count: row.participant_count,
            team_count: row.team_count,
            hackathon: HackathonResponse {
                hackathon_id: row.hackathon_id,
                organizer_id: row.organizer_id,
                title: row.title,
                description: row.description,
                status: row.status,
                start_date: row.start_date,
                end_date: row.end_date,
                registration_deadline: row.registration_deadline,
                location: row.location,
                is_virtual: row.is_virtual,
                max_participants: row.max_participants,
                min_team_size: row.min_team_size,
                max_team_size: row.max_team_size,
                prize_pool: row.prize_pool,
                rules: row.rules,
                banner_url: row.banner_url,
                website_url: row.website_url,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

const LIST_SELECT: &str = "SELECT h.hackathon_id, h.organizer_id, h.title, h.description, \
     h.status, h.start_date, h.end_date, h.registration_deadline, h.location, h.is_virtual, \
     h.max_participants, h.min_team_size, h.max_team_size, h.prize_pool, h.rules, \
     h.banner_url, h.website_url, h.created_at, h.updated_at, \
     u.username AS organizer_username, u.full_name AS organizer_full_name, \
     u.avatar_url AS organizer_avatar_url, \
     (SELECT COUNT(*) FROM hackathon_participants p \
        WHERE p.hackathon_id = h.hackathon_id AND p.status <> 'withdrawn') AS participant_count, \
     (SELECT COUNT(*) FROM teams t WHERE t.hackathon_id = h.hackathon_id) AS team_count \
     FROM hackathons h \
     INNER JOIN users u ON u.user_id = h.organizer_id";

/// Repository for hackathon database operations
pub struct HackathonRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HackathonRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, hackathon_id: Uuid) -> Result<Option<Hackathon>> {
        let sql = format!("SELECT {HACKATHON_COLUMNS} FROM hackathons WHERE hackathon_id = $1");
        let hackathon = sqlx::query_as::<_, Hackathon>(&sql)
            .bind(hackathon_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(hackathon)
    }

    pub async fn insert(
        &self,
        organizer_id: Uuid,
        req: &CreateHackathonRequest,
    ) -> Result<Hackathon> {
        let sql = format!(
            "INSERT INTO hackathons (organizer_id, title, description, status, start_date, \
             end_date, registration_deadline, location, is_virtual, max_participants, \
             min_team_size, max_team_size, prize_pool, rules, banner_url, website_url) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16) \
             RETURNING {HACKATHON_COLUMNS}"
        );

        let hackathon = sqlx::query_as::<_, Hackathon>(&sql)
            .bind(organizer_id)
            .bind(&req.title)
            .bind(&req.description)
            .bind(HackathonStatus::Draft)
            .bind(req.start_date)
            .bind(req.end_date)
            .bind(req.registration_deadline)
            .bind(&req.location)
            .bind(req.is_virtual.unwrap_or(false))
            .bind(req.max_participants)
            .bind(req.min_team_size_or_default())
            .bind(req.max_team_size_or_default())
            .bind(&req.prize_pool)
            .bind(&req.rules)
            .bind(&req.banner_url)
            .bind(&req.website_url)
            .fetch_one(self.pool)
            .await?;

        Ok(hackathon)
    }

    pub async fn update(
        &self,
        hackathon_id: Uuid,
        req: &UpdateHackathonRequest,
    ) -> Result<Hackathon> {
        let sql = format!(
            "UPDATE hackathons SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                start_date = COALESCE($4, start_date), \
                end_date = COALESCE($5, end_date), \
                registration_deadline = COALESCE($6, registration_deadline), \
                location = COALESCE($7, location), \
                is_virtual = COALESCE($8, is_virtual), \
                max_participants = COALESCE($9, max_participants), \
                prize_pool = COALESCE($10, prize_pool), \
                rules = COALESCE($11, rules), \
                banner_url = COALESCE($12, banner_url), \
                website_url = COALESCE($13, website_url), \
                updated_at = now() \
             WHERE hackathon_id = $1 \
             RETURNING {HACKATHON_COLUMNS}"
        );

        let hackathon = sqlx::query_as::<_, Hackathon>(&sql)
            .bind(hackathon_id)
            .bind(&req.title)
            .bind(&req.description)
            .bind(req.start_date)
            .bind(req.end_date)
            .bind(req.registration_deadline)
            .bind(&req.location)
            .bind(req.is_virtual)
            .bind(req.max_participants)
            .bind(&req.prize_pool)
            .bind(&req.rules)
            .bind(&req.banner_url)
            .bind(&req.website_url)
            .fetch_one(self.pool)
            .await?;

        Ok(hackathon)
    }

    pub async fn set_status(
        &self,
        hackathon_id: Uuid,
        status: HackathonStatus,
    ) -> Result<Hackathon> {
        let sql = format!(
            "UPDATE hackathons SET status = $2, updated_at = now() \
             WHERE hackathon_id = $1 \
             RETURNING {HACKATHON_COLUMNS}"
        );

        let hackathon = sqlx::query_as::<_, Hackathon>(&sql)
            .bind(hackathon_id)
            .bind(status)
            .fetch_one(self.pool)
            .await?;

        Ok(hackathon)
    }

    /// Non-draft listing with optional status filter and title/description
    /// search, plus total count for pagination.
    pub async fn list_public(
        &self,
        filter: &HackathonFilter,
    ) -> Result<(Vec<HackathonListItem>, i64)> {
        let pagination = filter.pagination();

        let mut query = QueryBuilder::new(LIST_SELECT);
        query.push(" WHERE h.status <> 'draft'");
        push_filters(&mut query, filter);
        query
            .push(" ORDER BY h.start_date ASC, h.created_at DESC LIMIT ")
            .push_bind(pagination.limit() as i64)
            .push(" OFFSET ")
            .push_bind(pagination.offset() as i64);

        let rows = query
            .build_query_as::<HackathonListRow>()
            .fetch_all(self.pool)
            .await?;

        let mut count_query =
            QueryBuilder::new("SELECT COUNT(*) FROM hackathons h WHERE h.status <> 'draft'");
        push_filters(&mut count_query, filter);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(self.pool)
            .await?;

        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    pub async fn list_for_organizer(&self, organizer_id: Uuid) -> Result<Vec<HackathonListItem>> {
        let sql = format!("{LIST_SELECT} WHERE h.organizer_id = $1 ORDER BY h.created_at DESC");
        let rows = sqlx::query_as::<_, HackathonListRow>(&sql)
            .bind(organizer_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_with_counts(&self, hackathon_id: Uuid) -> Result<Option<HackathonListItem>> {
        let sql = format!("{LIST_SELECT} WHERE h.hackathon_id = $1");
        let row = sqlx::query_as::<_, HackathonListRow>(&sql)
            .bind(hackathon_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }
}

fn push_filters(query: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &HackathonFilter) {
    if let Some(status) = filter.status {
        query.push(" AND h.status = ").push_bind(status);
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{search}%");
        query
            .push(" AND (h.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR h.description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
