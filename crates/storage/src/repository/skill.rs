use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::Result;

/// One user skill joined with its skill row, as consumed by the matching
/// coordinator.
#[derive(Debug, Clone, FromRow)]
pub struct UserSkillEntry {
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub proficiency: String,
    pub years_of_experience: Option<i32>,
}

pub struct SkillRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SkillRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn skills_for_users(&self, user_ids: &[Uuid]) -> Result<Vec<UserSkillEntry>> {
        let entries = sqlx::query_as::<_, UserSkillEntry>(
            "SELECT us.user_id, s.name, s.category, us.proficiency, us.years_of_experience \
             FROM user_skills us \
             INNER JOIN skills s ON s.skill_id = us.skill_id \
             WHERE us.user_id = ANY($1) \
             ORDER BY s.name ASC",
        )
        .bind(user_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(entries)
    }
}
