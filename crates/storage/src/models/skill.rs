use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Skill {
    pub skill_id: Uuid,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserSkill {
    pub user_id: Uuid,
    pub skill_id: Uuid,
    pub proficiency: String,
    pub years_of_experience: Option<i32>,
}
