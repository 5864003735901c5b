use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ParticipantStatus {
    Registered,
    InTeam,
    Withdrawn,
}

/// One row per (hackathon, user); `withdrawn` rows are kept and reactivated
/// on re-registration instead of inserting duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HackathonParticipant {
    pub participant_id: Uuid,
    pub hackathon_id: Uuid,
    pub user_id: Uuid,
    pub status: ParticipantStatus,
    pub team_id: Option<Uuid>,
    pub registered_at: DateTime<Utc>,
}

impl HackathonParticipant {
    pub fn is_active(&self) -> bool {
        self.status != ParticipantStatus::Withdrawn
    }
}
