use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::UserSummary;
use crate::dto::hackathon::HackathonSummary;
use crate::models::{MemberRole, Team, TeamStatus};

/// Request payload for creating a team within a hackathon
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    pub hackathon_id: Uuid,

    #[validate(length(
        min = 2,
        max = 255,
        message = "Name must be between 2 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub max_size: Option<i32>,

    pub is_public: Option<bool>,

    #[validate(length(max = 2000))]
    pub project_idea: Option<String>,
}

/// Captain-only partial update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(length(max = 2000))]
    pub project_idea: Option<String>,

    pub is_public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TeamResponse {
    pub team_id: Uuid,
    pub hackathon_id: Uuid,
    pub creator_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: TeamStatus,
    pub current_size: i32,
    pub max_size: i32,
    pub is_public: bool,
    pub project_idea: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Team> for TeamResponse {
    fn from(t: Team) -> Self {
        Self {
            team_id: t.team_id,
            hackathon_id: t.hackathon_id,
            creator_id: t.creator_id,
            name: t.name,
            description: t.description,
            status: t.status,
            current_size: t.current_size,
            max_size: t.max_size,
            is_public: t.is_public,
            project_idea: t.project_idea,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeamMemberEntry {
    pub member_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Team detail with members, creator and the number of seats left
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamDetailResponse {
    #[serde(flatten)]
    pub team: TeamResponse,
    pub hackathon: HackathonSummary,
    pub creator: UserSummary,
    pub members: Vec<TeamMemberEntry>,
    pub open_spots: i32,
}

/// Membership entry in the caller's team listing
#[derive(Debug, Serialize, ToSchema)]
pub struct MyTeamEntry {
    pub member_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
    #[serde(flatten)]
    pub team: TeamResponse,
    pub hackathon: HackathonSummary,
    pub pending_invitations: i64,
}
