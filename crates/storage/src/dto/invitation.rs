use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::UserSummary;
use crate::dto::hackathon::HackathonSummary;
use crate::models::{InvitationStatus, TeamInvitation};

/// Request payload for inviting a student to a team
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InviteRequest {
    pub user_id: Uuid,

    #[validate(length(max = 500, message = "Message must be at most 500 characters"))]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RespondToInvitationRequest {
    pub accept: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvitationResponse {
    pub invitation_id: Uuid,
    pub team_id: Uuid,
    pub inviter_id: Uuid,
    pub invitee_id: Uuid,
    pub status: InvitationStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl From<TeamInvitation> for InvitationResponse {
    fn from(i: TeamInvitation) -> Self {
        Self {
            invitation_id: i.invitation_id,
            team_id: i.team_id,
            inviter_id: i.inviter_id,
            invitee_id: i.invitee_id,
            status: i.status,
            message: i.message,
            created_at: i.created_at,
            expires_at: i.expires_at,
            responded_at: i.responded_at,
        }
    }
}

/// Short slice of a team embedded in invitation listings.
#[derive(Debug, Serialize, ToSchema)]
pub struct InvitedTeamSummary {
    pub team_id: Uuid,
    pub name: String,
    pub current_size: i32,
    pub max_size: i32,
    pub hackathon: HackathonSummary,
}

/// A pending invitation as shown to its invitee
#[derive(Debug, Serialize, ToSchema)]
pub struct PendingInvitationEntry {
    pub invitation_id: Uuid,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub team: InvitedTeamSummary,
    pub inviter: UserSummary,
}
