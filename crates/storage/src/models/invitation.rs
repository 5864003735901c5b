use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

/// Expiry is lazy: a pending invitation past `expires_at` is flipped to
/// `expired` the first time the invitee responds to it, not by a sweeper.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamInvitation {
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

impl TeamInvitation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation(expires_at: DateTime<Utc>) -> TeamInvitation {
        TeamInvitation {
            invitation_id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            inviter_id: Uuid::new_v4(),
            invitee_id: Uuid::new_v4(),
            status: InvitationStatus::Pending,
            message: None,
            created_at: expires_at - Duration::days(7),
            expires_at,
            responded_at: None,
        }
    }

    #[test]
    fn expiry_is_strictly_after_deadline() {
        let now = Utc::now();
        assert!(!invitation(now).is_expired(now));
        assert!(!invitation(now + Duration::seconds(1)).is_expired(now));
        assert!(invitation(now - Duration::seconds(1)).is_expired(now));
    }
}
