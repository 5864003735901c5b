use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum HackathonStatus {
    Draft,
    RegistrationOpen,
    RegistrationClosed,
    InProgress,
    Completed,
    Cancelled,
}

impl HackathonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HackathonStatus::Draft => "draft",
            HackathonStatus::RegistrationOpen => "registration_open",
            HackathonStatus::RegistrationClosed => "registration_closed",
            HackathonStatus::InProgress => "in_progress",
            HackathonStatus::Completed => "completed",
            HackathonStatus::Cancelled => "cancelled",
        }
    }

    /// Forward-only lifecycle; `completed` and `cancelled` are terminal.
    pub fn can_transition_to(self, next: HackathonStatus) -> bool {
        use HackathonStatus::*;

        matches!(
            (self, next),
            (Draft, RegistrationOpen)
                | (Draft, Cancelled)
                | (RegistrationOpen, RegistrationClosed)
                | (RegistrationOpen, Cancelled)
                | (RegistrationClosed, InProgress)
                | (RegistrationClosed, Cancelled)
                | (InProgress, Completed)
                | (InProgress, Cancelled)
        )
    }

    /// Teams can only be formed while registration is open or the event runs.
    pub fn accepts_teams(self) -> bool {
        matches!(
            self,
            HackathonStatus::RegistrationOpen | HackathonStatus::InProgress
        )
    }
}

impl fmt::Display for HackathonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Hackathon {
    pub hackathon_id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: HackathonStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
    pub location: Option<String>,
    pub is_virtual: bool,
    pub max_participants: Option<i32>,
    pub min_team_size: i32,
    pub max_team_size: i32,
    pub prize_pool: Option<String>,
    pub rules: Option<String>,
    pub banner_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::HackathonStatus::*;
    use super::*;

    const ALL: [HackathonStatus; 6] = [
        Draft,
        RegistrationOpen,
        RegistrationClosed,
        InProgress,
        Completed,
        Cancelled,
    ];

    #[test]
    fn legal_transitions() {
        assert!(Draft.can_transition_to(RegistrationOpen));
        assert!(Draft.can_transition_to(Cancelled));
        assert!(RegistrationOpen.can_transition_to(RegistrationClosed));
        assert!(RegistrationClosed.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn draft_cannot_skip_to_in_progress() {
        assert!(!Draft.can_transition_to(InProgress));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for next in ALL {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn no_backward_transitions() {
        assert!(!RegistrationOpen.can_transition_to(Draft));
        assert!(!RegistrationClosed.can_transition_to(RegistrationOpen));
        assert!(!InProgress.can_transition_to(RegistrationClosed));
    }

    #[test]
    fn no_self_transitions() {
        for status in ALL {
            assert!(!status.can_transition_to(status));
        }
    }

    #[test]
    fn team_formation_window() {
        assert!(RegistrationOpen.accepts_teams());
        assert!(InProgress.accepts_teams());
        assert!(!Draft.accepts_teams());
        assert!(!RegistrationClosed.accepts_teams());
        assert!(!Completed.accepts_teams());
        assert!(!Cancelled.accepts_teams());
    }
}
