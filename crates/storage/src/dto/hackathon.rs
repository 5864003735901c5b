use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{PaginationParams, UserSummary};
use crate::models::{Hackathon, HackathonStatus, ParticipantStatus};

/// Request payload for creating a new hackathon (status starts at `draft`)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateHackathonRequest {
    #[validate(length(
        min = 3,
        max = 255,
        message = "Title must be between 3 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 10,
        max = 5000,
        message = "Description must be between 10 and 5000 characters"
    ))]
    pub description: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    pub registration_deadline: DateTime<Utc>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub is_virtual: Option<bool>,

    #[validate(range(min = 1, message = "Max participants must be positive"))]
    pub max_participants: Option<i32>,

    #[validate(range(min = 1, max = 20))]
    pub min_team_size: Option<i32>,

    #[validate(range(min = 1, max = 20))]
    pub max_team_size: Option<i32>,

    #[validate(length(max = 255))]
    pub prize_pool: Option<String>,

    #[validate(length(max = 5000))]
    pub rules: Option<String>,

    #[validate(length(max = 512))]
    pub banner_url: Option<String>,

    #[validate(length(max = 512))]
    pub website_url: Option<String>,
}

impl CreateHackathonRequest {
    pub fn min_team_size_or_default(&self) -> i32 {
        self.min_team_size.unwrap_or(2)
    }

    pub fn max_team_size_or_default(&self) -> i32 {
        self.max_team_size.unwrap_or(5)
    }
}

/// Request payload for updating an existing hackathon
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateHackathonRequest {
    #[validate(length(min = 3, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 10, max = 5000))]
    pub description: Option<String>,

    pub start_date: Option<DateTime<Utc>>,

    pub end_date: Option<DateTime<Utc>>,

    pub registration_deadline: Option<DateTime<Utc>>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    pub is_virtual: Option<bool>,

    #[validate(range(min = 1))]
    pub max_participants: Option<i32>,

    #[validate(length(max = 255))]
    pub prize_pool: Option<String>,

    #[validate(length(max = 5000))]
    pub rules: Option<String>,

    #[validate(length(max = 512))]
    pub banner_url: Option<String>,

    #[validate(length(max = 512))]
    pub website_url: Option<String>,
}

/// Organizer request to move a hackathon through its lifecycle
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status: HackathonStatus,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HackathonFilter {
    pub status: Option<HackathonStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl HackathonFilter {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// Response containing hackathon details
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HackathonResponse {
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

impl From<Hackathon> for HackathonResponse {
    fn from(h: Hackathon) -> Self {
        Self {
            hackathon_id: h.hackathon_id,
            organizer_id: h.organizer_id,
            title: h.title,
            description: h.description,
            status: h.status,
            start_date: h.start_date,
            end_date: h.end_date,
            registration_deadline: h.registration_deadline,
            location: h.location,
            is_virtual: h.is_virtual,
            max_participants: h.max_participants,
            min_team_size: h.min_team_size,
            max_team_size: h.max_team_size,
            prize_pool: h.prize_pool,
            rules: h.rules,
            banner_url: h.banner_url,
            website_url: h.website_url,
            created_at: h.created_at,
            updated_at: h.updated_at,
        }
    }
}

/// Short slice of a hackathon embedded in team and invitation payloads.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HackathonSummary {
    pub hackathon_id: Uuid,
    pub title: String,
    pub status: HackathonStatus,
}

/// Listing entry with organizer and live counts
#[derive(Debug, Serialize, ToSchema)]
pub struct HackathonListItem {
    #[serde(flatten)]
    pub hackathon: HackathonResponse,
    pub organizer: UserSummary,
    pub participant_count: i64,
    pub team_count: i64,
}

/// Participant row as seen in hackathon participant listings
#[derive(Debug, Serialize, ToSchema)]
pub struct ParticipantEntry {
    pub participant_id: Uuid,
    pub status: ParticipantStatus,
    pub registered_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// A student's own registration with the hackathon it belongs to
#[derive(Debug, Serialize, ToSchema)]
pub struct MyHackathonEntry {
    pub participant_id: Uuid,
    pub status: ParticipantStatus,
    pub registered_at: DateTime<Utc>,
    pub team_id: Option<Uuid>,
    pub hackathon: HackathonSummary,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}
