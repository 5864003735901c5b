use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire types shared with the external matching engine. Field names follow
/// the engine's camelCase contract, not this crate's snake_case convention.

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SkillProfile {
    pub name: String,
    pub category: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSkill {
    pub name: String,
    pub category: String,
    pub proficiency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<i32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub user_id: Uuid,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub skills: Vec<CandidateSkill>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub team_skills: Vec<SkillProfile>,
    pub candidates: Vec<CandidateProfile>,
    pub open_spots: i32,
    pub limit: usize,
}

/// Engine suggestions are passed through opaquely; only the envelope shape
/// is part of the contract.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendResponse {
    pub suggestions: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionSkill {
    pub name: String,
    pub proficiency: String,
}

/// Locally scored suggestion produced by the deterministic fallback
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchSuggestion {
    pub candidate_id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub score: u32,
    pub reasons: Vec<String>,
    pub skills: Vec<SuggestionSkill>,
    pub complementary_skills: Vec<String>,
    pub common_skills: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchesResponse {
    pub suggestions: Vec<serde_json::Value>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
