use std::collections::HashMap;

use sqlx::PgPool;
use storage::dto::matching::{
    CandidateProfile, CandidateSkill, MatchesResponse, RecommendRequest, SkillProfile,
};
use storage::models::TeamInvitation;
use storage::repository::participant::ParticipantRepository;
use storage::repository::skill::SkillRepository;
use storage::repository::team::TeamRepository;
use storage::services::match_scoring;
use uuid::Uuid;

use crate::error::{DomainError, WebResult};
use crate::features::teams;

use super::client::MatchingClient;

const MATCH_MESSAGE: &str =
    "You were suggested as a great match for this team by our AI matching system!";

/// Teammate suggestions for an open team slot.
///
/// The external engine scores the candidate pool when it is reachable; any
/// failure degrades to the deterministic local scorer with `fallback: true`
/// instead of surfacing an error.
pub async fn get_matches(
    pool: &PgPool,
    client: &MatchingClient,
    user_id: Uuid,
    team_id: Uuid,
    limit: usize,
) -> WebResult<MatchesResponse> {
    let teams = TeamRepository::new(pool);

    if teams.find_member(team_id, user_id).await?.is_none() {
        return Err(DomainError::NotAMember.into());
    }

    let team = teams
        .find_by_id(team_id)
        .await?
        .ok_or(DomainError::TeamNotFound)?;

    if team.is_full() {
        return Err(DomainError::TeamFull.into());
    }

    let member_ids = teams.member_user_ids(team_id).await?;

    let skills = SkillRepository::new(pool);
    let team_skills: Vec<SkillProfile> = skills
        .skills_for_users(&member_ids)
        .await?
        .into_iter()
        .map(|entry| SkillProfile {
            name: entry.name,
            category: entry.category,
            proficiency: entry.proficiency,
        })
        .collect();

    let candidates = ParticipantRepository::new(pool)
        .candidates(team.hackathon_id, &member_ids)
        .await?;

    if candidates.is_empty() {
        return Ok(MatchesResponse {
            suggestions: Vec::new(),
            fallback: false,
            message: Some("No available candidates".to_string()),
        });
    }

    let candidate_ids: Vec<Uuid> = candidates.iter().map(|c| c.user_id).collect();
    let mut skills_by_user: HashMap<Uuid, Vec<CandidateSkill>> = HashMap::new();
    for entry in skills.skills_for_users(&candidate_ids).await? {
        skills_by_user
            .entry(entry.user_id)
            .or_default()
            .push(CandidateSkill {
                name: entry.name,
                category: entry.category,
                proficiency: entry.proficiency,
                years_of_experience: entry.years_of_experience,
            });
    }

    let profiles: Vec<CandidateProfile> = candidates
        .into_iter()
        .map(|candidate| CandidateProfile {
            skills: skills_by_user
                .remove(&candidate.user_id)
                .unwrap_or_default(),
            user_id: candidate.user_id,
            username: candidate.username,
            full_name: candidate.full_name,
            avatar_url: candidate.avatar_url,
        })
        .collect();

    let request = RecommendRequest {
        open_spots: team.open_spots(),
        limit,
        team_skills: team_skills.clone(),
        candidates: profiles.clone(),
    };

    match client.recommend(&request).await {
        Ok(response) => Ok(MatchesResponse {
            suggestions: response.suggestions,
            fallback: false,
            message: None,
        }),
        Err(err) => {
            tracing::warn!(error = %err, "matching engine unavailable, using local scoring");

            let suggestions = match_scoring::score_candidates(&team_skills, &profiles, limit)
                .into_iter()
                .map(|s| serde_json::to_value(s).unwrap_or(serde_json::Value::Null))
                .collect();

            Ok(MatchesResponse {
                suggestions,
                fallback: true,
                message: None,
            })
        }
    }
}

/// Invite a suggested candidate; same contract as a regular team invite,
/// with a canned message.
pub async fn invite_match(
    pool: &PgPool,
    inviter_id: Uuid,
    team_id: Uuid,
    candidate_id: Uuid,
) -> WebResult<TeamInvitation> {
    teams::services::invite_to_team(pool, inviter_id, team_id, candidate_id, Some(MATCH_MESSAGE))
        .await
}
