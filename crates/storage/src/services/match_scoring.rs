use std::collections::HashSet;

use crate::dto::matching::{CandidateProfile, MatchSuggestion, SkillProfile, SuggestionSkill};

const NEW_SKILL_POINTS: u32 = 10;
const NEW_CATEGORY_POINTS: u32 = 5;
const SHARED_SKILL_POINTS: u32 = 2;
const MAX_SCORE: u32 = 100;

/// Deterministic local scoring used when the matching engine is unreachable.
///
/// Ranks candidates by skill complementarity: every skill the team lacks is
/// worth more than a shared one, with a bonus when the skill opens a whole
/// new category. Pure function of its inputs; ties keep candidate order.
pub fn score_candidates(
    team_skills: &[SkillProfile],
    candidates: &[CandidateProfile],
    limit: usize,
) -> Vec<MatchSuggestion> {
    let team_skill_names: HashSet<&str> = team_skills.iter().map(|s| s.name.as_str()).collect();
    let team_categories: HashSet<&str> = team_skills.iter().map(|s| s.category.as_str()).collect();

    let mut scored: Vec<MatchSuggestion> = candidates
        .iter()
        .map(|candidate| {
            let mut score = 0u32;
            let mut complementary_skills = Vec::new();
            let mut common_skills = Vec::new();

            for skill in &candidate.skills {
                if !team_skill_names.contains(skill.name.as_str()) {
                    complementary_skills.push(skill.name.clone());
                    score += NEW_SKILL_POINTS;
                    if !team_categories.contains(skill.category.as_str()) {
                        score += NEW_CATEGORY_POINTS;
                    }
                } else {
                    common_skills.push(skill.name.clone());
                    score += SHARED_SKILL_POINTS;
                }
            }

            let mut reasons = Vec::new();
            if !complementary_skills.is_empty() {
                reasons.push(format!(
                    "Brings {} complementary skill(s)",
                    complementary_skills.len()
                ));
            }
            if !common_skills.is_empty() {
                reasons.push(format!("Shares {} skill(s) with team", common_skills.len()));
            }

            MatchSuggestion {
                candidate_id: candidate.user_id,
                username: candidate.username.clone(),
                full_name: candidate.full_name.clone(),
                avatar_url: candidate.avatar_url.clone(),
                score: score.min(MAX_SCORE),
                reasons,
                skills: candidate
                    .skills
                    .iter()
                    .map(|s| SuggestionSkill {
                        name: s.name.clone(),
                        proficiency: s.proficiency.clone(),
                    })
                    .collect(),
                complementary_skills,
                common_skills,
            }
        })
        .collect();

    // stable sort: equal scores keep candidate-pool order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::matching::CandidateSkill;
    use uuid::Uuid;

    fn team_skill(name: &str, category: &str) -> SkillProfile {
        SkillProfile {
            name: name.to_string(),
            category: category.to_string(),
            proficiency: "intermediate".to_string(),
        }
    }

    fn candidate(username: &str, skills: &[(&str, &str)]) -> CandidateProfile {
        CandidateProfile {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            full_name: username.to_uppercase(),
            avatar_url: None,
            skills: skills
                .iter()
                .map(|(name, category)| CandidateSkill {
                    name: name.to_string(),
                    category: category.to_string(),
                    proficiency: "intermediate".to_string(),
                    years_of_experience: None,
                })
                .collect(),
        }
    }

    #[test]
    fn new_skill_new_category_and_shared_skill() {
        let team = vec![team_skill("React", "frontend")];
        let candidates = vec![candidate(
            "ada",
            &[("Python", "backend"), ("React", "frontend")],
        )];

        let suggestions = score_candidates(&team, &candidates, 5);

        // Python: +10 new skill, +5 new category; React: +2 shared
        assert_eq!(suggestions[0].score, 17);
        assert_eq!(suggestions[0].complementary_skills, vec!["Python"]);
        assert_eq!(suggestions[0].common_skills, vec!["React"]);
    }

    #[test]
    fn new_skill_in_known_category_skips_category_bonus() {
        let team = vec![team_skill("React", "frontend")];
        let candidates = vec![candidate("ada", &[("Vue", "frontend")])];

        let suggestions = score_candidates(&team, &candidates, 5);

        assert_eq!(suggestions[0].score, 10);
    }

    #[test]
    fn score_is_capped_at_100() {
        let team = vec![team_skill("React", "frontend")];
        let many_skills: Vec<(String, String)> = (0..20)
            .map(|i| (format!("skill-{i}"), format!("category-{i}")))
            .collect();
        let refs: Vec<(&str, &str)> = many_skills
            .iter()
            .map(|(n, c)| (n.as_str(), c.as_str()))
            .collect();
        let candidates = vec![candidate("ada", &refs)];

        let suggestions = score_candidates(&team, &candidates, 5);

        assert_eq!(suggestions[0].score, 100);
    }

    #[test]
    fn sorted_descending_and_truncated_to_limit() {
        let team = vec![team_skill("React", "frontend")];
        let candidates = vec![
            candidate("low", &[("React", "frontend")]),
            candidate("high", &[("Rust", "systems"), ("Go", "backend")]),
            candidate("mid", &[("Vue", "frontend")]),
        ];

        let suggestions = score_candidates(&team, &candidates, 2);

        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].username, "high");
        assert_eq!(suggestions[1].username, "mid");
    }

    #[test]
    fn ties_keep_candidate_order() {
        let team = vec![team_skill("React", "frontend")];
        let candidates = vec![
            candidate("first", &[("Vue", "frontend")]),
            candidate("second", &[("Svelte", "frontend")]),
        ];

        let suggestions = score_candidates(&team, &candidates, 5);

        assert_eq!(suggestions[0].username, "first");
        assert_eq!(suggestions[1].username, "second");
    }

    #[test]
    fn candidate_without_skills_scores_zero() {
        let team = vec![team_skill("React", "frontend")];
        let candidates = vec![candidate("empty", &[])];

        let suggestions = score_candidates(&team, &candidates, 5);

        assert_eq!(suggestions[0].score, 0);
        assert!(suggestions[0].reasons.is_empty());
    }

    #[test]
    fn deterministic_across_runs() {
        let team = vec![team_skill("React", "frontend"), team_skill("Go", "backend")];
        let candidates = vec![
            candidate("a", &[("Rust", "systems"), ("Go", "backend")]),
            candidate("b", &[("Figma", "design")]),
        ];

        let first = score_candidates(&team, &candidates, 5);
        let second = score_candidates(&team, &candidates, 5);

        let scores =
            |s: &[MatchSuggestion]| s.iter().map(|m| (m.score, m.username.clone())).collect::<Vec<_>>();
        assert_eq!(scores(&first), scores(&second));
    }
}
