pub mod classifier;
pub mod interest;
pub mod roadmap;

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::classifier::{CareerClassifier, FeatureVector};
use crate::engine::interest::TokenFilter;
use crate::engine::roadmap::Roadmap;

const DEFAULT_SCORE: i64 = 70;
const WEAK_SUBJECT_THRESHOLD: i64 = 70;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub interests: Option<String>,
    #[serde(default)]
    pub scores: Option<String>,
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("Invalid scores format")]
    InvalidScores,
}

/// Shared read-only recommendation state: the classifier is trained once
/// here and never mutated afterwards, so concurrent requests need no
/// locking.
pub struct GuidanceEngine {
    classifier: CareerClassifier,
    token_filter: Option<Box<dyn TokenFilter>>,
}

impl GuidanceEngine {
    pub fn bootstrap() -> Self {
        Self {
            classifier: CareerClassifier::train(),
            token_filter: None,
        }
    }

    /// Wires in an external tokenizer that pre-filters interest text down
    /// to its content tokens. Without one, raw text is matched.
    pub fn with_token_filter(mut self, filter: Box<dyn TokenFilter>) -> Self {
        self.token_filter = Some(filter);
        self
    }

    pub fn recommend(&self, request: &RecommendRequest) -> Result<Roadmap, RecommendError> {
        let scores = parse_scores(request.scores.as_deref().unwrap_or(""))?;
        let math = scores.get("Math").copied().unwrap_or(DEFAULT_SCORE);
        let science = scores.get("Science").copied().unwrap_or(DEFAULT_SCORE);

        let career = match request.goal.as_deref() {
            Some(goal) if !goal.is_empty() => goal.to_string(),
            _ => {
                let category = interest::normalize(
                    request.interests.as_deref().unwrap_or(""),
                    self.token_filter.as_deref(),
                );
                let prediction = self.classifier.predict(&FeatureVector {
                    math,
                    science,
                    interest: category,
                });
                debug!(category = category.as_str(), career = prediction, "classified interests");
                prediction.to_string()
            }
        };

        let weak_subject = math < WEAK_SUBJECT_THRESHOLD || science < WEAK_SUBJECT_THRESHOLD;
        Ok(roadmap::generate(&career, weak_subject))
    }
}

/// Parses `"Key:Value,Key:Value,..."`. Entries without a colon are skipped;
/// a non-integer value anywhere invalidates the whole string. Unrecognized
/// keys are kept in the map even though only Math/Science are consumed.
pub fn parse_scores(raw: &str) -> Result<HashMap<String, i64>, RecommendError> {
    let mut scores = HashMap::new();

    for item in raw.split(',') {
        let Some((key, value)) = item.split_once(':') else {
            continue;
        };
        let value: i64 = value
            .trim()
            .parse()
            .map_err(|_| RecommendError::InvalidScores)?;
        scores.insert(key.trim().to_string(), value);
    }

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(goal: Option<&str>, interests: Option<&str>, scores: Option<&str>) -> RecommendRequest {
        RecommendRequest {
            goal: goal.map(String::from),
            interests: interests.map(String::from),
            scores: scores.map(String::from),
        }
    }

    #[test]
    fn parses_score_pairs_exactly() {
        let scores = parse_scores("Math:85,Science:92").unwrap();
        assert_eq!(scores.get("Math"), Some(&85));
        assert_eq!(scores.get("Science"), Some(&92));
    }

    #[test]
    fn retains_unrecognized_keys() {
        let scores = parse_scores(" Math : 60 , History : 99 ").unwrap();
        assert_eq!(scores.get("Math"), Some(&60));
        assert_eq!(scores.get("History"), Some(&99));
    }

    #[test]
    fn skips_entries_without_a_colon() {
        let scores = parse_scores("Math:50,garbage,Science:80").unwrap();
        assert_eq!(scores.len(), 2);
    }

    #[test]
    fn non_integer_value_invalidates_the_request() {
        assert!(matches!(
            parse_scores("Math:abc"),
            Err(RecommendError::InvalidScores)
        ));
        assert!(matches!(
            parse_scores("Math:80,Science:oops"),
            Err(RecommendError::InvalidScores)
        ));
    }

    #[test]
    fn goal_bypasses_classification() {
        let engine = GuidanceEngine::bootstrap();
        let roadmap = engine
            .recommend(&request(Some("Doctor"), None, None))
            .unwrap();

        assert_eq!(roadmap.career, "Doctor");
        assert_eq!(
            roadmap.description,
            "Diagnose and treat medical conditions, provide patient care"
        );
        // Missing scores default to 70/70, which is not weak.
        assert!(roadmap.timetable.monday.contains("2h"));
    }

    #[test]
    fn empty_goal_still_classifies() {
        let engine = GuidanceEngine::bootstrap();
        let roadmap = engine
            .recommend(&request(Some(""), Some("I love coding"), None))
            .unwrap();
        assert_ne!(roadmap.career, "");
    }

    #[test]
    fn boundary_scores_are_not_weak() {
        let engine = GuidanceEngine::bootstrap();
        let roadmap = engine
            .recommend(&request(Some("Doctor"), None, Some("Math:70,Science:70")))
            .unwrap();
        assert!(roadmap.timetable.monday.contains("2h"));
        assert!(roadmap.timetable.wednesday.contains("2h"));
    }

    #[test]
    fn below_threshold_score_is_weak() {
        let engine = GuidanceEngine::bootstrap();

        let weak_math = engine
            .recommend(&request(Some("Doctor"), None, Some("Math:69,Science:95")))
            .unwrap();
        assert!(weak_math.timetable.monday.contains("3h"));

        let weak_science = engine
            .recommend(&request(Some("Doctor"), None, Some("Math:95,Science:69")))
            .unwrap();
        assert!(weak_science.timetable.wednesday.contains("3h"));
    }

    #[test]
    fn malformed_scores_fail_even_with_a_goal() {
        let engine = GuidanceEngine::bootstrap();
        let result = engine.recommend(&request(Some("Doctor"), None, Some("Math:abc")));
        assert!(matches!(result, Err(RecommendError::InvalidScores)));
    }

    #[test]
    fn recommend_is_deterministic() {
        let engine = GuidanceEngine::bootstrap();
        let req = request(None, Some("biology and medicine"), Some("Math:88,Science:92"));

        let first = engine.recommend(&req).unwrap();
        let second = engine.recommend(&req).unwrap();
        assert_eq!(first, second);

        let first_json = serde_json::to_string(&first).unwrap();
        let second_json = serde_json::to_string(&second).unwrap();
        assert_eq!(first_json, second_json);
    }
}
