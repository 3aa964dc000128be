//! Crisis report: the JSON body returned by the crisis check, and the record kept
//! for each crisis interaction.

use serde::{Deserialize, Serialize};

use super::catalog::ExerciseDetail;
use super::detector::Detection;
use crate::models::format_timestamp;

/// Response body of a crisis check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisReport {
    pub crisis_detected: bool,
    pub detected_keywords: Vec<String>,
    pub recommended_exercises: Vec<ExerciseDetail>,
    /// RFC 3339 UTC
    pub timestamp: String,
}

impl CrisisReport {
    pub fn new(detection: &Detection, recommended_exercises: Vec<ExerciseDetail>) -> Self {
        Self {
            crisis_detected: detection.crisis_detected,
            detected_keywords: detection.matched_keywords.clone(),
            recommended_exercises,
            timestamp: format_timestamp(detection.timestamp),
        }
    }

    pub fn exercise_names(&self) -> Vec<&str> {
        self.recommended_exercises
            .iter()
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Crisis: {}, Keywords: [{}], Exercises: {}",
            if self.crisis_detected { "yes" } else { "no" },
            self.detected_keywords.join(", "),
            self.recommended_exercises.len()
        )
    }
}

/// Persisted crisis interaction, one per request that matched a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisInteraction {
    pub user_id: String,
    pub keywords_detected: Vec<String>,
    pub exercises_recommended: Vec<String>,
    pub timestamp: String,
}

impl CrisisInteraction {
    /// Returns `None` when the detection did not flag a crisis.
    pub fn from_detection(user_id: &str, detection: &Detection) -> Option<Self> {
        if !detection.crisis_detected {
            return None;
        }
        Some(Self {
            user_id: user_id.to_string(),
            keywords_detected: detection.matched_keywords.clone(),
            exercises_recommended: detection.exercise_names.iter().cloned().collect(),
            timestamp: format_timestamp(detection.timestamp),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use std::collections::BTreeSet;

    fn detection(keywords: &[&str], exercises: &[&str]) -> Detection {
        Detection {
            matched_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            exercise_names: exercises.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
            crisis_detected: !keywords.is_empty(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_interaction_only_for_crisis() {
        assert!(CrisisInteraction::from_detection("u1", &detection(&[], &[])).is_none());

        let interaction =
            CrisisInteraction::from_detection("u1", &detection(&["panic"], &["Box Breathing"]))
                .unwrap();
        assert_eq!(interaction.user_id, "u1");
        assert_eq!(interaction.keywords_detected, vec!["panic"]);
        assert_eq!(interaction.exercises_recommended, vec!["Box Breathing"]);
    }

    #[test]
    fn test_timestamp_is_utc_iso8601() {
        let d = detection(&["panic"], &[]);
        let report = CrisisReport::new(&d, vec![]);
        assert!(report.timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }

    #[test]
    fn test_summary() {
        let report = CrisisReport::new(&detection(&["panic"], &[]), vec![]);
        let summary = report.summary();
        assert!(summary.contains("Crisis: yes"));
        assert!(summary.contains("panic"));
    }
}
