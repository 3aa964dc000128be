//! Crisis keyword detection.
//!
//! Plain substring containment over lowercased text. No tokenization, stemming or
//! word boundaries: "panic" matches "panicking".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::lexicon::CrisisLexicon;

/// Outcome of scanning one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Matched keywords in lexicon order
    pub matched_keywords: Vec<String>,
    /// Union of the exercises recommended by every matched keyword
    pub exercise_names: BTreeSet<String>,
    pub crisis_detected: bool,
    pub timestamp: DateTime<Utc>,
}

/// Scans text against a lexicon.
pub struct CrisisDetector<'a> {
    lexicon: &'a CrisisLexicon,
}

impl Default for CrisisDetector<'static> {
    fn default() -> Self {
        Self::new(CrisisLexicon::builtin())
    }
}

impl<'a> CrisisDetector<'a> {
    pub fn new(lexicon: &'a CrisisLexicon) -> Self {
        Self { lexicon }
    }

    /// Detect crisis keywords in `text`.
    ///
    /// Empty text has no defined meaning here; the request boundary rejects it.
    pub fn detect(&self, text: &str) -> Detection {
        let normalized = text.to_lowercase();

        let mut matched_keywords = Vec::new();
        let mut exercise_names = BTreeSet::new();

        for entry in self.lexicon.iter() {
            if normalized.contains(entry.keyword.as_str()) {
                matched_keywords.push(entry.keyword.clone());
                exercise_names.extend(entry.exercises.iter().cloned());
            }
        }

        Detection {
            crisis_detected: !matched_keywords.is_empty(),
            matched_keywords,
            exercise_names,
            timestamp: Utc::now(),
        }
    }
}
