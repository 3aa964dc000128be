//! Crisis Lexicon.
//!
//! Maps each crisis keyword to the exercises it recommends. Iteration order is the
//! declaration order and is what the detector reports matches in.

use std::sync::LazyLock;

use super::catalog::ExerciseCatalog;

/// One lexicon entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrisisKeyword {
    /// Lowercase keyword, matched as a substring
    pub keyword: String,
    /// Exercise names, not checked against the catalog
    pub exercises: Vec<String>,
}

/// A dangling reference found by [`CrisisLexicon::dangling_references`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    pub keyword: String,
    pub exercise: String,
}

/// Ordered keyword table.
#[derive(Debug, Clone, Default)]
pub struct CrisisLexicon {
    entries: Vec<CrisisKeyword>,
}

const BUILTIN_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "suicide",
        &["5-4-3-2-1 Grounding Exercise", "Box Breathing", "Progressive Muscle Relaxation"],
    ),
    (
        "self-harm",
        &["5-4-3-2-1 Grounding Exercise", "Temperature Change", "Safe Place Visualization"],
    ),
    ("overwhelmed", &["Box Breathing", "Body Scan", "Mindful Walking"]),
    (
        "panic",
        &["5-4-3-2-1 Grounding Exercise", "Box Breathing", "Grounding Through Touch"],
    ),
    (
        "hopeless",
        &["Gratitude List", "Future Visualization", "Positive Affirmations"],
    ),
    (
        "worthless",
        &["Self-Compassion Exercise", "Strengths Inventory", "Positive Affirmations"],
    ),
];

static BUILTIN_LEXICON: LazyLock<CrisisLexicon> = LazyLock::new(|| {
    CrisisLexicon::from_entries(BUILTIN_KEYWORDS.iter().map(|(keyword, exercises)| {
        CrisisKeyword {
            keyword: keyword.to_string(),
            exercises: exercises.iter().map(|e| e.to_string()).collect(),
        }
    }))
});

impl CrisisLexicon {
    /// The lexicon shipped with the service.
    pub fn builtin() -> &'static CrisisLexicon {
        &BUILTIN_LEXICON
    }

    /// Build a lexicon preserving the given order. Keywords are lowercased so they can
    /// be compared against lowercased text; a repeated keyword keeps its first position
    /// and merges the exercise lists.
    pub fn from_entries(entries: impl IntoIterator<Item = CrisisKeyword>) -> Self {
        let mut merged: Vec<CrisisKeyword> = Vec::new();
        for mut entry in entries {
            entry.keyword = entry.keyword.to_lowercase();
            match merged.iter_mut().find(|e| e.keyword == entry.keyword) {
                Some(existing) => existing.exercises.extend(entry.exercises),
                None => merged.push(entry),
            }
        }
        Self { entries: merged }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CrisisKeyword> {
        self.entries.iter()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.keyword.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exercise references that the catalog cannot resolve. These are dropped at
    /// assembly time; callers can surface them at startup.
    pub fn dangling_references(&self, catalog: &ExerciseCatalog) -> Vec<DanglingReference> {
        self.entries
            .iter()
            .flat_map(|entry| {
                entry
                    .exercises
                    .iter()
                    .filter(|name| !catalog.contains(name))
                    .map(|name| DanglingReference {
                        keyword: entry.keyword.clone(),
                        exercise: name.clone(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let keywords: Vec<&str> = CrisisLexicon::builtin().keywords().collect();
        assert_eq!(
            keywords,
            vec!["suicide", "self-harm", "overwhelmed", "panic", "hopeless", "worthless"]
        );
    }

    #[test]
    fn test_builtin_has_no_dangling_references() {
        let dangling = CrisisLexicon::builtin().dangling_references(ExerciseCatalog::builtin());
        assert!(dangling.is_empty(), "dangling: {:?}", dangling);
    }

    #[test]
    fn test_dangling_reference_reported() {
        let lexicon = CrisisLexicon::from_entries([CrisisKeyword {
            keyword: "lonely".to_string(),
            exercises: vec!["Box Breathing".to_string(), "Call a Friend".to_string()],
        }]);

        let dangling = lexicon.dangling_references(ExerciseCatalog::builtin());
        assert_eq!(
            dangling,
            vec![DanglingReference {
                keyword: "lonely".to_string(),
                exercise: "Call a Friend".to_string(),
            }]
        );
    }

    #[test]
    fn test_keywords_lowercased_and_merged() {
        let lexicon = CrisisLexicon::from_entries([
            CrisisKeyword {
                keyword: "Panic".to_string(),
                exercises: vec!["Box Breathing".to_string()],
            },
            CrisisKeyword {
                keyword: "panic".to_string(),
                exercises: vec!["Body Scan".to_string()],
            },
        ]);

        assert_eq!(lexicon.len(), 1);
        let entry = lexicon.iter().next().unwrap();
        assert_eq!(entry.keyword, "panic");
        assert_eq!(entry.exercises, vec!["Box Breathing", "Body Scan"]);
    }
}
