//! Recommendation assembly: exercise names to full details.

use super::catalog::{ExerciseCatalog, ExerciseDetail};

/// Resolve exercise names against the catalog.
///
/// Names missing from the catalog are skipped. Output follows the iteration order of
/// `names`; callers should not rely on it.
pub fn assemble<'n, I>(names: I, catalog: &ExerciseCatalog) -> Vec<ExerciseDetail>
where
    I: IntoIterator<Item = &'n String>,
{
    names
        .into_iter()
        .filter_map(|name| catalog.get(name))
        .map(ExerciseDetail::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_assemble_known_names() {
        let names: BTreeSet<String> = ["Body Scan", "Box Breathing"]
            .into_iter()
            .map(String::from)
            .collect();

        let details = assemble(&names, ExerciseCatalog::builtin());
        assert_eq!(details.len(), 2);
        let body_scan = details.iter().find(|d| d.name == "Body Scan").unwrap();
        assert_eq!(body_scan.steps[0], "Start at the top of your head");
    }

    #[test]
    fn test_missing_name_dropped() {
        let names: BTreeSet<String> = ["Box Breathing", "Interpretive Dance"]
            .into_iter()
            .map(String::from)
            .collect();

        let details = assemble(&names, ExerciseCatalog::builtin());
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].name, "Box Breathing");
    }

    #[test]
    fn test_empty_input() {
        let names: BTreeSet<String> = BTreeSet::new();
        assert!(assemble(&names, ExerciseCatalog::builtin()).is_empty());
    }
}
