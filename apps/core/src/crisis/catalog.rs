//! Exercise Catalog.
//!
//! Static table of grounding exercises keyed by name. Each exercise carries a short
//! description and an ordered list of steps. The table is built once and shared
//! read-only by every request.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// A grounding exercise as defined in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    /// Instructions in the order they must be performed
    pub steps: Vec<String>,
}

/// Fully resolved exercise returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDetail {
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
}

impl From<&Exercise> for ExerciseDetail {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            description: exercise.description.clone(),
            steps: exercise.steps.clone(),
        }
    }
}

/// Lookup table from exercise name to exercise.
#[derive(Debug, Clone, Default)]
pub struct ExerciseCatalog {
    exercises: HashMap<String, Exercise>,
}

/// (name, description, steps)
type ExerciseRow = (&'static str, &'static str, &'static [&'static str]);

const BUILTIN_EXERCISES: &[ExerciseRow] = &[
    (
        "5-4-3-2-1 Grounding Exercise",
        "A sensory-based grounding technique to bring you back to the present moment",
        &[
            "Name 5 things you can see",
            "Name 4 things you can touch",
            "Name 3 things you can hear",
            "Name 2 things you can smell",
            "Name 1 thing you can taste",
        ],
    ),
    (
        "Box Breathing",
        "A breathing technique to calm the nervous system",
        &[
            "Inhale for 4 seconds",
            "Hold breath for 4 seconds",
            "Exhale for 4 seconds",
            "Hold breath for 4 seconds",
            "Repeat 4 times",
        ],
    ),
    (
        "Progressive Muscle Relaxation",
        "A technique to release physical tension",
        &[
            "Tense and release each muscle group",
            "Start from toes and work up to head",
            "Hold tension for 5 seconds",
            "Release and notice the difference",
        ],
    ),
    (
        "Temperature Change",
        "Using temperature to ground yourself in the present",
        &[
            "Hold an ice cube",
            "Splash cold water on face",
            "Take a warm shower",
            "Use a heating pad",
        ],
    ),
    (
        "Safe Place Visualization",
        "A visualization technique to create a mental safe space",
        &[
            "Close your eyes",
            "Imagine a safe, peaceful place",
            "Engage all senses in the visualization",
            "Stay there for a few minutes",
        ],
    ),
    (
        "Body Scan",
        "A mindfulness technique to connect with your body",
        &[
            "Start at the top of your head",
            "Notice sensations in each body part",
            "Move slowly down to your toes",
            "Release any tension you find",
        ],
    ),
    (
        "Mindful Walking",
        "A movement-based grounding technique",
        &[
            "Walk slowly and deliberately",
            "Notice each step",
            "Feel the ground beneath you",
            "Observe your surroundings",
        ],
    ),
    (
        "Grounding Through Touch",
        "Using touch to ground yourself in the present",
        &[
            "Find different textures around you",
            "Describe how each feels",
            "Focus on the sensations",
            "Notice temperature and pressure",
        ],
    ),
    (
        "Gratitude List",
        "A technique to shift focus to positive aspects of life",
        &[
            "List 3 things you're grateful for",
            "Be specific and detailed",
            "Focus on small, everyday things",
            "Write them down if possible",
        ],
    ),
    (
        "Future Visualization",
        "A visualization technique to cultivate hope",
        &[
            "Imagine a positive future moment",
            "Include specific details",
            "Engage all senses",
            "Focus on feelings of hope",
        ],
    ),
    (
        "Positive Affirmations",
        "Using positive statements to counter negative thoughts",
        &[
            "Choose 3 positive statements",
            "Repeat them out loud",
            "Write them down",
            "Believe in their truth",
        ],
    ),
    (
        "Self-Compassion Exercise",
        "A technique to cultivate self-compassion",
        &[
            "Acknowledge your suffering",
            "Recognize it's part of being human",
            "Offer yourself kindness",
            "Use gentle, supportive language",
        ],
    ),
    (
        "Strengths Inventory",
        "A technique to build self-esteem",
        &[
            "List your personal strengths",
            "Recall times you used them",
            "Identify how they help you",
            "Plan to use them today",
        ],
    ),
];

static BUILTIN_CATALOG: LazyLock<ExerciseCatalog> = LazyLock::new(|| {
    ExerciseCatalog::from_entries(BUILTIN_EXERCISES.iter().map(|(name, description, steps)| {
        Exercise {
            name: name.to_string(),
            description: description.to_string(),
            steps: steps.iter().map(|s| s.to_string()).collect(),
        }
    }))
});

impl ExerciseCatalog {
    /// The catalog shipped with the service.
    pub fn builtin() -> &'static ExerciseCatalog {
        &BUILTIN_CATALOG
    }

    /// Build a catalog from arbitrary exercises. A later entry with the same name
    /// replaces an earlier one.
    pub fn from_entries(entries: impl IntoIterator<Item = Exercise>) -> Self {
        let exercises = entries
            .into_iter()
            .map(|exercise| (exercise.name.clone(), exercise))
            .collect();
        Self { exercises }
    }

    pub fn get(&self, name: &str) -> Option<&Exercise> {
        self.exercises.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.exercises.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.exercises.keys().map(String::as_str)
    }
}
