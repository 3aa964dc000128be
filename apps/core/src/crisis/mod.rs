//! # Crisis Module
//!
//! Deterministic crisis detection for journal entries. Runs without any model call:
//! the entry is scanned for lexicon keywords and the matching grounding exercises are
//! resolved from the catalog.
//!
//! ## Components
//! - `catalog`: exercise name to description and steps
//! - `lexicon`: crisis keyword to recommended exercise names
//! - `detector`: substring matching over lowercased text
//! - `assembler`: exercise names to full details
//! - `report`: response body and persisted interaction
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod assembler;
pub mod catalog;
pub mod detector;
pub mod lexicon;
pub mod report;

pub use analyzer::{CrisisAnalysis, CrisisAnalyzer};
pub use assembler::assemble;
pub use catalog::{Exercise, ExerciseCatalog, ExerciseDetail};
pub use detector::{CrisisDetector, Detection};
pub use lexicon::{CrisisKeyword, CrisisLexicon, DanglingReference};
pub use report::{CrisisInteraction, CrisisReport};
