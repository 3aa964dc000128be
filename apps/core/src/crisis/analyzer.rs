//! Crisis Analyzer - runs detection and assembly over one journal entry.

use std::time::Instant;
use tracing::debug;

use super::assembler::assemble;
use super::catalog::ExerciseCatalog;
use super::detector::{CrisisDetector, Detection};
use super::lexicon::CrisisLexicon;
use super::report::CrisisReport;

/// Detection result together with the report built from it.
#[derive(Debug, Clone)]
pub struct CrisisAnalysis {
    pub detection: Detection,
    pub report: CrisisReport,
}

/// Holds references to the static tables; cheap to copy into request state.
#[derive(Debug, Clone, Copy)]
pub struct CrisisAnalyzer {
    lexicon: &'static CrisisLexicon,
    catalog: &'static ExerciseCatalog,
}

impl Default for CrisisAnalyzer {
    fn default() -> Self {
        Self::new(CrisisLexicon::builtin(), ExerciseCatalog::builtin())
    }
}

impl CrisisAnalyzer {
    pub fn new(lexicon: &'static CrisisLexicon, catalog: &'static ExerciseCatalog) -> Self {
        Self { lexicon, catalog }
    }

    pub fn lexicon(&self) -> &'static CrisisLexicon {
        self.lexicon
    }

    pub fn catalog(&self) -> &'static ExerciseCatalog {
        self.catalog
    }

    /// Analyze a non-empty journal entry.
    pub fn analyze(&self, text: &str) -> CrisisAnalysis {
        let start = Instant::now();

        let detection = CrisisDetector::new(self.lexicon).detect(text);
        let exercises = assemble(&detection.exercise_names, self.catalog);
        let report = CrisisReport::new(&detection, exercises);

        debug!(
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "{}",
            report.summary()
        );

        CrisisAnalysis { detection, report }
    }
}
