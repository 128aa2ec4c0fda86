//! Response interpreter — turns one model reply into a complete `AnalysisResult`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::category::MatchCategory;
use crate::analysis::score::{extract_score, CompatibilityScore, ScoreExtraction, ScoreSource};
use crate::analysis::skills::{extract_skills, SkillSource};

/// Structured view of one analysis. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The raw model reply, exactly as received.
    pub reply: String,
    pub score: CompatibilityScore,
    pub category: MatchCategory,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub score_source: ScoreSource,
    pub skill_source: SkillSource,
}

impl AnalysisResult {
    pub fn score_is_inferred(&self) -> bool {
        !matches!(self.score_source, ScoreSource::Matched { .. })
    }
}

/// Interprets a reply. Always succeeds; unrecognised input degrades to defaults.
pub fn interpret(reply: impl Into<String>) -> AnalysisResult {
    let reply = reply.into();
    let score = extract_score(&reply);
    let skills = extract_skills(&reply);

    debug!(
        score = score.score.value(),
        score_inferred = score.is_inferred_default(),
        score_source = ?score.source,
        skill_source = ?skills.source,
        matching = skills.matching.len(),
        missing = skills.missing.len(),
        "Interpreted analysis reply"
    );

    AnalysisResult {
        category: score.score.into(),
        score: score.score,
        score_source: score.source,
        matching_skills: skills.matching,
        missing_skills: skills.missing,
        skill_source: skills.source,
        reply,
    }
}

/// Trace lines describing how the score was derived, for the result page.
pub fn score_diagnostics(result: &AnalysisResult) -> Vec<String> {
    ScoreExtraction {
        score: result.score,
        source: result.score_source,
    }
    .diagnostics()
}
