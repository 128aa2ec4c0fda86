use serde::{Deserialize, Serialize};

use crate::analysis::score::CompatibilityScore;

/// Coarse bucket shown next to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchCategory {
    Excellent,
    Good,
    NeedsImprovement,
}

impl MatchCategory {
    pub fn from_score(score: CompatibilityScore) -> Self {
        match score.value() {
            v if v >= 80 => MatchCategory::Excellent,
            v if v >= 60 => MatchCategory::Good,
            _ => MatchCategory::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MatchCategory::Excellent => "Excellent Match",
            MatchCategory::Good => "Good Match",
            MatchCategory::NeedsImprovement => "Needs Improvement",
        }
    }

    /// CSS class used by the result page.
    pub fn css_class(self) -> &'static str {
        match self {
            MatchCategory::Excellent => "score-excellent",
            MatchCategory::Good => "score-good",
            MatchCategory::NeedsImprovement => "score-needs-improvement",
        }
    }
}

impl From<CompatibilityScore> for MatchCategory {
    fn from(score: CompatibilityScore) -> Self {
        MatchCategory::from_score(score)
    }
}
