//! Score extraction — pulls a 0–100 compatibility score out of free-text model output.
//!
//! Rules are tried strictly in `ScoreRule::CHAIN` order and the first rule that
//! captures a number decides the outcome. A capture outside 0..=100 is thrown
//! away and the default is used; weaker rules are not consulted afterwards.
//! The last rule accepts any standalone number, so years, counts and page
//! numbers in the prose can end up as the score.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A compatibility score, guaranteed to lie in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CompatibilityScore(u8);

impl CompatibilityScore {
    pub const MAX: u32 = 100;
    /// Used whenever no rule produced an in-range number.
    pub const DEFAULT: CompatibilityScore = CompatibilityScore(75);

    pub fn new(value: u32) -> Option<Self> {
        (value <= Self::MAX).then_some(CompatibilityScore(value as u8))
    }

    pub fn value(self) -> u32 {
        u32::from(self.0)
    }
}

impl TryFrom<u32> for CompatibilityScore {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        CompatibilityScore::new(value)
            .ok_or_else(|| format!("score {value} is outside 0..={}", Self::MAX))
    }
}

impl From<CompatibilityScore> for u32 {
    fn from(score: CompatibilityScore) -> Self {
        score.value()
    }
}

impl fmt::Display for CompatibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule chain
// ────────────────────────────────────────────────────────────────────────────

static COMPATIBILITY_SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)compatibility\s+score:?\s*([0-9]{1,3})\s*(?:/|out\s+of)\s*100").unwrap()
});
static SCORE_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)score:?\s*([0-9]{1,3})\s*(?:/|out\s+of)\s*100|score:?\s*([0-9]{1,3})\s*%",
    )
    .unwrap()
});
static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]{1,3})\s*%").unwrap());
static SCORE_PHRASE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:score|rating|match)\s*(?:is|:)\s*([0-9]{1,3})\b").unwrap()
});
static OUT_OF_HUNDRED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-9]{1,3})\s*/\s*100\b").unwrap());
static ANY_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([0-9]{1,2}|100)\b").unwrap());

/// One step of the score extraction chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// "Compatibility Score: 85/100" or "... 85 out of 100"
    CompatibilityScore,
    /// "Score: 85/100" or "Score: 85%"
    ScoreLabel,
    /// "85%" anywhere
    Percentage,
    /// "score is 85", "rating: 85", "match is 85"
    ScorePhrase,
    /// "85/100" anywhere
    OutOfHundred,
    /// any standalone 0–100 number
    AnyNumber,
}

impl ScoreRule {
    /// Priority order. First capture wins.
    pub const CHAIN: [ScoreRule; 6] = [
        ScoreRule::CompatibilityScore,
        ScoreRule::ScoreLabel,
        ScoreRule::Percentage,
        ScoreRule::ScorePhrase,
        ScoreRule::OutOfHundred,
        ScoreRule::AnyNumber,
    ];

    /// 1-based position in the chain, as shown in diagnostics.
    pub fn position(self) -> usize {
        Self::CHAIN
            .iter()
            .position(|r| *r == self)
            .map(|i| i + 1)
            .unwrap_or_default()
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreRule::CompatibilityScore => "Compatibility Score",
            ScoreRule::ScoreLabel => "Score format",
            ScoreRule::Percentage => "Percentage",
            ScoreRule::ScorePhrase => "Score is/: format",
            ScoreRule::OutOfHundred => "X/100 format",
            ScoreRule::AnyNumber => "Any number",
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            ScoreRule::CompatibilityScore => &*COMPATIBILITY_SCORE_RE,
            ScoreRule::ScoreLabel => &*SCORE_LABEL_RE,
            ScoreRule::Percentage => &*PERCENTAGE_RE,
            ScoreRule::ScorePhrase => &*SCORE_PHRASE_RE,
            ScoreRule::OutOfHundred => &*OUT_OF_HUNDRED_RE,
            ScoreRule::AnyNumber => &*ANY_NUMBER_RE,
        }
    }

    /// Returns the raw number this rule captures from `text`, if it matches.
    /// Rules with alternative groups yield the first non-empty one.
    pub fn capture(self, text: &str) -> Option<u32> {
        let caps = self.pattern().captures(text)?;
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().trim())
            .find(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Extraction outcome
// ────────────────────────────────────────────────────────────────────────────

/// How the final score was arrived at. Kept for diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreSource {
    Matched { rule: ScoreRule, value: u32 },
    /// A rule fired but captured a number above 100; the default was used.
    OutOfRange { rule: ScoreRule, value: u32 },
    /// Nothing matched; the default was inferred.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreExtraction {
    pub score: CompatibilityScore,
    pub source: ScoreSource,
}

impl ScoreExtraction {
    pub fn is_inferred_default(&self) -> bool {
        !matches!(self.source, ScoreSource::Matched { .. })
    }

    /// Human-readable trace lines, one per step taken.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut lines = vec!["Debug Info: Score extraction attempt".to_string()];
        match self.source {
            ScoreSource::Matched { rule, value } => {
                lines.push(format!("Pattern {} ({}) matched", rule.position(), rule.label()));
                lines.push(format!("Extracted score: {value}"));
            }
            ScoreSource::OutOfRange { rule, value } => {
                lines.push(format!("Pattern {} ({}) matched", rule.position(), rule.label()));
                lines.push(format!("Extracted score: {value}"));
                lines.push("Score out of range, using default".to_string());
            }
            ScoreSource::Default => {
                lines.push("No score pattern matched, using default".to_string());
            }
        }
        lines
    }
}

/// Runs the rule chain over `reply`. Never fails.
pub fn extract_score(reply: &str) -> ScoreExtraction {
    let hit = ScoreRule::CHAIN
        .iter()
        .find_map(|rule| rule.capture(reply).map(|value| (*rule, value)));

    match hit {
        Some((rule, value)) => match CompatibilityScore::new(value) {
            Some(score) => ScoreExtraction {
                score,
                source: ScoreSource::Matched { rule, value },
            },
            None => ScoreExtraction {
                score: CompatibilityScore::DEFAULT,
                source: ScoreSource::OutOfRange { rule, value },
            },
        },
        None => ScoreExtraction {
            score: CompatibilityScore::DEFAULT,
            source: ScoreSource::Default,
        },
    }
}
