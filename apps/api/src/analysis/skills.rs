//! Skill list extraction from free-text model output.
//!
//! Two strategies:
//! 1. Sections: a "Matching Skills" / "Missing Skills" style heading followed by
//!    bullets or comma-separated items.
//! 2. Narrative: sentences such as "has experience with Rust and Go" or
//!    "lacks knowledge in Kubernetes". Only consulted when no section produced
//!    anything for either list.
//!
//! Both lists are then filtered (tokens of three characters or more),
//! deduplicated in first-seen order, and replaced by fixed placeholders if
//! still empty.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MATCHING_PLACEHOLDERS: [&str; 3] =
    ["Technical Skills", "Communication", "Problem Solving"];
pub const MISSING_PLACEHOLDERS: [&str; 1] = ["Additional Experience Needed"];

/// Tokens of this many characters or fewer are dropped.
const MIN_SKILL_CHARS: usize = 2;

static MATCHING_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:matching|matched|present|existing|found)\s+skills[:*\s]+").unwrap()
});
static MISSING_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:missing|absent|lacking|needed|required)\s+skills[:*\s]+").unwrap()
});
static ANY_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:matching|matched|present|existing|found|missing|absent|lacking|needed|required)\s+skills[:*\s]+",
    )
    .unwrap()
});
/// Blank line, or a new line starting with a capital letter.
static SECTION_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n[ \t]*\n|\n[A-Z]").unwrap());
/// Bullet markers at a token boundary, commas, and line breaks.
static ITEM_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)[-•*]+\s*|[,\n]").unwrap());

static MATCHING_NARRATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:has|possesses|demonstrates|shows)\s+(?:skills?|experience|knowledge)\s+(?:in|with)\s+([^.\n]+)",
    )
    .unwrap()
});
static MISSING_NARRATIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:lacks|missing|needs|should\s+improve)\s+(?:skills?|experience|knowledge)\s+(?:in|with)\s+([^.\n]+)",
    )
    .unwrap()
});
static NARRATIVE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i),|\band\b").unwrap());

/// Where the skill lists came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillSource {
    Sections,
    Narrative,
    /// Nothing usable was found; both lists are placeholders.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillExtraction {
    pub matching: Vec<String>,
    pub missing: Vec<String>,
    pub source: SkillSource,
}

/// Extracts matching and missing skills from `reply`. Never fails.
pub fn extract_skills(reply: &str) -> SkillExtraction {
    let mut matching = section_items(reply, &MATCHING_HEADING_RE);
    let mut missing = section_items(reply, &MISSING_HEADING_RE);
    let mut source = SkillSource::Sections;

    if matching.is_empty() && missing.is_empty() {
        matching = narrative_items(reply, &MATCHING_NARRATIVE_RE);
        missing = narrative_items(reply, &MISSING_NARRATIVE_RE);
        source = SkillSource::Narrative;
    }

    let matching = finalize(matching);
    let missing = finalize(missing);

    if matching.is_empty() && missing.is_empty() {
        source = SkillSource::Placeholder;
    }

    SkillExtraction {
        matching: or_placeholders(matching, &MATCHING_PLACEHOLDERS),
        missing: or_placeholders(missing, &MISSING_PLACEHOLDERS),
        source,
    }
}

/// Raw items under the first heading matched by `heading`.
fn section_items(reply: &str, heading: &Regex) -> Vec<String> {
    let Some(found) = heading.find(reply) else {
        return Vec::new();
    };
    let rest = &reply[found.end()..];

    let end = [
        SECTION_END_RE.find(rest).map(|m| m.start()),
        ANY_HEADING_RE.find(rest).map(|m| m.start()),
    ]
    .into_iter()
    .flatten()
    .min()
    .unwrap_or(rest.len());

    ITEM_SPLIT_RE
        .split(&rest[..end])
        .map(clean_item)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Raw items from every narrative phrase matched by `phrase`.
fn narrative_items(reply: &str, phrase: &Regex) -> Vec<String> {
    phrase
        .captures_iter(reply)
        .filter_map(|caps| caps.get(1))
        .flat_map(|m| NARRATIVE_SPLIT_RE.split(m.as_str()))
        .map(clean_item)
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean_item(raw: &str) -> String {
    raw.trim()
        .trim_matches('*')
        .trim_end_matches(['.', ';', ':', ','])
        .trim()
        .to_string()
}

fn finalize(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| s.chars().count() > MIN_SKILL_CHARS)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

fn or_placeholders(items: Vec<String>, placeholders: &[&str]) -> Vec<String> {
    if items.is_empty() {
        placeholders.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}
