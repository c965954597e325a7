//! Explainability for match results
//!
//! Output structures that show how a score came about: per-attribute
//! outcomes, deviation notes, the side-by-side comparison table and the
//! final recommendation wording.

use serde::Serialize;
use specmatch_core::{Attribute, AttributeRecord, AttributeValue};
use std::fmt;

/// Match classification derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MatchStatus {
    #[serde(rename = "exact_match")]
    Exact,
    #[serde(rename = "close_match")]
    Close,
    #[serde(rename = "partial_match")]
    Partial,
    #[serde(rename = "no_match")]
    NoMatch,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchStatus::Exact => "exact_match",
            MatchStatus::Close => "close_match",
            MatchStatus::Partial => "partial_match",
            MatchStatus::NoMatch => "no_match",
        })
    }
}

/// What happened to one weighted attribute during scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The requirement does not constrain this attribute
    Unconstrained,
    Matched,
    /// Acceptable but not equal (over-specified scalar)
    Partial,
    Mismatched,
    /// The candidate does not state this attribute
    Missing,
}

/// Per-attribute score contribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AttributeScore {
    pub attribute: Attribute,
    pub weight: f64,
    pub credit: f64,
    pub outcome: Outcome,
}

impl AttributeScore {
    /// Weight actually awarded
    #[inline]
    pub fn awarded(&self) -> f64 {
        self.weight * self.credit
    }

    /// Whether the candidate is acceptable on this attribute (display rule)
    #[inline]
    pub fn satisfies(&self) -> bool {
        self.outcome == Outcome::Unconstrained || self.credit > 0.0
    }
}

/// A mismatched attribute, flagged when it still earned partial credit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub attribute: Attribute,
    pub partial: bool,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.partial {
            write!(f, "{} (partial)", self.attribute)
        } else {
            write!(f, "{}", self.attribute)
        }
    }
}

impl Serialize for Mismatch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw output of scoring one (requirement, candidate) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Percentage in [0, 100], rounded to 2 decimals
    pub score: f64,
    pub matched: Vec<Attribute>,
    pub mismatched: Vec<Mismatch>,
    pub missing: Vec<Attribute>,
    /// One entry per weighted attribute, canonical order
    pub attributes: Vec<AttributeScore>,
}

/// Result of matching one catalog item against one requirement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub candidate_name: String,
    pub score: f64,
    pub status: MatchStatus,
    pub matched: Vec<Attribute>,
    pub mismatched: Vec<Mismatch>,
    pub missing: Vec<Attribute>,
    pub deviation_notes: Vec<String>,
}

/// Requirement value when nothing is asked for
pub const NOT_SPECIFIED: &str = "not specified";

/// Candidate value when the datasheet does not state it
pub const NOT_STATED: &str = "N/A";

/// Candidate value in deviation notes when the datasheet does not state it
pub const UNAVAILABLE: &str = "unavailable";

/// One deviation note per mismatched attribute, then one per missing attribute
pub fn deviation_notes(
    breakdown: &ScoreBreakdown,
    requirement: &AttributeRecord,
    candidate: &AttributeRecord,
) -> Vec<String> {
    let describe = |value: Option<&AttributeValue>| {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    };

    let mismatched = breakdown.mismatched.iter().map(|m| m.attribute);
    let missing = breakdown.missing.iter().copied();

    mismatched
        .chain(missing)
        .map(|attr| {
            format!(
                "requirement needs {}={}, candidate has {}",
                attr,
                describe(requirement.get(attr)),
                describe(candidate.get(attr)),
            )
        })
        .collect()
}

/// A single cell of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonCell {
    Candidate {
        candidate_id: String,
        value: String,
        satisfies: bool,
    },
    /// Fewer ranked candidates than columns
    NotAvailable,
}

impl ComparisonCell {
    pub fn satisfies(&self) -> bool {
        matches!(self, ComparisonCell::Candidate { satisfies: true, .. })
    }
}

/// Number of candidate columns in the comparison table
pub const COMPARISON_COLUMNS: usize = 3;

/// One attribute row of the comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub attribute: Attribute,
    pub requirement: String,
    pub candidates: [ComparisonCell; COMPARISON_COLUMNS],
}

/// Recommendation wording for the best match, or for an empty shortlist
pub fn recommendation_notes(best: Option<&MatchResult>) -> String {
    let Some(best) = best else {
        return "no candidates found".to_string();
    };

    let top_notes = || {
        best.deviation_notes
            .iter()
            .take(2)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    };

    match best.status {
        MatchStatus::Exact => "meets all requirements".to_string(),
        MatchStatus::Close => format!("minor deviations: {}", top_notes()),
        MatchStatus::Partial => format!("partial match, custom variant needed: {}", top_notes()),
        MatchStatus::NoMatch => "no suitable match, custom item required".to_string(),
    }
}

/// Summary statistics for one ranked shortlist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingStats {
    /// Candidates scored
    pub candidates_count: usize,
    pub best_score: f64,
    pub avg_score: f64,
    /// Attribute that cost the best candidate the most weight
    pub largest_deduction: Option<Attribute>,
}

impl RankingStats {
    /// Compute stats from a ranked shortlist and the best candidate's breakdown
    pub fn compute(results: &[MatchResult], best: Option<&ScoreBreakdown>) -> Self {
        if results.is_empty() {
            return Self {
                candidates_count: 0,
                best_score: 0.0,
                avg_score: 0.0,
                largest_deduction: None,
            };
        }

        let avg_score = results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64;
        let largest_deduction = best.and_then(|b| {
            b.attributes
                .iter()
                .map(|a| (a.attribute, a.weight - a.awarded()))
                .filter(|(_, lost)| *lost > 0.0)
                .max_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(attr, _)| attr)
        });

        Self {
            candidates_count: results.len(),
            best_score: results[0].score,
            avg_score: (avg_score * 100.0).round() / 100.0,
            largest_deduction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: MatchStatus, notes: &[&str]) -> MatchResult {
        MatchResult {
            candidate_id: "X-1".to_string(),
            candidate_name: "Test cable".to_string(),
            score: 0.0,
            status,
            matched: Vec::new(),
            mismatched: Vec::new(),
            missing: Vec::new(),
            deviation_notes: notes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_mismatch_display() {
        let partial = Mismatch { attribute: Attribute::Voltage, partial: true };
        let plain = Mismatch { attribute: Attribute::CoreCount, partial: false };
        assert_eq!(partial.to_string(), "voltage (partial)");
        assert_eq!(plain.to_string(), "core_count");
        assert_eq!(serde_json::to_string(&partial).unwrap(), "\"voltage (partial)\"");
    }

    #[test]
    fn test_deviation_notes_format() {
        let breakdown = ScoreBreakdown {
            score: 0.0,
            matched: Vec::new(),
            mismatched: vec![Mismatch { attribute: Attribute::Voltage, partial: true }],
            missing: vec![Attribute::Sheathing],
            attributes: Vec::new(),
        };
        let requirement = AttributeRecord::builder().voltage("11kv").sheathing("pvc").build();
        let candidate = AttributeRecord::builder().voltage("33kv").build();

        let notes = deviation_notes(&breakdown, &requirement, &candidate);
        assert_eq!(
            notes,
            vec![
                "requirement needs voltage=11kv, candidate has 33kv",
                "requirement needs sheathing=pvc, candidate has unavailable",
            ]
        );
    }

    #[test]
    fn test_recommendation_notes() {
        let notes = ["a", "b", "c"];
        assert_eq!(
            recommendation_notes(Some(&result(MatchStatus::Exact, &[]))),
            "meets all requirements"
        );
        assert_eq!(
            recommendation_notes(Some(&result(MatchStatus::Close, &notes))),
            "minor deviations: a, b"
        );
        assert_eq!(
            recommendation_notes(Some(&result(MatchStatus::Partial, &notes))),
            "partial match, custom variant needed: a, b"
        );
        assert_eq!(
            recommendation_notes(Some(&result(MatchStatus::NoMatch, &notes))),
            "no suitable match, custom item required"
        );
        assert_eq!(recommendation_notes(None), "no candidates found");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&MatchStatus::Close).unwrap(), "\"close_match\"");
        assert_eq!(MatchStatus::NoMatch.to_string(), "no_match");
    }

    #[test]
    fn test_comparison_cell_serialization() {
        let json = serde_json::to_value(ComparisonCell::NotAvailable).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "not_available"}));
    }

    #[test]
    fn test_ranking_stats() {
        let mut a = result(MatchStatus::Close, &[]);
        a.score = 90.0;
        let mut b = result(MatchStatus::Partial, &[]);
        b.score = 70.0;

        let breakdown = ScoreBreakdown {
            score: 90.0,
            matched: Vec::new(),
            mismatched: Vec::new(),
            missing: Vec::new(),
            attributes: vec![
                AttributeScore {
                    attribute: Attribute::Voltage,
                    weight: 0.25,
                    credit: 0.8,
                    outcome: Outcome::Partial,
                },
                AttributeScore {
                    attribute: Attribute::Sheathing,
                    weight: 0.02,
                    credit: 0.0,
                    outcome: Outcome::Mismatched,
                },
            ],
        };

        let stats = RankingStats::compute(&[a, b], Some(&breakdown));
        assert_eq!(stats.candidates_count, 2);
        assert_eq!(stats.best_score, 90.0);
        assert_eq!(stats.avg_score, 80.0);
        assert_eq!(stats.largest_deduction, Some(Attribute::Voltage));
    }

    #[test]
    fn test_empty_stats() {
        let stats = RankingStats::compute(&[], None);
        assert_eq!(stats.candidates_count, 0);
        assert_eq!(stats.best_score, 0.0);
        assert!(stats.largest_deduction.is_none());
    }
}
