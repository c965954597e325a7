//! Spec match engine
//!
//! Scores shortlisted catalog items against a requirement's attributes with
//! a weighted, per-attribute comparison and explains the result.

use crate::compare::credit;
use crate::config::{MatchConfig, Thresholds};
use crate::error::ConfigError;
use crate::explain::{
    deviation_notes, AttributeScore, ComparisonCell, ComparisonRow, MatchResult, MatchStatus,
    Mismatch, Outcome, ScoreBreakdown, COMPARISON_COLUMNS, NOT_SPECIFIED, NOT_STATED,
};
use crate::weights::AttributeWeights;
use rayon::prelude::*;
use specmatch_core::{Attribute, AttributeRecord, CatalogItem};

/// Weighted attribute matcher.
///
/// Holds an immutable weight profile and threshold set; every call only
/// reads them, so one engine can be shared across threads.
#[derive(Debug, Clone)]
pub struct SpecMatchEngine {
    weights: AttributeWeights,
    thresholds: Thresholds,
}

impl Default for SpecMatchEngine {
    fn default() -> Self {
        Self {
            weights: AttributeWeights::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl SpecMatchEngine {
    /// Create an engine from a configuration
    pub fn new(config: &MatchConfig) -> Result<Self, ConfigError> {
        Self::with_profile(config.weights.clone(), config.thresholds)
    }

    /// Create an engine from a weight profile and thresholds
    pub fn with_profile(
        weights: AttributeWeights,
        thresholds: Thresholds,
    ) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            weights,
            thresholds,
        })
    }

    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Score a candidate's attributes against a requirement's.
    ///
    /// An attribute the requirement leaves open earns its full weight. An
    /// attribute the candidate does not state earns nothing and is listed as
    /// missing.
    pub fn score(
        &self,
        requirement: &AttributeRecord,
        candidate: &AttributeRecord,
    ) -> ScoreBreakdown {
        let mut matched = Vec::new();
        let mut mismatched = Vec::new();
        let mut missing = Vec::new();
        let mut attributes = Vec::with_capacity(self.weights.len());
        let mut total = 0.0f64;

        for (attribute, weight) in self.weights.iter() {
            let scored = self.attribute_score(attribute, weight, requirement, candidate);
            match scored.outcome {
                Outcome::Unconstrained => {}
                Outcome::Matched => matched.push(attribute),
                Outcome::Partial => mismatched.push(Mismatch { attribute, partial: true }),
                Outcome::Mismatched => mismatched.push(Mismatch { attribute, partial: false }),
                Outcome::Missing => missing.push(attribute),
            }
            total += scored.awarded();
            attributes.push(scored);
        }

        ScoreBreakdown {
            score: round_score(total),
            matched,
            mismatched,
            missing,
            attributes,
        }
    }

    /// Credit and outcome for a single weighted attribute
    pub fn attribute_score(
        &self,
        attribute: Attribute,
        weight: f64,
        requirement: &AttributeRecord,
        candidate: &AttributeRecord,
    ) -> AttributeScore {
        let (credit, outcome) = match (requirement.get(attribute), candidate.get(attribute)) {
            (None, _) => (1.0, Outcome::Unconstrained),
            (Some(_), None) => (0.0, Outcome::Missing),
            (Some(required), Some(offered)) => {
                let c = credit(attribute, required, offered);
                let outcome = if c >= 1.0 {
                    Outcome::Matched
                } else if c > 0.0 {
                    Outcome::Partial
                } else {
                    Outcome::Mismatched
                };
                (c, outcome)
            }
        };

        AttributeScore {
            attribute,
            weight,
            credit,
            outcome,
        }
    }

    /// Map a score to its match class
    pub fn classify(&self, score: f64) -> MatchStatus {
        if score >= self.thresholds.exact {
            MatchStatus::Exact
        } else if score >= self.thresholds.close {
            MatchStatus::Close
        } else if score >= self.thresholds.minimum {
            MatchStatus::Partial
        } else {
            MatchStatus::NoMatch
        }
    }

    /// Score, classify and explain one catalog item
    pub fn match_item(
        &self,
        requirement: &AttributeRecord,
        candidate: &CatalogItem,
    ) -> MatchResult {
        let breakdown = self.score(requirement, &candidate.attributes);
        let notes = deviation_notes(&breakdown, requirement, &candidate.attributes);

        MatchResult {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            score: breakdown.score,
            status: self.classify(breakdown.score),
            matched: breakdown.matched,
            mismatched: breakdown.mismatched,
            missing: breakdown.missing,
            deviation_notes: notes,
        }
    }

    /// Match every candidate and order the results best first.
    ///
    /// Candidates are scored in parallel; equal scores keep the order the
    /// candidates were given in.
    pub fn rank(
        &self,
        requirement: &AttributeRecord,
        candidates: &[&CatalogItem],
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = candidates
            .par_iter()
            .map(|candidate| self.match_item(requirement, candidate))
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            candidates = results.len(),
            best = results.first().map(|r| r.score),
            "ranked candidates"
        );
        results
    }

    /// Side-by-side grid of the requirement and up to three ranked candidates.
    ///
    /// One row per weighted attribute in canonical order. Extra candidates
    /// are ignored; absent columns are [`ComparisonCell::NotAvailable`].
    pub fn build_comparison_table(
        &self,
        requirement: &AttributeRecord,
        ranked: &[&CatalogItem],
    ) -> Vec<ComparisonRow> {
        let ranked = &ranked[..ranked.len().min(COMPARISON_COLUMNS)];

        self.weights
            .iter()
            .map(|(attribute, weight)| {
                let candidates = std::array::from_fn(|column| match ranked.get(column) {
                    Some(item) => {
                        let scored =
                            self.attribute_score(attribute, weight, requirement, &item.attributes);
                        ComparisonCell::Candidate {
                            candidate_id: item.id.clone(),
                            value: item
                                .attributes
                                .get(attribute)
                                .map(|v| v.to_string())
                                .unwrap_or_else(|| NOT_STATED.to_string()),
                            satisfies: scored.satisfies(),
                        }
                    }
                    None => ComparisonCell::NotAvailable,
                });

                ComparisonRow {
                    attribute,
                    requirement: requirement
                        .get(attribute)
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
                    candidates,
                }
            })
            .collect()
    }
}

/// Percentage rounded to two decimals, capped at 100
fn round_score(fraction: f64) -> f64 {
    ((fraction * 100.0 * 100.0).round() / 100.0).min(100.0)
}
