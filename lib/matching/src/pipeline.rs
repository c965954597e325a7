//! Recommendation pipeline
//!
//! Retrieval, ranking and presentation for requirement line items:
//! shortlist candidates from the index, rank them with the engine, keep the
//! best few and build the comparison table.

use crate::config::MatchConfig;
use crate::engine::SpecMatchEngine;
use crate::error::ConfigError;
use crate::explain::{recommendation_notes, ComparisonRow, MatchResult, RankingStats};
use rayon::prelude::*;
use serde::Serialize;
use specmatch_core::{AttributeRecord, CandidateIndex, CatalogItem, Requirement, Result};

/// Recommendation for one requirement line item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRecommendation {
    pub item_id: u64,
    pub requirement_text: String,
    pub attributes: AttributeRecord,
    /// Best matches first, at most `top_n`
    pub top_matches: Vec<MatchResult>,
    pub comparison_table: Vec<ComparisonRow>,
    /// Absent when retrieval found nothing
    pub recommended_id: Option<String>,
    pub recommended_score: f64,
    pub notes: String,
    pub stats: RankingStats,
}

/// Runs the retrieve → rank → present pipeline
#[derive(Debug, Clone)]
pub struct Recommender {
    engine: SpecMatchEngine,
    top_k: usize,
    top_n: usize,
}

impl Recommender {
    pub fn new(config: &MatchConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            engine: SpecMatchEngine::new(config)?,
            top_k: config.top_k_candidates,
            top_n: config.top_n_recommendations,
        })
    }

    /// Use an existing engine with explicit shortlist sizes; both must be at least 1
    pub fn with_engine(
        engine: SpecMatchEngine,
        top_k: usize,
        top_n: usize,
    ) -> std::result::Result<Self, ConfigError> {
        if top_k == 0 {
            return Err(ConfigError::InvalidSetting("top_k must be at least 1".to_string()));
        }
        if top_n == 0 {
            return Err(ConfigError::InvalidSetting("top_n must be at least 1".to_string()));
        }
        Ok(Self { engine, top_k, top_n })
    }

    pub fn engine(&self) -> &SpecMatchEngine {
        &self.engine
    }

    /// Recommend a catalog item for one requirement
    pub fn recommend(
        &self,
        index: &CandidateIndex,
        requirement: &Requirement,
    ) -> Result<ItemRecommendation> {
        let shortlist = index.search(&requirement.text, self.top_k)?;

        let mut ranked = self.engine.rank(&requirement.attributes, &shortlist);
        ranked.truncate(self.top_n);

        let top_items: Vec<&CatalogItem> = ranked
            .iter()
            .filter_map(|result| {
                shortlist
                    .iter()
                    .find(|item| item.id == result.candidate_id)
                    .copied()
            })
            .collect();
        let comparison_table = self
            .engine
            .build_comparison_table(&requirement.attributes, &top_items);

        let best_breakdown = top_items
            .first()
            .map(|item| self.engine.score(&requirement.attributes, &item.attributes));
        let stats = RankingStats::compute(&ranked, best_breakdown.as_ref());

        let best = ranked.first();
        let notes = recommendation_notes(best);
        let recommended_id = best.map(|r| r.candidate_id.clone());
        let recommended_score = best.map_or(0.0, |r| r.score);

        tracing::debug!(
            item_id = requirement.item_id,
            shortlisted = shortlist.len(),
            recommended = ?recommended_id,
            score = recommended_score,
            "recommendation ready"
        );

        Ok(ItemRecommendation {
            item_id: requirement.item_id,
            requirement_text: requirement.text.clone(),
            attributes: requirement.attributes.clone(),
            top_matches: ranked,
            comparison_table,
            recommended_id,
            recommended_score,
            notes,
            stats,
        })
    }

    /// Recommend for many line items in parallel.
    ///
    /// Results line up with `requirements`; a failed item is reported in its
    /// own slot and does not affect the others.
    pub fn recommend_batch(
        &self,
        index: &CandidateIndex,
        requirements: &[Requirement],
    ) -> Vec<Result<ItemRecommendation>> {
        let results: Vec<Result<ItemRecommendation>> = requirements
            .par_iter()
            .map(|requirement| self.recommend(index, requirement))
            .collect();

        for (requirement, result) in requirements.iter().zip(&results) {
            if let Err(e) = result {
                tracing::warn!(item_id = requirement.item_id, error = %e, "recommendation failed");
            }
        }

        tracing::info!(
            items = requirements.len(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "batch recommendation complete"
        );
        results
    }
}

impl Default for Recommender {
    fn default() -> Self {
        let config = MatchConfig::default();
        Self {
            engine: SpecMatchEngine::default(),
            top_k: config.top_k_candidates,
            top_n: config.top_n_recommendations,
        }
    }
}
