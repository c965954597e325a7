//! # specmatch Matching
//!
//! Deterministic, explainable matching of catalog items against a buyer
//! requirement.
//!
//! ## Features
//!
//! - **Weight profiles**: validated per-attribute weights, loadable from JSON
//! - **Comparators**: equality, plus partial credit for over-specified voltage
//!   and cross-section
//! - **Engine**: weighted score, classification and deviation notes
//! - **Explainability**: comparison table and recommendation wording
//! - **Pipeline**: shortlist, rank and present, one item or a whole batch
//!
//! ## Example
//!
//! ```rust
//! use specmatch_core::AttributeRecord;
//! use specmatch_matching::{MatchStatus, SpecMatchEngine};
//!
//! let engine = SpecMatchEngine::default();
//! let requirement = AttributeRecord::builder().voltage("11kV").core_count(3).build();
//! let candidate = AttributeRecord::builder().voltage("33kV").core_count(3).build();
//!
//! let breakdown = engine.score(&requirement, &candidate);
//! assert_eq!(breakdown.score, 95.0);
//! assert_eq!(engine.classify(breakdown.score), MatchStatus::Exact);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Requirement │────>│  Candidate  │────>│  Shortlist  │
//! │   (text)    │     │    Index    │     │   (top k)   │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                      ┌─────────────┐           │
//!                      │   Engine    │<──────────┘
//!                      │  (weights)  │
//!                      └─────────────┘
//!                             │
//!                      ┌─────────────┐
//!                      │   Explain   │
//!                      │  (top n)    │
//!                      └─────────────┘
//! ```

pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod pipeline;
pub mod weights;

// Re-export main types for convenience
pub use compare::{
    credit, CROSS_SECTION_OVERSPEC_CREDIT, MAGNITUDE_TOLERANCE, VOLTAGE_OVERSPEC_CREDIT,
};
pub use config::{MatchConfig, Thresholds};
pub use engine::SpecMatchEngine;
pub use error::ConfigError;
pub use explain::{
    recommendation_notes, AttributeScore, ComparisonCell, ComparisonRow, MatchResult,
    MatchStatus, Mismatch, Outcome, RankingStats, ScoreBreakdown,
};
pub use pipeline::{ItemRecommendation, Recommender};
pub use weights::{AttributeWeights, WEIGHT_SUM_TOLERANCE};
