//! # specmatch
//!
//! Deterministic matching of buyer cable requirements against an internal
//! product catalog.
//!
//! A requirement line item (free text plus normalized attributes) goes
//! through two stages:
//!
//! 1. **Retrieval**: a TF-IDF [`CandidateIndex`] shortlists the catalog items
//!    whose datasheet text is nearest to the requirement text.
//! 2. **Matching**: the [`SpecMatchEngine`] scores each shortlisted item with
//!    weighted per-attribute comparisons, classifies it and explains every
//!    deduction.
//!
//! The [`Recommender`] ties both together and renders a comparison table of
//! the best candidates.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! specmatch index --catalog data/catalog.json --out data/index.snapshot
//! specmatch match --index data/index.snapshot \
//!     --query "11kV 3 Core 300 sq mm Aluminium XLPE GI Strip Armoured Cable" \
//!     --voltage 11kv --conductor-material al --cross-section 300sqmm --core-count 3
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use specmatch::prelude::*;
//!
//! let items = load_catalog("data/catalog.json").unwrap();
//! let index = CandidateIndex::from_items(IndexConfig::default(), items).unwrap();
//!
//! let requirement = Requirement::new(
//!     1,
//!     "11kV 3 Core 300 sq mm Aluminium XLPE GI Strip Armoured Cable",
//!     AttributeRecord::builder().voltage("11kV").conductor_material("Aluminium").build(),
//! );
//! let recommendation = Recommender::default().recommend(&index, &requirement).unwrap();
//! println!("{:?} {}", recommendation.recommended_id, recommendation.notes);
//! ```
//!
//! ## Crate Structure
//!
//! - `specmatch-core` - Attribute records, normalization, TF-IDF embedder, candidate index
//! - `specmatch-matching` - Weights, comparators, match engine, explanations, pipeline
//! - `specmatch-storage` - Index snapshots, catalog files, index manager

// Re-export core types
pub use specmatch_core::{
    normalize, Attribute, AttributeRecord, AttributeValue, CandidateIndex, CatalogItem, Error,
    IndexConfig, Requirement, Result, TextEmbedder, ValidationIssue,
};

// Re-export matching
pub use specmatch_matching::{
    AttributeWeights, ComparisonCell, ComparisonRow, ConfigError, ItemRecommendation,
    MatchConfig, MatchResult, MatchStatus, Recommender, SpecMatchEngine, Thresholds,
};

// Re-export storage
pub use specmatch_storage::{load_catalog, IndexManager, SnapshotStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        load_catalog, normalize, Attribute, AttributeRecord, AttributeValue, AttributeWeights,
        CandidateIndex, CatalogItem, ComparisonCell, ComparisonRow, ConfigError, Error,
        IndexConfig, IndexManager, ItemRecommendation, MatchConfig, MatchResult, MatchStatus,
        Recommender, Requirement, Result, SnapshotStore, SpecMatchEngine, TextEmbedder,
        Thresholds, ValidationIssue,
    };
}
