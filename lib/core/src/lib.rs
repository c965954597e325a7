//! # specmatch Core
//!
//! Core library for the specmatch cable recommender.
//!
//! This crate provides the data model and the candidate retrieval side:
//!
//! - [`AttributeRecord`] - Normalized technical attributes of a cable
//! - [`normalize`] - Canonical spellings for attribute values
//! - [`CatalogItem`] / [`Requirement`] - The two things being matched
//! - [`TextEmbedder`] - Deterministic TF-IDF text embeddings
//! - [`CandidateIndex`] - Nearest-neighbour shortlist over the catalog
//!
//! ## Example
//!
//! ```rust
//! use specmatch_core::{AttributeRecord, CandidateIndex, CatalogItem, IndexConfig};
//!
//! let items = vec![
//!     CatalogItem::new("a", "Al cable", "11kV aluminium XLPE cable", AttributeRecord::empty()),
//!     CatalogItem::new("b", "Cu cable", "1.1kV copper PVC cable", AttributeRecord::empty()),
//!     CatalogItem::new("c", "Cu HV cable", "33kV copper EPR cable", AttributeRecord::empty()),
//! ];
//! let index = CandidateIndex::from_items(IndexConfig::default(), items).unwrap();
//!
//! let nearest = index.search("aluminium XLPE", 1).unwrap();
//! assert_eq!(nearest[0].id, "a");
//! ```

pub mod attributes;
pub mod catalog;
pub mod embedder;
pub mod error;
pub mod index;
pub mod normalize;
pub mod vector;

pub use attributes::{
    parse_magnitude, Attribute, AttributeRecord, AttributeRecordBuilder, AttributeValue,
    ValidationIssue, CROSS_SECTION_UNITS, VOLTAGE_UNITS,
};
pub use catalog::{CatalogItem, Requirement};
pub use embedder::{EmbedderState, TextEmbedder, DEFAULT_DIMENSION};
pub use error::{Error, Result};
pub use index::{CandidateIndex, IndexConfig, IndexSnapshot};
pub use normalize::normalize;
pub use vector::Vector;
