use crate::catalog::CatalogItem;
use crate::embedder::{EmbedderState, TextEmbedder, DEFAULT_DIMENSION};
use crate::error::{Error, Result};
use crate::vector::Vector;
use ahash::AHashMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Configuration for a candidate index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    pub dimension: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
        }
    }
}

/// Text-similarity index over catalog items.
///
/// Write-once: [`build`](CandidateIndex::build) fits the embedder on the item
/// texts and stores one vector per item; afterwards the index is read-only.
/// A rebuild replaces everything.
#[derive(Debug, Clone)]
pub struct CandidateIndex {
    config: IndexConfig,
    embedder: TextEmbedder,
    items: Vec<CatalogItem>,
    vectors: Vec<Vector>,
    by_id: AHashMap<String, usize>,
    built: bool,
}

/// Everything needed to restore a built index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub embedder: EmbedderState,
    pub items: Vec<CatalogItem>,
    pub vectors: Vec<Vec<f32>>,
}

impl CandidateIndex {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            config,
            embedder: TextEmbedder::new(config.dimension),
            items: Vec::new(),
            vectors: Vec::new(),
            by_id: AHashMap::new(),
            built: false,
        }
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.built
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.config.dimension
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Catalog items in insertion order
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn embedder(&self) -> &TextEmbedder {
        &self.embedder
    }

    /// Build the index from scratch, replacing any previous contents
    pub fn build(&mut self, items: Vec<CatalogItem>) -> Result<()> {
        if items.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        let by_id = Self::id_lookup(&items)?;

        let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
        let mut embedder = TextEmbedder::new(self.config.dimension);
        embedder.fit(&texts)?;
        let vectors = embedder.embed_batch(&texts)?;

        tracing::info!(
            items = items.len(),
            vocabulary = embedder.vocabulary_size(),
            "candidate index built"
        );

        self.embedder = embedder;
        self.items = items;
        self.vectors = vectors;
        self.by_id = by_id;
        self.built = true;
        Ok(())
    }

    /// Convenience constructor: a new index built from `items`
    pub fn from_items(config: IndexConfig, items: Vec<CatalogItem>) -> Result<Self> {
        let mut index = Self::new(config);
        index.build(items)?;
        Ok(index)
    }

    /// The `k` items nearest to `query_text`, nearest first.
    ///
    /// Ranked by squared Euclidean distance between embeddings; equal
    /// distances keep catalog insertion order.
    pub fn search(&self, query_text: &str, k: usize) -> Result<Vec<&CatalogItem>> {
        Ok(self
            .search_with_distances(query_text, k)?
            .into_iter()
            .map(|(item, _)| item)
            .collect())
    }

    /// Like [`search`](CandidateIndex::search), with each item's distance
    pub fn search_with_distances(
        &self,
        query_text: &str,
        k: usize,
    ) -> Result<Vec<(&CatalogItem, f64)>> {
        if !self.built {
            return Err(Error::NotBuilt);
        }

        let query = self.embedder.embed(query_text)?;

        let mut scored: Vec<(OrderedFloat<f64>, usize)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(idx, v)| (OrderedFloat(query.squared_l2_distance(v)), idx))
            .collect();
        scored.sort_unstable();
        scored.truncate(k);

        tracing::debug!(k, returned = scored.len(), "similarity search");

        Ok(scored
            .into_iter()
            .map(|(distance, idx)| (&self.items[idx], distance.into_inner()))
            .collect())
    }

    /// Look up a catalog item by id
    pub fn get_by_id(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    /// Export the built state for persistence
    pub fn snapshot(&self) -> Result<IndexSnapshot> {
        if !self.built {
            return Err(Error::NotBuilt);
        }

        Ok(IndexSnapshot {
            embedder: self.embedder.state()?,
            items: self.items.clone(),
            vectors: self.vectors.iter().map(|v| v.as_slice().to_vec()).collect(),
        })
    }

    /// Restore a built index from a snapshot
    pub fn from_snapshot(snapshot: IndexSnapshot) -> Result<Self> {
        if snapshot.items.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if snapshot.items.len() != snapshot.vectors.len() {
            return Err(Error::Serialization(format!(
                "snapshot has {} items but {} vectors",
                snapshot.items.len(),
                snapshot.vectors.len()
            )));
        }

        let dimension = snapshot.embedder.dimension;
        if let Some(bad) = snapshot.vectors.iter().find(|v| v.len() != dimension) {
            return Err(Error::InvalidDimension {
                expected: dimension,
                actual: bad.len(),
            });
        }

        let by_id = Self::id_lookup(&snapshot.items)?;
        let embedder = TextEmbedder::from_state(snapshot.embedder)?;

        Ok(Self {
            config: IndexConfig { dimension },
            embedder,
            items: snapshot.items,
            vectors: snapshot.vectors.into_iter().map(Vector::new).collect(),
            by_id,
            built: true,
        })
    }

    fn id_lookup(items: &[CatalogItem]) -> Result<AHashMap<String, usize>> {
        let mut by_id = AHashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if by_id.insert(item.id.clone(), idx).is_some() {
                return Err(Error::DuplicateItem(item.id.clone()));
            }
        }
        Ok(by_id)
    }
}

impl Default for CandidateIndex {
    fn default() -> Self {
        Self::new(IndexConfig::default())
    }
}
