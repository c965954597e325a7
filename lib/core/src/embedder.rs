//! TF-IDF text embedder
//!
//! Turns free text into a fixed-dimension vector using term statistics learned
//! once from the catalog corpus. Fitting and embedding are fully
//! deterministic: the vocabulary is ordered by document frequency, ties broken
//! by the order terms were first seen in the corpus.

use crate::error::{Error, Result};
use crate::vector::Vector;
use ahash::{AHashMap, AHashSet};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// Default embedding dimension
pub const DEFAULT_DIMENSION: usize = 384;

#[derive(Debug, Clone)]
pub struct TextEmbedder {
    dimension: usize,
    // term -> vector slot, for the retained top-D terms
    vocabulary: AHashMap<String, usize>,
    // term -> idf, for every term seen while fitting
    idf: AHashMap<String, f64>,
    // every seen term in first-seen order
    terms: Vec<String>,
    fitted: bool,
}

/// Persistable embedder state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedderState {
    pub dimension: usize,
    /// Vocabulary terms; a term's position is its vector slot
    pub vocabulary: Vec<String>,
    /// Idf of every seen term, in first-seen order
    pub idf: Vec<(String, f64)>,
}

impl TextEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vocabulary: AHashMap::new(),
            idf: AHashMap::new(),
            terms: Vec::new(),
            fitted: false,
        }
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Number of retained vocabulary terms (at most the dimension)
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Idf of a term seen during fitting
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.idf.get(term).copied()
    }

    /// Vector slot of a vocabulary term
    pub fn slot(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Split text into lower-cased runs of ASCII alphanumerics
    pub fn tokenize(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Learn vocabulary and idf statistics from a corpus. May only be called once.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<()> {
        if self.fitted {
            return Err(Error::AlreadyFitted);
        }
        if corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut doc_freq: AHashMap<String, u32> = AHashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for doc in corpus {
            let mut in_doc: AHashSet<String> = AHashSet::new();
            for token in Self::tokenize(doc.as_ref()) {
                if !in_doc.insert(token.clone()) {
                    continue;
                }
                match doc_freq.get_mut(&token) {
                    Some(df) => *df += 1,
                    None => {
                        doc_freq.insert(token.clone(), 1);
                        first_seen.push(token);
                    }
                }
            }
        }

        // Stable sort keeps first-seen order among equal frequencies
        let mut ranked: Vec<&String> = first_seen.iter().collect();
        ranked.sort_by_key(|term| Reverse(doc_freq[term.as_str()]));

        self.vocabulary = ranked
            .into_iter()
            .take(self.dimension)
            .enumerate()
            .map(|(slot, term)| (term.clone(), slot))
            .collect();

        let n_docs = corpus.len() as f64;
        self.idf = first_seen
            .iter()
            .map(|term| {
                let df = f64::from(doc_freq[term.as_str()]);
                (term.clone(), (n_docs / (df + 1.0)).ln())
            })
            .collect();

        tracing::debug!(
            documents = corpus.len(),
            terms = first_seen.len(),
            vocabulary = self.vocabulary.len(),
            "fitted text embedder"
        );

        self.terms = first_seen;
        self.fitted = true;
        Ok(())
    }

    /// Embed a text into an L2-normalized vector.
    ///
    /// Text containing no vocabulary term yields the zero vector.
    pub fn embed(&self, text: &str) -> Result<Vector> {
        if !self.fitted {
            return Err(Error::NotReady);
        }

        let tokens = Self::tokenize(text);
        let mut tf: AHashMap<&str, u32> = AHashMap::new();
        for token in &tokens {
            *tf.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut values = vec![0.0f64; self.dimension];
        let max_tf = match tf.values().max() {
            Some(&max) => f64::from(max),
            None => return Ok(Vector::zeros(self.dimension)),
        };

        for (term, count) in &tf {
            if let Some(&slot) = self.vocabulary.get(*term) {
                let idf = self.idf.get(*term).copied().unwrap_or(0.0);
                values[slot] = f64::from(*count) / max_tf * idf;
            }
        }

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut values {
                *v /= norm;
            }
        }

        Ok(Vector::new(values.into_iter().map(|v| v as f32).collect()))
    }

    /// Embed many texts in parallel, preserving input order
    pub fn embed_batch<S: AsRef<str> + Sync>(&self, texts: &[S]) -> Result<Vec<Vector>> {
        texts.par_iter().map(|t| self.embed(t.as_ref())).collect()
    }

    /// Export the fitted state for persistence
    pub fn state(&self) -> Result<EmbedderState> {
        if !self.fitted {
            return Err(Error::NotReady);
        }

        let mut vocabulary = vec![String::new(); self.vocabulary.len()];
        for (term, &slot) in &self.vocabulary {
            vocabulary[slot] = term.clone();
        }

        let idf = self
            .terms
            .iter()
            .map(|term| (term.clone(), self.idf[term.as_str()]))
            .collect();

        Ok(EmbedderState {
            dimension: self.dimension,
            vocabulary,
            idf,
        })
    }

    /// Rebuild a fitted embedder from persisted state
    pub fn from_state(state: EmbedderState) -> Result<Self> {
        if state.vocabulary.len() > state.dimension {
            return Err(Error::InvalidDimension {
                expected: state.dimension,
                actual: state.vocabulary.len(),
            });
        }

        let vocabulary: AHashMap<String, usize> = state
            .vocabulary
            .into_iter()
            .enumerate()
            .map(|(slot, term)| (term, slot))
            .collect();

        let terms: Vec<String> = state.idf.iter().map(|(term, _)| term.clone()).collect();
        let idf: AHashMap<String, f64> = state.idf.into_iter().collect();

        if let Some(term) = vocabulary.keys().find(|t| !idf.contains_key(t.as_str())) {
            return Err(Error::Serialization(format!(
                "vocabulary term '{}' has no idf entry",
                term
            )));
        }

        Ok(Self {
            dimension: state.dimension,
            vocabulary,
            idf,
            terms,
            fitted: true,
        })
    }
}

impl Default for TextEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}
