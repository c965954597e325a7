//! Attribute weights
//!
//! How much each attribute counts toward the overall match score. A weight
//! profile is validated once, when it is built: weights must be finite,
//! non-negative and sum to 1.0 within [`WEIGHT_SUM_TOLERANCE`].

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use specmatch_core::Attribute;
use std::collections::{BTreeMap, HashMap};

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Slack for f64 rounding at the tolerance boundary
const SUM_EPSILON: f64 = 1e-9;

/// A validated weight profile.
///
/// Only weighted attributes take part in scoring; they are always visited in
/// canonical attribute order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HashMap<String, f64>", into = "BTreeMap<Attribute, f64>")]
pub struct AttributeWeights {
    weights: Vec<(Attribute, f64)>,
}

impl AttributeWeights {
    /// Build and validate a weight profile
    pub fn new<I>(weights: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (Attribute, f64)>,
    {
        let by_attr: BTreeMap<Attribute, f64> = weights.into_iter().collect();
        if by_attr.is_empty() {
            return Err(ConfigError::EmptyWeights);
        }

        for (&attribute, &weight) in &by_attr {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight { attribute, weight });
            }
        }

        let sum: f64 = by_attr.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE + SUM_EPSILON {
            return Err(ConfigError::WeightSum {
                sum,
                tolerance: WEIGHT_SUM_TOLERANCE,
            });
        }

        // BTreeMap iteration follows the canonical attribute order
        Ok(Self {
            weights: by_attr.into_iter().collect(),
        })
    }

    /// Weighted attributes in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, f64)> + '_ {
        self.weights.iter().copied()
    }

    /// Weighted attributes in canonical order
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.weights.iter().map(|(attr, _)| *attr)
    }

    pub fn get(&self, attribute: Attribute) -> Option<f64> {
        self.weights
            .iter()
            .find(|(attr, _)| *attr == attribute)
            .map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }
}

impl Default for AttributeWeights {
    /// The standard cable profile: voltage dominates, sheathing barely counts
    fn default() -> Self {
        Self {
            weights: vec![
                (Attribute::Voltage, 0.25),
                (Attribute::ConductorMaterial, 0.20),
                (Attribute::CrossSection, 0.15),
                (Attribute::CoreCount, 0.15),
                (Attribute::Insulation, 0.10),
                (Attribute::Armouring, 0.10),
                (Attribute::Sheathing, 0.05),
            ],
        }
    }
}

impl TryFrom<HashMap<String, f64>> for AttributeWeights {
    type Error = ConfigError;

    fn try_from(raw: HashMap<String, f64>) -> Result<Self, Self::Error> {
        let mut parsed = Vec::with_capacity(raw.len());
        for (name, weight) in raw {
            let attr = name
                .parse::<Attribute>()
                .map_err(|_| ConfigError::UnknownAttribute(name.clone()))?;
            parsed.push((attr, weight));
        }
        Self::new(parsed)
    }
}

impl From<AttributeWeights> for BTreeMap<Attribute, f64> {
    fn from(weights: AttributeWeights) -> Self {
        weights.weights.into_iter().collect()
    }
}
