use specmatch_core::Attribute;

/// Errors raised while building match configuration.
///
/// All of these are fatal at construction time; nothing is clamped or
/// re-normalized behind the caller's back.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Attribute weights cannot be empty")]
    EmptyWeights,

    #[error("Weight for '{attribute}' must be a finite non-negative number, got {weight}")]
    InvalidWeight { attribute: Attribute, weight: f64 },

    #[error("Weights must sum to 1.0 (±{tolerance}), got {sum}")]
    WeightSum { sum: f64, tolerance: f64 },

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Thresholds must satisfy 0 <= minimum <= close <= exact <= 100, got minimum={minimum}, close={close}, exact={exact}")]
    InvalidThresholds { minimum: f64, close: f64, exact: f64 },

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
