//! Per-attribute comparators
//!
//! Each comparator turns a (required, offered) value pair into a credit in
//! [0.0, 1.0]. Both values are already normalized. Scalar attributes accept an
//! over-specified candidate for partial credit; everything else is
//! equality-only.

use specmatch_core::{
    parse_magnitude, Attribute, AttributeValue, CROSS_SECTION_UNITS, VOLTAGE_UNITS,
};

/// Credit for a higher-rated cable than asked for
pub const VOLTAGE_OVERSPEC_CREDIT: f64 = 0.8;

/// Credit for a thicker conductor than asked for
pub const CROSS_SECTION_OVERSPEC_CREDIT: f64 = 0.9;

/// Magnitudes closer than this are the same rating
pub const MAGNITUDE_TOLERANCE: f64 = 0.1;

/// Credit earned by `offered` against `required` for one attribute
pub fn credit(attribute: Attribute, required: &AttributeValue, offered: &AttributeValue) -> f64 {
    if required == offered {
        return 1.0;
    }

    match attribute {
        Attribute::Voltage => {
            scalar_credit(required, offered, VOLTAGE_UNITS, VOLTAGE_OVERSPEC_CREDIT)
        }
        Attribute::CrossSection => scalar_credit(
            required,
            offered,
            CROSS_SECTION_UNITS,
            CROSS_SECTION_OVERSPEC_CREDIT,
        ),
        // Core count is not substitutable; the rest are categorical
        _ => 0.0,
    }
}

/// Equal within tolerance: 1. Candidate higher: `overspec`. Lower or
/// unparsable on either side: 0.
fn scalar_credit(
    required: &AttributeValue,
    offered: &AttributeValue,
    units: &[&str],
    overspec: f64,
) -> f64 {
    let (Some(required), Some(offered)) = (magnitude(required, units), magnitude(offered, units))
    else {
        return 0.0;
    };

    if (required - offered).abs() < MAGNITUDE_TOLERANCE {
        1.0
    } else if offered > required {
        overspec
    } else {
        0.0
    }
}

fn magnitude(value: &AttributeValue, units: &[&str]) -> Option<f64> {
    match value {
        AttributeValue::Text(s) => parse_magnitude(s, units),
        AttributeValue::Count(n) => Some(f64::from(*n)),
    }
}
