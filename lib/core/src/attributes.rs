//! Technical attribute records.
//!
//! An [`AttributeRecord`] holds the normalized technical attributes of either
//! a buyer requirement or a catalog item. Values are normalized when the
//! record is built, so two records can be compared directly.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The technical attributes a cable is described by, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Voltage,
    ConductorMaterial,
    CrossSection,
    CoreCount,
    Insulation,
    Armouring,
    Sheathing,
}

impl Attribute {
    /// All attributes in canonical order
    pub const ALL: [Attribute; 7] = [
        Attribute::Voltage,
        Attribute::ConductorMaterial,
        Attribute::CrossSection,
        Attribute::CoreCount,
        Attribute::Insulation,
        Attribute::Armouring,
        Attribute::Sheathing,
    ];

    /// Attributes a requirement should always state
    pub const CRITICAL: [Attribute; 3] = [
        Attribute::Voltage,
        Attribute::ConductorMaterial,
        Attribute::CrossSection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Voltage => "voltage",
            Attribute::ConductorMaterial => "conductor_material",
            Attribute::CrossSection => "cross_section",
            Attribute::CoreCount => "core_count",
            Attribute::Insulation => "insulation",
            Attribute::Armouring => "armouring",
            Attribute::Sheathing => "sheathing",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attr| attr.as_str() == s)
            .ok_or_else(|| format!("unknown attribute '{}'", s))
    }
}

/// A single normalized attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Count(u32),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Count(n) => write!(f, "{}", n),
        }
    }
}

/// Parse the numeric magnitude of a value such as `11kv` or `300sqmm`.
///
/// The unit suffix must be one of `units` (or absent) and is otherwise
/// ignored. Returns `None` for anything that does not parse.
pub fn parse_magnitude(value: &str, units: &[&str]) -> Option<f64> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let unit = unit.trim();

    if !unit.is_empty() && !units.contains(&unit) {
        return None;
    }

    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Units accepted on voltage values
pub const VOLTAGE_UNITS: &[&str] = &["kv", "v"];

/// Units accepted on cross-section values
pub const CROSS_SECTION_UNITS: &[&str] = &["sqmm"];

/// Normalized technical attributes of a requirement or catalog item.
///
/// Immutable once built. An attribute that is absent is unspecified; empty
/// strings never make it into a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAttributeRecord", into = "RawAttributeRecord")]
pub struct AttributeRecord {
    values: [Option<AttributeValue>; 7],
}

impl AttributeRecord {
    /// A record with nothing specified
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> AttributeRecordBuilder {
        AttributeRecordBuilder::default()
    }

    #[inline]
    pub fn get(&self, attribute: Attribute) -> Option<&AttributeValue> {
        self.values[attribute.slot()].as_ref()
    }

    #[inline]
    pub fn is_specified(&self, attribute: Attribute) -> bool {
        self.get(attribute).is_some()
    }

    /// True when no attribute is specified at all
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Specified attributes with their values, in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &AttributeValue)> {
        Attribute::ALL
            .iter()
            .filter_map(move |&attr| self.get(attr).map(|v| (attr, v)))
    }

    /// Advisory checks on a requirement record.
    ///
    /// Reports missing critical attributes and malformed numeric values. An
    /// empty result means the record looks complete.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        for attr in Attribute::CRITICAL {
            if !self.is_specified(attr) {
                issues.push(ValidationIssue::MissingCritical(attr));
            }
        }

        for (attr, units) in [
            (Attribute::Voltage, VOLTAGE_UNITS),
            (Attribute::CrossSection, CROSS_SECTION_UNITS),
        ] {
            if let Some(AttributeValue::Text(value)) = self.get(attr) {
                if parse_magnitude(value, units).is_none() {
                    issues.push(ValidationIssue::InvalidFormat {
                        attribute: attr,
                        value: value.clone(),
                    });
                }
            }
        }

        if let Some(AttributeValue::Count(0)) = self.get(Attribute::CoreCount) {
            issues.push(ValidationIssue::InvalidCoreCount);
        }

        issues
    }
}

/// Problems found by [`AttributeRecord::validate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingCritical(Attribute),
    InvalidFormat { attribute: Attribute, value: String },
    InvalidCoreCount,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingCritical(attr) => {
                write!(f, "missing critical attribute: {}", attr)
            }
            ValidationIssue::InvalidFormat { attribute, value } => {
                write!(f, "invalid {} format: {}", attribute, value)
            }
            ValidationIssue::InvalidCoreCount => f.write_str("invalid core count: 0"),
        }
    }
}

/// Builder for [`AttributeRecord`]; normalizes every text value it is given.
#[derive(Debug, Clone, Default)]
pub struct AttributeRecordBuilder {
    values: [Option<AttributeValue>; 7],
}

impl AttributeRecordBuilder {
    /// Set a text attribute. Blank values leave the attribute unspecified.
    ///
    /// Setting `core_count` through here parses the text as a count; text
    /// that is not a count is kept as-is so it can still be compared.
    pub fn text(mut self, attribute: Attribute, raw: impl AsRef<str>) -> Self {
        let normalized = normalize(raw.as_ref());
        self.values[attribute.slot()] = if normalized.is_empty() {
            None
        } else if attribute == Attribute::CoreCount {
            Some(match normalized.parse::<u32>() {
                Ok(n) => AttributeValue::Count(n),
                Err(_) => AttributeValue::Text(normalized),
            })
        } else {
            Some(AttributeValue::Text(normalized))
        };
        self
    }

    pub fn voltage(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::Voltage, raw)
    }

    pub fn conductor_material(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::ConductorMaterial, raw)
    }

    pub fn cross_section(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::CrossSection, raw)
    }

    pub fn core_count(mut self, count: u32) -> Self {
        self.values[Attribute::CoreCount.slot()] = Some(AttributeValue::Count(count));
        self
    }

    pub fn insulation(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::Insulation, raw)
    }

    pub fn armouring(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::Armouring, raw)
    }

    pub fn sheathing(self, raw: impl AsRef<str>) -> Self {
        self.text(Attribute::Sheathing, raw)
    }

    #[must_use]
    pub fn build(self) -> AttributeRecord {
        AttributeRecord {
            values: self.values,
        }
    }
}

/// Wire shape of an attribute record: flat optional fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawAttributeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    voltage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conductor_material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cross_section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    core_count: Option<RawCoreCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    insulation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    armouring: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sheathing: Option<String>,
}

/// A core count on the wire: a number, or text that is not one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawCoreCount {
    Count(u32),
    Text(String),
}

impl From<RawAttributeRecord> for AttributeRecord {
    fn from(raw: RawAttributeRecord) -> Self {
        let mut builder = AttributeRecord::builder();
        let text_fields = [
            (Attribute::Voltage, raw.voltage),
            (Attribute::ConductorMaterial, raw.conductor_material),
            (Attribute::CrossSection, raw.cross_section),
            (Attribute::Insulation, raw.insulation),
            (Attribute::Armouring, raw.armouring),
            (Attribute::Sheathing, raw.sheathing),
        ];
        for (attr, value) in text_fields {
            if let Some(value) = value {
                builder = builder.text(attr, value);
            }
        }
        match raw.core_count {
            Some(RawCoreCount::Count(count)) => builder = builder.core_count(count),
            Some(RawCoreCount::Text(text)) => builder = builder.text(Attribute::CoreCount, text),
            None => {}
        }
        builder.build()
    }
}

impl From<AttributeRecord> for RawAttributeRecord {
    fn from(record: AttributeRecord) -> Self {
        let text = |attr: Attribute| record.get(attr).map(ToString::to_string);
        let core_count = record.get(Attribute::CoreCount).map(|value| match value {
            AttributeValue::Count(n) => RawCoreCount::Count(*n),
            AttributeValue::Text(s) => RawCoreCount::Text(s.clone()),
        });
        RawAttributeRecord {
            voltage: text(Attribute::Voltage),
            conductor_material: text(Attribute::ConductorMaterial),
            cross_section: text(Attribute::CrossSection),
            core_count,
            insulation: text(Attribute::Insulation),
            armouring: text(Attribute::Armouring),
            sheathing: text(Attribute::Sheathing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_normalizes_values() {
        let record = AttributeRecord::builder()
            .voltage("11kV")
            .conductor_material("Aluminium")
            .insulation("Cross Linked Polyethylene")
            .build();

        assert_eq!(
            record.get(Attribute::Voltage),
            Some(&AttributeValue::Text("11kv".to_string()))
        );
        assert_eq!(
            record.get(Attribute::ConductorMaterial),
            Some(&AttributeValue::Text("al".to_string()))
        );
        assert_eq!(
            record.get(Attribute::Insulation),
            Some(&AttributeValue::Text("xlpe".to_string()))
        );
    }

    #[test]
    fn test_blank_value_is_unspecified() {
        let record = AttributeRecord::builder().voltage("   ").sheathing("").build();
        assert!(record.is_empty());
    }

    #[test]
    fn test_core_count_text_parses_as_count() {
        let record = AttributeRecord::builder()
            .text(Attribute::CoreCount, " 4 ")
            .build();
        assert_eq!(record.get(Attribute::CoreCount), Some(&AttributeValue::Count(4)));
    }

    #[test]
    fn test_deserialize_normalizes_and_drops_empty() {
        let record: AttributeRecord = serde_json::from_str(
            r#"{"voltage": "33kV", "conductor_material": "Copper", "armouring": "", "core_count": 3}"#,
        )
        .unwrap();

        assert_eq!(record.get(Attribute::Voltage).unwrap().to_string(), "33kv");
        assert_eq!(record.get(Attribute::ConductorMaterial).unwrap().to_string(), "cu");
        assert!(!record.is_specified(Attribute::Armouring));
        assert_eq!(record.get(Attribute::CoreCount), Some(&AttributeValue::Count(3)));
    }

    #[test]
    fn test_serialize_skips_unspecified() {
        let record = AttributeRecord::builder().voltage("11kv").core_count(3).build();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"voltage": "11kv", "core_count": 3}));
    }

    #[test]
    fn test_text_core_count_survives_serialization() {
        let record = AttributeRecord::builder()
            .text(Attribute::CoreCount, "3.5")
            .voltage("11kv")
            .build();
        assert_eq!(
            record.get(Attribute::CoreCount),
            Some(&AttributeValue::Text("3.5".to_string()))
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"voltage": "11kv", "core_count": "3.5"}));

        let parsed: AttributeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_numeric_core_count_text_deserializes_as_count() {
        let record: AttributeRecord = serde_json::from_str(r#"{"core_count": " 3 "}"#).unwrap();
        assert_eq!(record.get(Attribute::CoreCount), Some(&AttributeValue::Count(3)));
    }

    #[test]
    fn test_iter_is_canonical_order() {
        let record = AttributeRecord::builder()
            .sheathing("pvc")
            .voltage("11kv")
            .core_count(3)
            .build();
        let attrs: Vec<_> = record.iter().map(|(a, _)| a).collect();
        assert_eq!(
            attrs,
            vec![Attribute::Voltage, Attribute::CoreCount, Attribute::Sheathing]
        );
    }

    #[test]
    fn test_attribute_from_str() {
        assert_eq!("cross_section".parse::<Attribute>(), Ok(Attribute::CrossSection));
        assert!("colour".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_parse_magnitude() {
        assert_eq!(parse_magnitude("11kv", VOLTAGE_UNITS), Some(11.0));
        assert_eq!(parse_magnitude("1.1kv", VOLTAGE_UNITS), Some(1.1));
        assert_eq!(parse_magnitude("415v", VOLTAGE_UNITS), Some(415.0));
        assert_eq!(parse_magnitude("300sqmm", CROSS_SECTION_UNITS), Some(300.0));
        assert_eq!(parse_magnitude("300", CROSS_SECTION_UNITS), Some(300.0));
        assert_eq!(parse_magnitude("high", VOLTAGE_UNITS), None);
        assert_eq!(parse_magnitude("11kva", VOLTAGE_UNITS), None);
        assert_eq!(parse_magnitude("1.2.3kv", VOLTAGE_UNITS), None);
    }

    #[test]
    fn test_validate_complete_record() {
        let record = AttributeRecord::builder()
            .voltage("11kv")
            .conductor_material("al")
            .cross_section("300sqmm")
            .core_count(3)
            .build();
        assert!(record.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let record = AttributeRecord::builder()
            .voltage("medium")
            .core_count(0)
            .build();
        let issues = record.validate();

        assert!(issues.contains(&ValidationIssue::MissingCritical(Attribute::ConductorMaterial)));
        assert!(issues.contains(&ValidationIssue::MissingCritical(Attribute::CrossSection)));
        assert!(issues.contains(&ValidationIssue::InvalidFormat {
            attribute: Attribute::Voltage,
            value: "medium".to_string(),
        }));
        assert!(issues.contains(&ValidationIssue::InvalidCoreCount));
    }
}
