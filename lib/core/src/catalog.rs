use crate::attributes::AttributeRecord;
use serde::{Deserialize, Serialize};

/// A product from the internal catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique catalog identifier (SKU)
    pub id: String,
    /// Display name
    pub name: String,
    /// Datasheet text, used for similarity search
    pub text: String,
    /// Normalized technical attributes
    #[serde(alias = "specs")]
    pub attributes: AttributeRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
        attributes: AttributeRecord,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text: text.into(),
            attributes,
            category: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One line item of a buyer requirement, as handed over by the extraction layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub item_id: u64,
    /// Raw requirement text, used for candidate retrieval
    pub text: String,
    /// Normalized attributes extracted from the text
    #[serde(default)]
    pub attributes: AttributeRecord,
}

impl Requirement {
    #[must_use]
    pub fn new(item_id: u64, text: impl Into<String>, attributes: AttributeRecord) -> Self {
        Self {
            item_id,
            text: text.into(),
            attributes,
        }
    }
}
