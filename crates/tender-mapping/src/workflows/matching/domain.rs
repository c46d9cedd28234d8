use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Category name to the value the caller selected for it.
pub type Selections = BTreeMap<String, String>;

/// Labeled condition set pointing at a tender type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingRule {
    pub conditions: BTreeMap<String, String>,
    pub matched_tender_type: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl MappingRule {
    pub fn to_tender_type(&self) -> TenderType {
        TenderType {
            name: self.matched_tender_type.clone(),
            attributes: self
                .attributes
                .iter()
                .map(|(name, value)| TenderAttribute {
                    name: name.clone(),
                    value: value.clone(),
                })
                .collect(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderAttribute {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderType {
    pub name: String,
    pub attributes: Vec<TenderAttribute>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenderMappingResult {
    pub matched_tender_type: TenderType,
    pub confidence_score: f64,
    pub alternative_types: Vec<TenderType>,
    pub message: String,
}

/// Allowed values for one selection category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOptions {
    pub category: String,
    pub options: Vec<String>,
}
