//! Entity attribute models (multi-valued, AI- or user-sourced).

use attire_core::Id;
use serde::{Deserialize, Serialize};

/// Who produced an attribute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeSource {
    User,
    Ai,
}

/// A named attribute key (e.g. "color", "material").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub id: Id,
    pub key: String,
}

/// A canonical value under a definition (e.g. "Red" under "color").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeValue {
    pub id: Id,
    pub definition_id: Id,
    pub value: String,
}

/// One attribute assignment on an entity. Multiple rows per
/// (entity, definition) are allowed; attributes are multi-valued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityAttribute {
    pub id: Id,
    pub entity_type: String,
    pub entity_id: Id,
    pub definition_id: Id,
    pub value_id: Option<Id>,
    pub raw_value: Option<String>,
    /// In `0.0..=1.0`; `None` for user-sourced rows.
    pub confidence: Option<f64>,
    pub source: AttributeSource,
}

/// Input for inserting a new attribute row.
#[derive(Debug, Clone)]
pub struct NewEntityAttribute {
    pub entity_type: String,
    pub entity_id: Id,
    pub definition_id: Id,
    pub value_id: Option<Id>,
    pub raw_value: Option<String>,
    pub confidence: Option<f64>,
    pub source: AttributeSource,
}
