use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EntityId;
use crate::de;

/// A chemical ingredient from `ingredients.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: EntityId,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(
        rename = "CAS-RN",
        alias = "cas_rn",
        default,
        deserialize_with = "de::opt_text"
    )]
    pub cas_rn: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub formula: Option<String>,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub mass: Option<f64>,
}

/// Extended attributes of one ingredient, kept in source order.
///
/// The detail documents are open-ended: values may be scalars, arrays or
/// nested objects. Only the ChEBI and PubChem references get typed helpers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientDetail(IndexMap<String, Value>);

impl IngredientDetail {
    pub fn new(attributes: IndexMap<String, Value>) -> Self {
        Self(attributes)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text for an attribute; arrays are joined with `", "`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(display_value)
    }

    pub fn chebi_id(&self) -> Option<String> {
        self.find_reference(&["chebi", "chebiid"])
    }

    pub fn pubchem_id(&self) -> Option<String> {
        self.find_reference(&["pubchem", "pubchemid", "pubchemcid"])
    }

    fn find_reference(&self, keys: &[&str]) -> Option<String> {
        self.0.iter().find_map(|(key, value)| {
            let folded: String = key
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase();
            if keys.contains(&folded.as_str()) {
                display_value(value)
            } else {
                None
            }
        })
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
    }
}
