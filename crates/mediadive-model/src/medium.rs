use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::de;

/// A growth medium record from `mediaList.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    pub id: EntityId,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(
        rename = "min_pH",
        alias = "min_ph",
        default,
        deserialize_with = "de::opt_f64"
    )]
    pub min_ph: Option<f64>,
    #[serde(
        rename = "max_pH",
        alias = "max_ph",
        default,
        deserialize_with = "de::opt_f64"
    )]
    pub max_ph: Option<f64>,
    #[serde(alias = "complex", default, deserialize_with = "de::flag")]
    pub complex_medium: bool,
    #[serde(alias = "url", default, deserialize_with = "de::opt_text")]
    pub link: Option<String>,
}

impl Medium {
    /// Description key used to detect duplicate media.
    ///
    /// Returns `None` when the description is absent or blank.
    pub fn normalized_description(&self) -> Option<String> {
        let description = self.description.as_deref()?.trim();
        if description.is_empty() {
            None
        } else {
            Some(description.to_lowercase())
        }
    }
}

/// A medium paired with the id of its canonical representative.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MediumView<'a> {
    #[serde(flatten)]
    pub medium: &'a Medium,
    pub canonical_id: &'a EntityId,
}

impl MediumView<'_> {
    /// True when this medium is its own representative.
    pub fn is_canonical(&self) -> bool {
        self.medium.id == *self.canonical_id
    }
}

impl Deref for MediumView<'_> {
    type Target = Medium;

    fn deref(&self) -> &Self::Target {
        self.medium
    }
}
