use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::de;

/// One ingredient quantity within a medium composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionEntry {
    #[serde(alias = "ingredient", deserialize_with = "de::text")]
    pub name: String,
    #[serde(alias = "g/L", default, deserialize_with = "de::opt_f64")]
    pub g_l: Option<f64>,
    #[serde(alias = "mmol/L", default, deserialize_with = "de::opt_f64")]
    pub mmol_l: Option<f64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub optional: bool,
}

/// A medium composition joined with the ingredient catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediumRecipe {
    pub medium_id: EntityId,
    pub name: String,
    pub lines: Vec<RecipeLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeLine {
    pub ingredient: String,
    /// Set when the ingredient name resolves through the name index.
    pub ingredient_id: Option<EntityId>,
    pub g_l: Option<f64>,
    pub mmol_l: Option<f64>,
    pub optional: bool,
}

impl MediumRecipe {
    /// Lines whose ingredient name did not resolve.
    pub fn unresolved(&self) -> impl Iterator<Item = &RecipeLine> {
        self.lines.iter().filter(|line| line.ingredient_id.is_none())
    }
}
