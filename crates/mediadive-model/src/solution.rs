use serde::{Deserialize, Serialize};

use crate::EntityId;
use crate::de;

/// A reusable sub-recipe referenced from medium compositions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub id: EntityId,
    #[serde(default, deserialize_with = "de::text")]
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_f64")]
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolutionComposition {
    #[serde(default)]
    pub recipe: Vec<RecipeItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeItem {
    #[serde(alias = "name", deserialize_with = "de::text")]
    pub compound: String,
    #[serde(alias = "g/L", default, deserialize_with = "de::opt_f64")]
    pub g_l: Option<f64>,
    #[serde(alias = "mmol/L", default, deserialize_with = "de::opt_f64")]
    pub mmol_l: Option<f64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub optional: bool,
}
