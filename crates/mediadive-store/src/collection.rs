use std::fmt;
use std::str::FromStr;

use crate::StoreError;

/// The independently retrievable source documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    Media,
    MediumCompositions,
    Solutions,
    SolutionCompositions,
    Ingredients,
    IngredientDetails,
    MediumStrains,
    MicrobeMedia,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Media,
        Collection::MediumCompositions,
        Collection::Solutions,
        Collection::SolutionCompositions,
        Collection::Ingredients,
        Collection::IngredientDetails,
        Collection::MediumStrains,
        Collection::MicrobeMedia,
    ];

    /// Name used in manifests and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Media => "media",
            Collection::MediumCompositions => "medium_compositions",
            Collection::Solutions => "solutions",
            Collection::SolutionCompositions => "solution_compositions",
            Collection::Ingredients => "ingredients",
            Collection::IngredientDetails => "ingredient_details",
            Collection::MediumStrains => "medium_strains",
            Collection::MicrobeMedia => "microbe_media",
        }
    }

    /// File name of the collection in a published data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Collection::Media => "mediaList.json",
            Collection::MediumCompositions => "medium-Composition.json",
            Collection::Solutions => "solutions.json",
            Collection::SolutionCompositions => "solutions-Composition.json",
            Collection::Ingredients => "ingredients.json",
            Collection::IngredientDetails => "ingredients_detail.json",
            Collection::MediumStrains => "mediumStrain.json",
            Collection::MicrobeMedia => "microbeToMedia.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Collection::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::UnknownCollection {
                name: s.to_string(),
            })
    }
}
