use std::collections::HashMap;

use mediadive_model::{
    CompositionEntry, EntityId, Ingredient, IngredientDetail, Medium, MicrobeToMedia, Solution,
    SolutionComposition, Strain,
};
use serde::de::DeserializeOwned;

use crate::index::{CanonMap, canonicalize, id_index, ingredient_name_index};
use crate::{Collection, StoreError};

/// Everything one successful load produced.
#[derive(Debug, Default)]
pub(crate) struct Snapshot {
    pub media: Vec<Medium>,
    pub compositions: HashMap<EntityId, Vec<CompositionEntry>>,
    pub solutions: Vec<Solution>,
    pub solution_compositions: HashMap<EntityId, SolutionComposition>,
    pub ingredients: Vec<Ingredient>,
    pub ingredient_details: HashMap<EntityId, IngredientDetail>,
    pub medium_strains: HashMap<EntityId, Vec<Strain>>,
    pub microbe_media: MicrobeToMedia,

    pub canon_map: CanonMap,
    pub ingredients_by_name: HashMap<String, usize>,
    pub media_by_id: HashMap<EntityId, usize>,
    pub solutions_by_id: HashMap<EntityId, usize>,
    pub ingredients_by_id: HashMap<EntityId, usize>,
}

/// Collections parsed so far during a load.
#[derive(Debug, Default)]
pub(crate) struct SnapshotBuilder {
    media: Vec<Medium>,
    compositions: HashMap<EntityId, Vec<CompositionEntry>>,
    solutions: Vec<Solution>,
    solution_compositions: HashMap<EntityId, SolutionComposition>,
    ingredients: Vec<Ingredient>,
    ingredient_details: HashMap<EntityId, IngredientDetail>,
    medium_strains: HashMap<EntityId, Vec<Strain>>,
    microbe_media: MicrobeToMedia,
}

impl SnapshotBuilder {
    /// Parse one collection document, returning its record count.
    pub fn parse(&mut self, collection: Collection, bytes: &[u8]) -> Result<usize, StoreError> {
        let count = match collection {
            Collection::Media => {
                self.media = decode(collection, bytes)?;
                self.media.len()
            }
            Collection::MediumCompositions => {
                self.compositions = decode(collection, bytes)?;
                self.compositions.len()
            }
            Collection::Solutions => {
                self.solutions = decode(collection, bytes)?;
                self.solutions.len()
            }
            Collection::SolutionCompositions => {
                self.solution_compositions = decode(collection, bytes)?;
                self.solution_compositions.len()
            }
            Collection::Ingredients => {
                self.ingredients = decode(collection, bytes)?;
                self.ingredients.len()
            }
            Collection::IngredientDetails => {
                self.ingredient_details = decode(collection, bytes)?;
                self.ingredient_details.len()
            }
            Collection::MediumStrains => {
                self.medium_strains = decode(collection, bytes)?;
                self.medium_strains.len()
            }
            Collection::MicrobeMedia => {
                self.microbe_media = decode(collection, bytes)?;
                self.microbe_media.len()
            }
        };
        Ok(count)
    }

    /// Build the derived indices and freeze the snapshot.
    pub fn build(self) -> Snapshot {
        let canon_map = canonicalize(&self.media);
        let ingredients_by_name = ingredient_name_index(&self.ingredients);
        let media_by_id = id_index(&self.media, |m| &m.id);
        let solutions_by_id = id_index(&self.solutions, |s| &s.id);
        let ingredients_by_id = id_index(&self.ingredients, |i| &i.id);

        Snapshot {
            media: self.media,
            compositions: self.compositions,
            solutions: self.solutions,
            solution_compositions: self.solution_compositions,
            ingredients: self.ingredients,
            ingredient_details: self.ingredient_details,
            medium_strains: self.medium_strains,
            microbe_media: self.microbe_media,
            canon_map,
            ingredients_by_name,
            media_by_id,
            solutions_by_id,
            ingredients_by_id,
        }
    }
}

fn decode<T: DeserializeOwned>(collection: Collection, bytes: &[u8]) -> Result<T, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Parse { collection, source })
}
