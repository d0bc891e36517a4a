//! Read-only queries over a loaded snapshot.
//!
//! Every accessor is total: unknown ids and names yield `None` or an empty
//! list, never an error or a panic.

use std::collections::HashSet;

use mediadive_model::{
    CompositionEntry, EntityId, Ingredient, IngredientDetail, Medium, MediumRecipe, MediumView,
    RecipeLine, Solution, SolutionComposition, Strain,
};
use tracing::debug;

use crate::snapshot::Snapshot;

/// Borrowed view over the store's current snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Catalog<'a> {
    pub(crate) fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// All media in source order, each with its canonical id.
    pub fn media(&self) -> Vec<MediumView<'a>> {
        self.snapshot
            .media
            .iter()
            .map(|medium| MediumView {
                medium,
                canonical_id: self
                    .snapshot
                    .canon_map
                    .get(&medium.id)
                    .unwrap_or(&medium.id),
            })
            .collect()
    }

    pub fn medium(&self, id: impl Into<EntityId>) -> Option<&'a Medium> {
        let position = *self.snapshot.media_by_id.get(&id.into())?;
        self.snapshot.media.get(position)
    }

    /// Id of the representative of the medium's description group.
    pub fn canonical_id(&self, id: impl Into<EntityId>) -> Option<&'a EntityId> {
        let medium = self.medium(id)?;
        Some(
            self.snapshot
                .canon_map
                .get(&medium.id)
                .unwrap_or(&medium.id),
        )
    }

    /// Media sharing a canonical id with `id`, including the medium itself.
    pub fn equivalent_media(&self, id: impl Into<EntityId>) -> Vec<&'a Medium> {
        let Some(canonical) = self.canonical_id(id) else {
            return Vec::new();
        };
        self.media()
            .into_iter()
            .filter(|view| view.canonical_id == canonical)
            .map(|view| view.medium)
            .collect()
    }

    pub fn composition(&self, id: impl Into<EntityId>) -> Option<&'a [CompositionEntry]> {
        self.snapshot
            .compositions
            .get(&id.into())
            .map(Vec::as_slice)
    }

    pub fn solutions(&self) -> &'a [Solution] {
        &self.snapshot.solutions
    }

    pub fn solution(&self, id: impl Into<EntityId>) -> Option<&'a Solution> {
        let position = *self.snapshot.solutions_by_id.get(&id.into())?;
        self.snapshot.solutions.get(position)
    }

    pub fn solution_composition(&self, id: impl Into<EntityId>) -> Option<&'a SolutionComposition> {
        self.snapshot.solution_compositions.get(&id.into())
    }

    pub fn ingredients(&self) -> &'a [Ingredient] {
        &self.snapshot.ingredients
    }

    pub fn ingredient(&self, id: impl Into<EntityId>) -> Option<&'a Ingredient> {
        let position = *self.snapshot.ingredients_by_id.get(&id.into())?;
        self.snapshot.ingredients.get(position)
    }

    /// Case-insensitive lookup by ingredient name.
    pub fn ingredient_by_name(&self, name: &str) -> Option<&'a Ingredient> {
        let position = *self
            .snapshot
            .ingredients_by_name
            .get(&name.to_lowercase())?;
        self.snapshot.ingredients.get(position)
    }

    pub fn ingredient_details(&self, id: impl Into<EntityId>) -> Option<&'a IngredientDetail> {
        self.snapshot.ingredient_details.get(&id.into())
    }

    pub fn strains_for_medium(&self, id: impl Into<EntityId>) -> Option<&'a [Strain]> {
        self.snapshot
            .medium_strains
            .get(&id.into())
            .map(Vec::as_slice)
    }

    /// Strain names in source order.
    pub fn all_strains(&self) -> Vec<&'a str> {
        self.snapshot.microbe_media.names().collect()
    }

    /// Media known to support the strain, in listed order.
    ///
    /// Repeated ids are listed once and ids with no medium record are
    /// skipped.
    pub fn media_for_strain(&self, name: &str) -> Vec<&'a Medium> {
        let mut seen = HashSet::new();
        let mut media = Vec::new();
        for id in self.snapshot.microbe_media.media_ids(name) {
            if !seen.insert(id) {
                continue;
            }
            match self.medium(id) {
                Some(medium) => media.push(medium),
                None => debug!(strain = name, medium_id = %id, "skipping unknown medium"),
            }
        }
        media
    }

    /// A medium's composition with each ingredient resolved by name.
    ///
    /// Returns `None` when either the medium or its composition is unknown.
    pub fn medium_recipe(&self, id: impl Into<EntityId>) -> Option<MediumRecipe> {
        let id = id.into();
        let medium = self.medium(&id)?;
        let entries = self.composition(&id)?;

        let lines = entries
            .iter()
            .map(|entry| RecipeLine {
                ingredient: entry.name.clone(),
                ingredient_id: self
                    .ingredient_by_name(&entry.name)
                    .map(|ingredient| ingredient.id.clone()),
                g_l: entry.g_l,
                mmol_l: entry.mmol_l,
                optional: entry.optional,
            })
            .collect();

        Some(MediumRecipe {
            medium_id: medium.id.clone(),
            name: medium.name.clone(),
            lines,
        })
    }
}
