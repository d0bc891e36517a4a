//! Schema types for the MediaDive reference collections.
//!
//! Every collection the catalog loads has an explicit type here. Identifiers
//! are normalized into [`EntityId`] while decoding, so numeric and string ids
//! compare equal everywhere downstream.

#![deny(unsafe_code)]

pub mod composition;
mod de;
pub mod error;
pub mod ids;
pub mod ingredient;
pub mod medium;
pub mod solution;
pub mod strain;

pub use composition::{CompositionEntry, MediumRecipe, RecipeLine};
pub use error::{ModelError, Result};
pub use ids::EntityId;
pub use ingredient::{Ingredient, IngredientDetail};
pub use medium::{Medium, MediumView};
pub use solution::{RecipeItem, Solution, SolutionComposition};
pub use strain::{MicrobeToMedia, Strain};
