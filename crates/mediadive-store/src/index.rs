//! Derived cross-reference indices, rebuilt in full on every load.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use mediadive_model::{EntityId, Ingredient, Medium};

/// Medium id to the id of its canonical representative.
pub type CanonMap = HashMap<EntityId, EntityId>;

/// Map every medium to the first medium in input order sharing its
/// normalized description.
///
/// Media without a usable description map to themselves.
pub fn canonicalize(media: &[Medium]) -> CanonMap {
    let mut first_by_description: HashMap<String, &EntityId> = HashMap::new();
    let mut canon = CanonMap::with_capacity(media.len());

    for medium in media {
        let representative = match medium.normalized_description() {
            Some(description) => *first_by_description
                .entry(description)
                .or_insert(&medium.id),
            None => &medium.id,
        };
        canon.insert(medium.id.clone(), representative.clone());
    }
    canon
}

/// Number of distinct canonical representatives.
pub fn canonical_group_count(canon: &CanonMap) -> usize {
    canon
        .iter()
        .filter(|(id, representative)| id == representative)
        .count()
}

/// Lower-cased ingredient name to position; later entries overwrite earlier
/// ones.
pub fn ingredient_name_index(ingredients: &[Ingredient]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(ingredients.len());
    for (position, ingredient) in ingredients.iter().enumerate() {
        index.insert(ingredient.name.to_lowercase(), position);
    }
    index
}

/// Id to position; the first record with a given id wins.
pub fn id_index<T>(items: &[T], id: impl Fn(&T) -> &EntityId) -> HashMap<EntityId, usize> {
    let mut index = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if let Entry::Vacant(slot) = index.entry(id(item).clone()) {
            slot.insert(position);
        }
    }
    index
}
