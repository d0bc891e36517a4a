//! Row and column models for every catalog view.

use mediadive_model::{
    Ingredient, IngredientDetail, Medium, MediumRecipe, MediumView, Solution, SolutionComposition,
    Strain,
};
use mediadive_table::{Cell, Column, Row};

pub fn media_columns() -> Vec<Column> {
    vec![
        Column::searchable("id", "ID"),
        Column::searchable("name", "Name"),
        Column::searchable("source", "Source"),
        Column::new("ph", "pH"),
        Column::new("complex", "Complex"),
    ]
}

/// Names link to the canonical medium of their description group.
pub fn media_rows(media: &[MediumView<'_>]) -> Vec<Row> {
    media
        .iter()
        .map(|view| {
            Row::new()
                .with("id", view.id.to_string())
                .with(
                    "name",
                    Cell::linked(view.name.as_str(), medium_link(view.canonical_id.as_str())),
                )
                .with("source", text(view.source.as_deref()))
                .with("ph", format_ph(view.min_ph, view.max_ph))
                .with("complex", yes_no(view.complex_medium))
        })
        .collect()
}

/// Short media listing used by strain views.
pub fn medium_list_columns() -> Vec<Column> {
    vec![
        Column::searchable("id", "ID"),
        Column::searchable("name", "Name"),
        Column::new("ph", "pH"),
    ]
}

pub fn medium_list_rows(media: &[&Medium]) -> Vec<Row> {
    media
        .iter()
        .map(|medium| {
            Row::new()
                .with("id", Cell::linked(medium.id.to_string(), medium_link(medium.id.as_str())))
                .with("name", medium.name.as_str())
                .with("ph", format_ph(medium.min_ph, medium.max_ph))
        })
        .collect()
}

pub fn solution_columns() -> Vec<Column> {
    vec![
        Column::searchable("id", "ID"),
        Column::searchable("name", "Name"),
        Column::new("volume", "Volume"),
    ]
}

pub fn solution_rows(solutions: &[Solution]) -> Vec<Row> {
    solutions
        .iter()
        .map(|solution| {
            Row::new()
                .with("id", solution.id.to_string())
                .with(
                    "name",
                    Cell::linked(
                        solution.name.as_str(),
                        format!("#/solutions/{}", solution.id),
                    ),
                )
                .with("volume", format_amount(solution.volume))
        })
        .collect()
}

pub fn ingredient_columns() -> Vec<Column> {
    vec![
        Column::searchable("id", "ID"),
        Column::searchable("name", "Name"),
        Column::searchable("CAS-RN", "CAS-RN"),
        Column::searchable("formula", "Formula"),
        Column::new("mass", "Mass"),
    ]
}

pub fn ingredient_rows(ingredients: &[Ingredient]) -> Vec<Row> {
    ingredients
        .iter()
        .map(|ingredient| {
            Row::new()
                .with("id", ingredient.id.to_string())
                .with(
                    "name",
                    Cell::linked(ingredient.name.as_str(), ingredient_link(ingredient)),
                )
                .with("CAS-RN", text(ingredient.cas_rn.as_deref()))
                .with("formula", text(ingredient.formula.as_deref()))
                .with("mass", format_amount(ingredient.mass))
        })
        .collect()
}

pub fn strain_name_columns() -> Vec<Column> {
    vec![
        Column::searchable("name", "Strain"),
        Column::new("media", "Media"),
    ]
}

/// `(name, number of resolvable media)` pairs.
pub fn strain_name_rows(strains: &[(&str, usize)]) -> Vec<Row> {
    strains
        .iter()
        .map(|&(name, media)| {
            Row::new()
                .with("name", Cell::linked(name, format!("#/strains/{name}")))
                .with("media", media.to_string())
        })
        .collect()
}

pub fn medium_strain_columns() -> Vec<Column> {
    vec![
        Column::searchable("id", "ID"),
        Column::searchable("species", "Species"),
        Column::searchable("ccno", "Collection No."),
        Column::new("growth", "Growth"),
        Column::new("bacdive", "BacDive"),
    ]
}

pub fn medium_strain_rows(strains: &[Strain]) -> Vec<Row> {
    strains
        .iter()
        .map(|strain| {
            let bacdive = match &strain.bacdive_id {
                Some(id) => Cell::linked(
                    id.to_string(),
                    format!("https://bacdive.dsmz.de/strain/{id}"),
                ),
                None => Cell::default(),
            };
            Row::new()
                .with("id", strain.id.to_string())
                .with("species", strain.species.as_str())
                .with("ccno", text(strain.ccno.as_deref()))
                .with("growth", text(strain.growth.as_deref()))
                .with("bacdive", bacdive)
        })
        .collect()
}

pub fn recipe_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Ingredient"),
        Column::new("g_l", "g/L"),
        Column::new("mmol_l", "mmol/L"),
        Column::new("optional", "Optional"),
    ]
}

/// Resolved ingredients link to their detail view.
pub fn recipe_rows(recipe: &MediumRecipe) -> Vec<Row> {
    recipe
        .lines
        .iter()
        .map(|line| {
            let name = match &line.ingredient_id {
                Some(id) => Cell::linked(line.ingredient.as_str(), format!("#/ingredients/{id}")),
                None => Cell::new(line.ingredient.as_str()),
            };
            Row::new()
                .with("name", name)
                .with("g_l", format_amount(line.g_l))
                .with("mmol_l", format_amount(line.mmol_l))
                .with("optional", yes_no(line.optional))
        })
        .collect()
}

pub fn solution_recipe_rows(composition: &SolutionComposition) -> Vec<Row> {
    composition
        .recipe
        .iter()
        .map(|item| {
            Row::new()
                .with("name", item.compound.as_str())
                .with("g_l", format_amount(item.g_l))
                .with("mmol_l", format_amount(item.mmol_l))
                .with("optional", yes_no(item.optional))
        })
        .collect()
}

/// Header fields of the medium detail view.
pub fn medium_fields(medium: &Medium, canonical_id: &str) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("ID", medium.id.to_string()),
        ("Name", medium.name.clone()),
        ("Source", text(medium.source.as_deref())),
        ("pH", format_ph(medium.min_ph, medium.max_ph)),
        ("Complex", yes_no(medium.complex_medium)),
    ];
    if medium.id.as_str() != canonical_id {
        fields.push(("Same as", canonical_id.to_string()));
    }
    if let Some(link) = &medium.link {
        fields.push(("External link", link.clone()));
    }
    if let Some(description) = &medium.description {
        fields.push(("Description", description.clone()));
    }
    fields
}

pub fn solution_fields(solution: &Solution) -> Vec<(&'static str, String)> {
    vec![
        ("ID", solution.id.to_string()),
        ("Name", solution.name.clone()),
        ("Volume", format_amount(solution.volume)),
    ]
}

/// Catalog fields followed by every reference attribute, in source order.
pub fn ingredient_fields(
    ingredient: &Ingredient,
    detail: Option<&IngredientDetail>,
) -> Vec<(String, String)> {
    let mut fields = vec![
        ("ID".to_string(), ingredient.id.to_string()),
        ("Name".to_string(), ingredient.name.clone()),
        ("CAS-RN".to_string(), text(ingredient.cas_rn.as_deref())),
        ("Formula".to_string(), text(ingredient.formula.as_deref())),
        ("Mass".to_string(), format_amount(ingredient.mass)),
    ];
    if let Some(detail) = detail {
        for (key, _) in detail.attributes() {
            if let Some(value) = detail.text(key) {
                fields.push((key.to_string(), value));
            }
        }
    }
    fields
}

/// `""` when both bounds are missing, a single value when they agree,
/// otherwise `min–max`.
pub fn format_ph(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => String::new(),
        (Some(value), None) | (None, Some(value)) => value.to_string(),
        (Some(min), Some(max)) if min == max => min.to_string(),
        (Some(min), Some(max)) => format!("{min}–{max}"),
    }
}

pub fn format_amount(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn yes_no(flag: bool) -> String {
    let label = if flag { "Yes" } else { "No" };
    label.to_string()
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn medium_link(id: &str) -> String {
    format!("#/media/{id}")
}

fn ingredient_link(ingredient: &Ingredient) -> String {
    format!("#/ingredients/{}", ingredient.id)
}
