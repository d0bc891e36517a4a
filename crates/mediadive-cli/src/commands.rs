use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::json;
use tracing::{info_span, warn};

use mediadive_store::{Catalog, DataStore, DirectorySource, data_root};
use mediadive_table::{Column, ListView, Row};

use crate::cli::{Command, ListArgs, OutputFormatArg};
use crate::render::{detail_table, list_table, row_count_line};
use crate::views;

/// Open the data directory and load every collection.
pub async fn load_store(data_dir: Option<&Path>) -> Result<DataStore<DirectorySource>> {
    let root = data_dir.map_or_else(data_root, Path::to_path_buf);
    let source = DirectorySource::open(&root)
        .with_context(|| format!("open data directory {}", root.display()))?;
    let mut store = DataStore::new(source);
    store.load().await.context("load catalog")?;
    Ok(store)
}

pub fn run_command<W: Write>(
    command: &Command,
    catalog: Catalog<'_>,
    format: OutputFormatArg,
    out: &mut W,
) -> Result<()> {
    let _span = info_span!("command", name = command.name()).entered();
    match command {
        Command::Media(args) => {
            let media = catalog.media();
            let view = filtered_view(views::media_columns(), views::media_rows(&media), args);
            write_list(out, format, &view, &media)
        }
        Command::Medium(args) => run_medium(&args.id, catalog, format, out),
        Command::Solutions(args) => {
            let solutions = catalog.solutions();
            let view = filtered_view(
                views::solution_columns(),
                views::solution_rows(solutions),
                args,
            );
            write_list(out, format, &view, solutions)
        }
        Command::Solution(args) => run_solution(&args.id, catalog, format, out),
        Command::Ingredients(args) => {
            let ingredients = catalog.ingredients();
            let view = filtered_view(
                views::ingredient_columns(),
                views::ingredient_rows(ingredients),
                args,
            );
            write_list(out, format, &view, ingredients)
        }
        Command::Ingredient(args) => run_ingredient(&args.id, catalog, format, out),
        Command::Strains(args) => {
            let strains: Vec<(&str, usize)> = catalog
                .all_strains()
                .into_iter()
                .map(|name| (name, catalog.media_for_strain(name).len()))
                .collect();
            let view = filtered_view(
                views::strain_name_columns(),
                views::strain_name_rows(&strains),
                args,
            );
            let records: Vec<_> = strains
                .iter()
                .map(|(name, media)| json!({ "name": name, "media": media }))
                .collect();
            write_list(out, format, &view, &records)
        }
        Command::Strain(args) => run_strain(&args.name, catalog, format, out),
    }
}

fn run_medium<W: Write>(
    id: &str,
    catalog: Catalog<'_>,
    format: OutputFormatArg,
    out: &mut W,
) -> Result<()> {
    let Some(medium) = catalog.medium(id) else {
        bail!("medium {id} not found");
    };
    let canonical_id = catalog.canonical_id(id).unwrap_or(&medium.id);
    let equivalent: Vec<&str> = catalog
        .equivalent_media(id)
        .iter()
        .map(|m| m.id.as_str())
        .filter(|other| *other != medium.id.as_str())
        .collect();
    let recipe = catalog.medium_recipe(id);
    let strains = catalog.strains_for_medium(id).unwrap_or_default();

    if format == OutputFormatArg::Json {
        let document = json!({
            "medium": medium,
            "canonical_id": canonical_id,
            "equivalent_media": equivalent,
            "recipe": recipe.as_ref().map(|r| &r.lines),
            "strains": strains,
        });
        return write_json(out, &document);
    }

    writeln!(
        out,
        "{}",
        detail_table(&views::medium_fields(medium, canonical_id.as_str()))
    )?;
    if !equivalent.is_empty() {
        writeln!(out, "Equivalent media: {}", equivalent.join(", "))?;
    }

    match &recipe {
        Some(recipe) => {
            writeln!(out, "\nComposition:")?;
            let view = ListView::new(views::recipe_columns(), views::recipe_rows(recipe));
            writeln!(out, "{}", list_table(view.table()))?;
            let unresolved = recipe.unresolved().count();
            if unresolved > 0 {
                writeln!(out, "{unresolved} ingredient(s) not found in the catalog")?;
            }
        }
        None => writeln!(out, "\nNo composition data found for this medium.")?,
    }

    if !strains.is_empty() {
        writeln!(out, "\nStrains:")?;
        let view = ListView::new(
            views::medium_strain_columns(),
            views::medium_strain_rows(strains),
        );
        writeln!(out, "{}", list_table(view.table()))?;
    }
    Ok(())
}

fn run_solution<W: Write>(
    id: &str,
    catalog: Catalog<'_>,
    format: OutputFormatArg,
    out: &mut W,
) -> Result<()> {
    let Some(solution) = catalog.solution(id) else {
        bail!("solution {id} not found");
    };
    let composition = catalog.solution_composition(id);

    if format == OutputFormatArg::Json {
        let document = json!({ "solution": solution, "composition": composition });
        return write_json(out, &document);
    }

    writeln!(out, "{}", detail_table(&views::solution_fields(solution)))?;
    match composition {
        Some(composition) => {
            writeln!(out, "\nRecipe:")?;
            let view = ListView::new(
                views::recipe_columns(),
                views::solution_recipe_rows(composition),
            );
            writeln!(out, "{}", list_table(view.table()))?;
        }
        None => writeln!(out, "\nNo recipe data found for this solution.")?,
    }
    Ok(())
}

fn run_ingredient<W: Write>(
    id: &str,
    catalog: Catalog<'_>,
    format: OutputFormatArg,
    out: &mut W,
) -> Result<()> {
    let Some(ingredient) = catalog.ingredient(id) else {
        bail!("ingredient {id} not found");
    };
    let detail = catalog.ingredient_details(id);

    if format == OutputFormatArg::Json {
        let document = json!({ "ingredient": ingredient, "details": detail });
        return write_json(out, &document);
    }

    writeln!(
        out,
        "{}",
        detail_table(&views::ingredient_fields(ingredient, detail))
    )?;
    Ok(())
}

fn run_strain<W: Write>(
    name: &str,
    catalog: Catalog<'_>,
    format: OutputFormatArg,
    out: &mut W,
) -> Result<()> {
    if !catalog.all_strains().contains(&name) {
        bail!("strain {name} not found");
    }
    let media = catalog.media_for_strain(name);

    if format == OutputFormatArg::Json {
        return write_json(out, &json!({ "strain": name, "media": media }));
    }

    writeln!(out, "Strain: {name}")?;
    let view = ListView::new(
        views::medium_list_columns(),
        views::medium_list_rows(&media),
    );
    writeln!(out, "{}", list_table(view.table()))?;
    Ok(())
}

/// Build a list view with the `--filter` arguments applied.
fn filtered_view(columns: Vec<Column>, rows: Vec<Row>, args: &ListArgs) -> ListView {
    for (key, _) in &args.filters {
        if !columns.iter().any(|column| &column.key == key) {
            warn!(key = %key, "ignoring filter on unknown column");
        }
    }
    let mut view = ListView::new(columns, rows);
    for (key, value) in &args.filters {
        view.set_filter(key.as_str(), value.as_str());
    }
    view
}

fn write_list<W: Write, T: Serialize>(
    out: &mut W,
    format: OutputFormatArg,
    view: &ListView,
    records: &[T],
) -> Result<()> {
    let table = view.table();
    match format {
        OutputFormatArg::Table => {
            writeln!(out, "{}", list_table(table))?;
            writeln!(out, "{}", row_count_line(table))?;
            Ok(())
        }
        OutputFormatArg::Json => {
            let visible: Vec<&T> = records
                .iter()
                .enumerate()
                .filter(|(index, _)| table.is_visible(*index))
                .map(|(_, record)| record)
                .collect();
            write_json(out, &visible)
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("write JSON")?;
    writeln!(out)?;
    Ok(())
}
