//! Integration tests for loading and querying the catalog.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use mediadive_model::EntityId;
use mediadive_store::{Collection, DataSource, DataStore, MemorySource, StoreError};
use serde_json::json;

fn fixture() -> MemorySource {
    let media = json!([
        { "id": 1, "name": "Rich broth A", "description": "rich broth", "min_pH": 7.0, "max_pH": 7.2 },
        { "id": "2", "name": "Rich broth B", "description": "Rich Broth " },
        { "id": 3, "name": "Minimal", "description": null, "complex_medium": 0 },
        { "id": 5, "name": "Marine agar", "description": "marine" }
    ]);
    let compositions = json!({
        "1": [
            { "name": "Peptone", "g_l": 5, "mmol_l": null, "optional": 0 },
            { "name": "NACL", "g_l": "5.0", "optional": 1 },
            { "name": "Mystery extract", "g_l": 1 }
        ]
    });
    let solutions = json!([{ "id": 10, "name": "Trace elements", "volume": "1000" }]);
    let solution_compositions = json!({
        "10": { "recipe": [{ "compound": "ZnSO4", "g_l": 0.1 }] }
    });
    let ingredients = json!([
        { "id": 100, "name": "Peptone" },
        { "id": 101, "name": "NaCl", "CAS-RN": "7647-14-5", "formula": "NaCl", "mass": 58.44 },
        { "id": 102, "name": "nacl" }
    ]);
    let ingredient_details = json!({ "101": { "ChEBI": 26710, "synonyms": ["salt", "halite"] } });
    let medium_strains = json!({
        "1": [{ "id": 900, "species": "Escherichia coli", "ccno": "DSM 498", "bacdive_id": 4907 }]
    });
    // Raw text keeps key order; `json!` objects are sorted.
    let microbe_media = r#"{"X": [5, 5, 7], "Escherichia coli": ["1", 2]}"#;

    MemorySource::new()
        .with(Collection::Media, media.to_string())
        .with(Collection::MediumCompositions, compositions.to_string())
        .with(Collection::Solutions, solutions.to_string())
        .with(Collection::SolutionCompositions, solution_compositions.to_string())
        .with(Collection::Ingredients, ingredients.to_string())
        .with(Collection::IngredientDetails, ingredient_details.to_string())
        .with(Collection::MediumStrains, medium_strains.to_string())
        .with(Collection::MicrobeMedia, microbe_media)
}

async fn loaded() -> DataStore<MemorySource> {
    let mut store = DataStore::new(fixture());
    store.load().await.unwrap();
    store
}

#[tokio::test]
async fn rich_broth_media_share_canonical_id() {
    let store = loaded().await;
    let media = store.catalog().media();

    let rich: Vec<_> = media
        .iter()
        .filter(|m| m.name.starts_with("Rich broth"))
        .collect();
    assert_eq!(rich.len(), 2);
    assert!(rich.iter().all(|m| m.canonical_id.as_str() == "1"));
    assert!(rich[0].is_canonical());
    assert!(!rich[1].is_canonical());

    let minimal = media.iter().find(|m| m.id.as_str() == "3").unwrap();
    assert_eq!(minimal.canonical_id.as_str(), "3");
}

#[tokio::test]
async fn media_keep_source_order() {
    let store = loaded().await;
    let ids: Vec<_> = store
        .catalog()
        .media()
        .iter()
        .map(|m| m.id.to_string())
        .collect();
    assert_eq!(ids, ["1", "2", "3", "5"]);
}

#[tokio::test]
async fn lookups_accept_numeric_and_string_ids() {
    let store = loaded().await;
    let catalog = store.catalog();

    assert_eq!(catalog.medium(2).unwrap().name, "Rich broth B");
    assert_eq!(catalog.medium("1").unwrap().min_ph, Some(7.0));
    assert_eq!(catalog.solution(10u32).unwrap().volume, Some(1000.0));
    assert_eq!(
        catalog.solution_composition("10").unwrap().recipe[0].compound,
        "ZnSO4"
    );
    assert_eq!(
        catalog.ingredient(101).unwrap().cas_rn.as_deref(),
        Some("7647-14-5")
    );
    assert_eq!(
        catalog.ingredient_details(101).unwrap().chebi_id().as_deref(),
        Some("26710")
    );
    assert_eq!(catalog.composition(1).unwrap().len(), 3);
    assert_eq!(
        catalog.strains_for_medium(1).unwrap()[0].bacdive_id,
        Some(EntityId::from(4907))
    );
}

#[tokio::test]
async fn missing_lookups_report_absence() {
    let store = loaded().await;
    let catalog = store.catalog();

    assert!(catalog.medium(404).is_none());
    assert!(catalog.composition(2).is_none());
    assert!(catalog.solution("nope").is_none());
    assert!(catalog.solution_composition(404).is_none());
    assert!(catalog.ingredient(404).is_none());
    assert!(catalog.ingredient_details(100).is_none());
    assert!(catalog.strains_for_medium(5).is_none());
    assert!(catalog.ingredient_by_name("unobtainium").is_none());
    assert!(catalog.media_for_strain("nobody").is_empty());
    assert!(catalog.equivalent_media(404).is_empty());
    assert!(catalog.canonical_id(404).is_none());
    assert!(catalog.medium_recipe(404).is_none());
}

#[tokio::test]
async fn ingredient_names_resolve_case_insensitively_last_wins() {
    let store = loaded().await;
    let catalog = store.catalog();

    assert_eq!(catalog.ingredient_by_name("PEPTONE").unwrap().id.as_str(), "100");
    assert_eq!(catalog.ingredient_by_name("NaCl").unwrap().id.as_str(), "102");
}

#[tokio::test]
async fn strain_media_are_deduplicated_and_dangling_ids_dropped() {
    let store = loaded().await;
    let catalog = store.catalog();

    let media = catalog.media_for_strain("X");
    let ids: Vec<_> = media.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["5"]);

    let ecoli: Vec<_> = catalog
        .media_for_strain("Escherichia coli")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ecoli, ["1", "2"]);
    assert_eq!(catalog.all_strains(), ["X", "Escherichia coli"]);
}

#[tokio::test]
async fn strain_media_keep_first_occurrence_order() {
    let media = json!([
        { "id": 5, "name": "Marine agar" },
        { "id": 7, "name": "Seawater broth" }
    ]);
    let source = fixture()
        .with(Collection::Media, media.to_string())
        .with(Collection::MicrobeMedia, r#"{"X": [5, 7, 5]}"#);
    let mut store = DataStore::new(source);
    store.load().await.unwrap();

    let ids: Vec<_> = store
        .catalog()
        .media_for_strain("X")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, ["5", "7"]);
}

#[tokio::test]
async fn null_and_blank_references_do_not_fail_the_load() {
    let source = fixture()
        .with(Collection::MicrobeMedia, r#"{"X": [5, null, ""]}"#)
        .with(
            Collection::MediumStrains,
            r#"{"5": [{"id": 1, "species": "s", "bacdive_id": ""}]}"#,
        );
    let mut store = DataStore::new(source);
    store.load().await.unwrap();
    let catalog = store.catalog();

    let ids: Vec<_> = catalog
        .media_for_strain("X")
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(ids, ["5"]);
    assert_eq!(catalog.strains_for_medium(5).unwrap()[0].bacdive_id, None);
}

/// Counts fetches in flight and yields once inside each one.
#[derive(Default)]
struct TrackedSource {
    inner: MemorySource,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    finished: AtomicUsize,
}

impl DataSource for TrackedSource {
    fn fetch(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send {
        async move {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::task::yield_now().await;
            let result = self.inner.fetch(collection).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.finished.fetch_add(1, Ordering::SeqCst);
            result
        }
    }

    fn origin(&self) -> String {
        "tracked".to_string()
    }
}

#[tokio::test]
async fn collections_are_fetched_concurrently() {
    let mut store = DataStore::new(TrackedSource {
        inner: fixture(),
        ..TrackedSource::default()
    });
    store.load().await.unwrap();

    let source = store.source();
    assert_eq!(source.peak.load(Ordering::SeqCst), Collection::ALL.len());
    assert_eq!(source.finished.load(Ordering::SeqCst), Collection::ALL.len());
}

#[tokio::test]
async fn failed_fetch_does_not_cancel_the_others() {
    let mut inner = fixture();
    inner.remove(Collection::Ingredients);
    let mut store = DataStore::new(TrackedSource {
        inner,
        ..TrackedSource::default()
    });

    let err = store.load().await.unwrap_err();
    let StoreError::Load { failures, .. } = &err else {
        panic!("expected aggregate load error, got {err:?}");
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].collection(), Some(Collection::Ingredients));

    let source = store.source();
    assert_eq!(source.peak.load(Ordering::SeqCst), Collection::ALL.len());
    assert_eq!(source.finished.load(Ordering::SeqCst), Collection::ALL.len());
    assert!(!store.is_loaded());
}

#[tokio::test]
async fn equivalent_media_and_recipes() {
    let store = loaded().await;
    let catalog = store.catalog();

    let equivalent: Vec<_> = catalog
        .equivalent_media(2)
        .iter()
        .map(|m| m.id.as_str())
        .collect();
    assert_eq!(equivalent, ["1", "2"]);
    assert_eq!(catalog.canonical_id(2).map(EntityId::as_str), Some("1"));

    let recipe = catalog.medium_recipe(1).unwrap();
    assert_eq!(recipe.name, "Rich broth A");
    assert_eq!(recipe.lines.len(), 3);
    assert_eq!(recipe.lines[0].ingredient_id, Some(EntityId::from(100)));
    assert_eq!(recipe.lines[1].ingredient_id, Some(EntityId::from(102)));
    assert!(recipe.lines[1].optional);
    let unresolved: Vec<_> = recipe.unresolved().map(|l| l.ingredient.as_str()).collect();
    assert_eq!(unresolved, ["Mystery extract"]);
}

#[tokio::test]
async fn empty_before_first_load() {
    let store = DataStore::new(fixture());
    assert!(!store.is_loaded());
    assert!(store.catalog().media().is_empty());
    assert!(store.catalog().all_strains().is_empty());
    assert!(store.catalog().medium(1).is_none());
}

#[tokio::test]
async fn summary_counts_records() {
    let mut store = DataStore::new(fixture());
    let summary = store.load().await.unwrap();

    assert_eq!(summary.origin, "memory");
    assert_eq!(summary.generation, 1);
    assert_eq!(summary.media, 4);
    assert_eq!(summary.canonical_media, 3);
    assert_eq!(summary.ingredients, 3);
    assert_eq!(summary.strain_names, 2);
    assert!(store.is_loaded());
}

#[tokio::test]
async fn failed_load_reports_every_collection_and_keeps_snapshot() {
    let mut store = loaded().await;

    store.source_mut().remove(Collection::Solutions);
    store
        .source_mut()
        .insert(Collection::Media, "[{\"name\": \"no id\"}]");

    let err = store.load().await.unwrap_err();
    let StoreError::Load { failures, total } = &err else {
        panic!("expected aggregate load error, got {err:?}");
    };
    assert_eq!(*total, 8);
    let mut failed: Vec<_> = failures.iter().filter_map(StoreError::collection).collect();
    failed.sort();
    assert_eq!(failed, [Collection::Media, Collection::Solutions]);
    assert!(err.to_string().contains("2 of 8 collections failed"));

    // Previous snapshot is still served.
    assert_eq!(store.generation(), 1);
    assert_eq!(store.catalog().media().len(), 4);
    assert!(store.catalog().solution(10).is_some());
}

#[tokio::test]
async fn reload_replaces_previous_state() {
    let mut store = loaded().await;
    store.source_mut().insert(
        Collection::Media,
        json!([{ "id": 42, "name": "Only", "description": "rich broth" }]).to_string(),
    );

    let summary = store.load().await.unwrap();
    assert_eq!(summary.generation, 2);

    let media = store.catalog().media();
    assert_eq!(media.len(), 1);
    assert_eq!(media[0].canonical_id.as_str(), "42");
    assert!(store.catalog().medium(1).is_none());
}

#[tokio::test]
async fn loading_twice_yields_identical_canonical_ids() {
    let mut store = loaded().await;
    let first: Vec<_> = store
        .catalog()
        .media()
        .iter()
        .map(|m| (m.id.clone(), m.canonical_id.clone()))
        .collect();

    store.load().await.unwrap();
    let second: Vec<_> = store
        .catalog()
        .media()
        .iter()
        .map(|m| (m.id.clone(), m.canonical_id.clone()))
        .collect();
    assert_eq!(first, second);
}
