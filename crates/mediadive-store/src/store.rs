//! The data store: owns the source and the last committed snapshot.

use std::time::{Duration, Instant};

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::catalog::Catalog;
use crate::index::canonical_group_count;
use crate::snapshot::{Snapshot, SnapshotBuilder};
use crate::{Collection, DataSource, StoreError};

/// Record counts of a committed load.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub origin: String,
    pub generation: u64,
    pub media: usize,
    pub canonical_media: usize,
    pub compositions: usize,
    pub solutions: usize,
    pub solution_compositions: usize,
    pub ingredients: usize,
    pub ingredient_details: usize,
    pub media_with_strains: usize,
    pub strain_names: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl LoadSummary {
    fn new(origin: String, generation: u64, snapshot: &Snapshot, elapsed: Duration) -> Self {
        Self {
            origin,
            generation,
            media: snapshot.media.len(),
            canonical_media: canonical_group_count(&snapshot.canon_map),
            compositions: snapshot.compositions.len(),
            solutions: snapshot.solutions.len(),
            solution_compositions: snapshot.solution_compositions.len(),
            ingredients: snapshot.ingredients.len(),
            ingredient_details: snapshot.ingredient_details.len(),
            media_with_strains: snapshot.medium_strains.len(),
            strain_names: snapshot.microbe_media.len(),
            elapsed,
        }
    }
}

/// Loads every collection from a [`DataSource`] and serves queries over the
/// result.
///
/// Before the first successful [`load`](Self::load) the catalog is empty and
/// every lookup reports absence.
#[derive(Debug)]
pub struct DataStore<S> {
    source: S,
    snapshot: Snapshot,
    generation: u64,
}

impl<S: DataSource> DataStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            snapshot: Snapshot::default(),
            generation: 0,
        }
    }

    /// Fetch all collections concurrently, parse them and rebuild the indices.
    ///
    /// Either every collection is committed or none is: on failure the
    /// previous snapshot stays in place and the error lists each failed
    /// collection. Loading again replaces the previous state entirely.
    pub async fn load(&mut self) -> Result<LoadSummary, StoreError> {
        let origin = self.source.origin();
        let span = info_span!("load", origin = %origin);
        let started = Instant::now();

        let snapshot = fetch_snapshot(&self.source).instrument(span.clone()).await?;

        self.generation += 1;
        let summary = LoadSummary::new(origin, self.generation, &snapshot, started.elapsed());
        self.snapshot = snapshot;

        span.in_scope(|| {
            info!(
                generation = summary.generation,
                media = summary.media,
                canonical_media = summary.canonical_media,
                solutions = summary.solutions,
                ingredients = summary.ingredients,
                strain_names = summary.strain_names,
                elapsed_ms = summary.elapsed.as_millis() as u64,
                "catalog loaded"
            );
        });
        Ok(summary)
    }

    /// Read-only view over the last committed snapshot.
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.snapshot)
    }

    pub fn is_loaded(&self) -> bool {
        self.generation > 0
    }

    /// Number of committed loads.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

async fn fetch_snapshot<S: DataSource>(source: &S) -> Result<Snapshot, StoreError> {
    let fetches = Collection::ALL.map(|collection| {
        let fetch = source.fetch(collection);
        async move { (collection, fetch.await) }
    });
    let documents = join_all(fetches).await;

    let mut builder = SnapshotBuilder::default();
    let mut failures = Vec::new();
    for (collection, document) in documents {
        match document.and_then(|bytes| builder.parse(collection, &bytes)) {
            Ok(records) => debug!(%collection, records, "parsed collection"),
            Err(error) => {
                warn!(%collection, %error, "collection failed");
                failures.push(error);
            }
        }
    }

    if !failures.is_empty() {
        return Err(StoreError::Load {
            failures,
            total: Collection::ALL.len(),
        });
    }
    Ok(builder.build())
}
