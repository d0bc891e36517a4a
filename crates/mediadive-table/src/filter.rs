use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use crate::column::column_index;
use crate::{Column, Row, Table};

/// Current search text per column key.
///
/// Empty values are kept but inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    values: IndexMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for `key`; returns whether it changed.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.values.insert(key.into(), value.clone()) {
            Some(previous) => previous != value,
            None => true,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Non-empty filters as `(key, lower-cased text)`.
    pub fn active(&self) -> impl Iterator<Item = (&str, String)> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| (key.as_str(), value.to_lowercase()))
    }

    pub fn is_active(&self) -> bool {
        self.values.values().any(|value| !value.is_empty())
    }
}

impl<K, V> FromIterator<(K, V)> for FilterState
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}

/// Whether `row` satisfies every active filter that names one of `columns`.
///
/// Filters on unknown keys are ignored. A row without a cell for a filtered
/// column is matched against empty text.
pub fn row_matches(row: &Row, filters: &FilterState, columns: &[Column]) -> bool {
    filters.active().all(|(key, needle)| {
        column_index(columns, key).is_none() || row.text(key).to_lowercase().contains(&needle)
    })
}

/// Recompute the visibility of every row of `table`.
///
/// Rows are only hidden, never removed.
pub fn apply_filter(table: &mut Table, filters: &FilterState, columns: &[Column]) {
    let visible: Vec<bool> = table
        .rows()
        .iter()
        .map(|row| row_matches(row, filters, columns))
        .collect();
    table.set_visibility(visible);
    trace!(
        rows = table.len(),
        visible = table.visible_count(),
        "applied filters"
    );
}
