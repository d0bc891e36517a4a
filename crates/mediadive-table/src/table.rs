use std::fmt;
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::debounce::{DEFAULT_DEBOUNCE, Debouncer};
use crate::filter::{FilterState, apply_filter};
use crate::{Column, Row};

/// Called with `(column key, text)` once a search input settles.
pub type FilterCallback = Box<dyn FnMut(&str, &str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Quiet period before an edited search input reports its value.
    pub debounce: Duration,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Search input of one searchable column.
#[derive(Debug, Clone)]
pub struct FilterInput {
    key: String,
    placeholder: String,
    value: String,
    debouncer: Debouncer<String>,
}

impl FilterInput {
    fn new(column: &Column, config: FilterConfig) -> Self {
        Self {
            key: column.key.clone(),
            placeholder: format!("Search {}", column.label),
            value: String::new(),
            debouncer: Debouncer::new(config.debounce),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Text as last typed, settled or not.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

/// Columns, rows and per-row visibility.
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
    visible: Vec<bool>,
    inputs: Vec<FilterInput>,
    on_filter_change: Option<FilterCallback>,
}

/// Build a table with every row visible.
///
/// When `on_filter_change` is given, each searchable column gets its own
/// [`FilterInput`], debounced by [`DEFAULT_DEBOUNCE`].
pub fn create_table(
    columns: Vec<Column>,
    rows: Vec<Row>,
    on_filter_change: Option<FilterCallback>,
) -> Table {
    create_table_with(columns, rows, on_filter_change, FilterConfig::default())
}

pub fn create_table_with(
    columns: Vec<Column>,
    rows: Vec<Row>,
    on_filter_change: Option<FilterCallback>,
    config: FilterConfig,
) -> Table {
    let inputs = if on_filter_change.is_some() {
        columns
            .iter()
            .filter(|column| column.searchable)
            .map(|column| FilterInput::new(column, config))
            .collect()
    } else {
        Vec::new()
    };

    Table {
        visible: vec![true; rows.len()],
        columns,
        rows,
        inputs,
        on_filter_change,
    }
}

impl Table {
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows
            .iter()
            .zip(&self.visible)
            .filter_map(|(row, &visible)| visible.then_some(row))
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|&&visible| visible).count()
    }

    pub fn show_all(&mut self) {
        self.visible.fill(true);
    }

    pub(crate) fn set_visibility(&mut self, visible: Vec<bool>) {
        debug_assert_eq!(visible.len(), self.rows.len());
        self.visible = visible;
    }

    pub fn inputs(&self) -> &[FilterInput] {
        &self.inputs
    }

    pub fn input(&self, key: &str) -> Option<&FilterInput> {
        self.inputs.iter().find(|input| input.key == key)
    }

    /// Record an edit of the search input for `key`.
    ///
    /// Returns `false` when the table has no input for that column.
    pub fn edit_filter(&mut self, key: &str, value: impl Into<String>, at: Instant) -> bool {
        let Some(input) = self.inputs.iter_mut().find(|input| input.key == key) else {
            return false;
        };
        let value = value.into();
        input.value.clone_from(&value);
        input.debouncer.push(value, at);
        true
    }

    /// Report every search input whose quiet period has passed.
    ///
    /// Returns how many callbacks were made.
    pub fn poll_filters(&mut self, now: Instant) -> usize {
        let Some(callback) = self.on_filter_change.as_mut() else {
            return 0;
        };
        let mut fired = 0;
        for input in &mut self.inputs {
            if let Some(value) = input.debouncer.poll(now) {
                debug!(column = %input.key, value = %value, "filter settled");
                callback(&input.key, &value);
                fired += 1;
            }
        }
        fired
    }

    /// Earliest instant at which [`poll_filters`](Self::poll_filters) has
    /// something to report.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inputs
            .iter()
            .filter_map(|input| input.debouncer.deadline())
            .min()
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("visible", &self.visible_count())
            .field("inputs", &self.inputs)
            .field("on_filter_change", &self.on_filter_change.is_some())
            .finish()
    }
}

/// A table together with the filter state of one list view.
///
/// Settled search edits update the state and re-apply it to the table.
#[derive(Debug)]
pub struct ListView {
    table: Table,
    filters: FilterState,
    settled: Receiver<(String, String)>,
}

impl ListView {
    pub fn new(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self::with_config(columns, rows, FilterConfig::default())
    }

    pub fn with_config(columns: Vec<Column>, rows: Vec<Row>, config: FilterConfig) -> Self {
        let (sender, settled) = channel();
        let callback: FilterCallback = Box::new(move |key: &str, value: &str| {
            // The receiver lives as long as the table holding this callback.
            let _ = sender.send((key.to_string(), value.to_string()));
        });
        Self {
            table: create_table_with(columns, rows, Some(callback), config),
            filters: FilterState::new(),
            settled,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Forward an edit to the column's search input.
    pub fn edit(&mut self, key: &str, value: impl Into<String>, at: Instant) -> bool {
        self.table.edit_filter(key, value, at)
    }

    /// Apply settled search edits; returns whether visibility was recomputed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.table.poll_filters(now) == 0 {
            return false;
        }
        let mut changed = false;
        while let Ok((key, value)) = self.settled.try_recv() {
            changed |= self.filters.set(key, value);
        }
        if changed {
            self.refresh();
        }
        changed
    }

    /// Set a filter immediately, bypassing the search inputs.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.filters.set(key, value) {
            self.refresh();
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.table.show_all();
    }

    fn refresh(&mut self) {
        let columns = self.table.columns().to_vec();
        apply_filter(&mut self.table, &self.filters, &columns);
    }
}
