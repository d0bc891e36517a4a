use indexmap::IndexMap;
use serde::Serialize;

/// Rendered content of one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Display text; filters match against it.
    pub text: String,
    /// Navigation target, opaque to the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Cell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
        }
    }

    pub fn linked(text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(target.into()),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Cells keyed by column key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Row {
    cells: IndexMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, cell: impl Into<Cell>) -> Self {
        self.insert(key, cell);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, cell: impl Into<Cell>) {
        self.cells.insert(key.into(), cell.into());
    }

    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }

    /// Cell text, or `""` when the row has no cell for `key`.
    pub fn text(&self, key: &str) -> &str {
        self.cells.get(key).map_or("", |cell| cell.text.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.cells.iter().map(|(key, cell)| (key.as_str(), cell))
    }
}

impl<K, C> FromIterator<(K, C)> for Row
where
    K: Into<String>,
    C: Into<Cell>,
{
    fn from_iter<I: IntoIterator<Item = (K, C)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (key, cell) in iter {
            row.insert(key, cell);
        }
        row
    }
}
