use serde::Serialize;

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Key used to look up the cell in each row.
    pub key: String,
    pub label: String,
    /// Whether the column gets a search input.
    pub searchable: bool,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            searchable: false,
        }
    }

    pub fn searchable(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            searchable: true,
            ..Self::new(key, label)
        }
    }
}

pub(crate) fn column_index(columns: &[Column], key: &str) -> Option<usize> {
    columns.iter().position(|c| c.key == key)
}
