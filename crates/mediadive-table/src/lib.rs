//! Filterable table model used by every list view.
//!
//! A [`Table`] holds columns, rows and one visibility flag per row. It knows
//! nothing about how it is drawn: a presentation layer reads
//! [`Table::visible_rows`] and renders them however it likes.
//!
//! Filtering is case-insensitive substring matching, AND-ed across columns
//! ([`apply_filter`]). Search inputs are debounced ([`Debouncer`]); the host
//! passes the current time into [`Table::poll_filters`] to release settled
//! edits.

#![deny(unsafe_code)]

mod column;
mod debounce;
mod filter;
mod row;
mod table;

pub use column::Column;
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use filter::{FilterState, apply_filter, row_matches};
pub use row::{Cell, Row};
pub use table::{
    FilterCallback, FilterConfig, FilterInput, ListView, Table, create_table, create_table_with,
};
