//! Data store and query layer for the MediaDive catalog.
//!
//! This crate provides:
//!
//! - **Loading** of every source collection through a [`DataSource`], all
//!   fetched concurrently and committed only when every one of them parses
//! - **Derived indices** rebuilt on each load: medium canonicalization by
//!   description and a case-insensitive ingredient name index
//! - **Queries** through [`Catalog`], a borrowed, read-only view whose
//!   accessors return `None` or an empty list instead of failing
//!
//! # Data Directory Structure
//!
//! ```text
//! data/
//! ├── manifest.toml               # optional: file overrides and sha256 pins
//! ├── mediaList.json
//! ├── medium-Composition.json
//! ├── solutions.json
//! ├── solutions-Composition.json
//! ├── ingredients.json
//! ├── ingredients_detail.json
//! ├── mediumStrain.json
//! └── microbeToMedia.json
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mediadive_store::{DataStore, DirectorySource};
//!
//! let mut store = DataStore::new(DirectorySource::open("data")?);
//! store.load().await?;
//!
//! let catalog = store.catalog();
//! for medium in catalog.media() {
//!     println!("{} -> {}", medium.id, medium.canonical_id);
//! }
//! ```

#![deny(unsafe_code)]

pub mod catalog;
pub mod collection;
pub mod error;
pub mod index;
pub mod manifest;
pub mod paths;
mod snapshot;
pub mod source;
pub mod store;

pub use catalog::Catalog;
pub use collection::Collection;
pub use error::{Result, StoreError};
pub use index::CanonMap;
pub use manifest::SourceManifest;
pub use paths::{DATA_DIR_ENV_VAR, data_root};
pub use source::{DataSource, DirectorySource, MemorySource};
pub use store::{DataStore, LoadSummary};
