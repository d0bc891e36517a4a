//! Error types for loading the catalog.

use std::path::PathBuf;

use thiserror::Error;

use crate::Collection;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("data directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read {collection} from {path}: {source}")]
    Io {
        collection: Collection,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manifest {path}: {source}")]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("unknown collection in manifest: {name}")]
    UnknownCollection { name: String },

    #[error("duplicate collection in manifest: {collection}")]
    DuplicateCollection { collection: Collection },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("invalid sha256 for {collection}: {message}")]
    InvalidSha256 {
        collection: Collection,
        message: String,
    },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("{collection} is not available from {origin}")]
    Missing {
        collection: Collection,
        origin: String,
    },

    #[error("failed to parse {collection}: {source}")]
    Parse {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },

    #[error("background read of {collection} did not complete: {message}")]
    Task {
        collection: Collection,
        message: String,
    },

    /// Every failure of one load attempt, reported together.
    #[error(
        "failed to load data ({} of {total} collections failed): {}",
        .failures.len(),
        describe(.failures)
    )]
    Load {
        failures: Vec<StoreError>,
        total: usize,
    },
}

impl StoreError {
    /// Collection a per-collection failure refers to.
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Self::Io { collection, .. }
            | Self::InvalidSha256 { collection, .. }
            | Self::Missing { collection, .. }
            | Self::Parse { collection, .. }
            | Self::Task { collection, .. }
            | Self::DuplicateCollection { collection } => Some(*collection),
            _ => None,
        }
    }
}

fn describe(failures: &[StoreError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, StoreError>;
