//! Optional `manifest.toml` describing a data directory.
//!
//! ```toml
//! [manifest]
//! schema = "mediadive.data-manifest"
//! schema_version = 1
//!
//! [[files]]
//! collection = "media"
//! path = "2024-06/mediaList.json"
//! sha256 = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
//! ```
//!
//! Collections without an entry use their default file name.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Collection, StoreError};

pub const MANIFEST_FILE_NAME: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "mediadive.data-manifest";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceManifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub collection: String,
    pub path: String,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// A validated manifest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the data directory.
    pub path: PathBuf,
    /// Lower-case hex digest, when pinned.
    pub sha256: Option<String>,
}

pub fn load_manifest(path: &Path) -> Result<SourceManifest, StoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StoreError::ManifestIo {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| StoreError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

impl SourceManifest {
    /// Validate the manifest and resolve its entries per collection.
    pub fn resolve(&self) -> Result<BTreeMap<Collection, SourceFile>, StoreError> {
        if self.manifest.schema != MANIFEST_SCHEMA {
            return Err(StoreError::InvalidManifest {
                message: format!("unsupported schema: {}", self.manifest.schema),
            });
        }
        if self.manifest.schema_version != 1 {
            return Err(StoreError::InvalidManifest {
                message: format!(
                    "unsupported schema_version: {}",
                    self.manifest.schema_version
                ),
            });
        }

        let mut files = BTreeMap::new();
        for file in &self.files {
            let collection: Collection = file.collection.parse()?;
            if files.contains_key(&collection) {
                return Err(StoreError::DuplicateCollection { collection });
            }

            let sha256 = match &file.sha256 {
                Some(sha) => Some(validate_sha(sha, collection)?),
                None => None,
            };
            let path = validate_path(&file.path)?;
            files.insert(collection, SourceFile { path, sha256 });
        }
        Ok(files)
    }
}

fn validate_sha(sha: &str, collection: Collection) -> Result<String, StoreError> {
    let sha = sha.trim();
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StoreError::InvalidSha256 {
            collection,
            message: "sha256 must be 64 hex characters".to_string(),
        });
    }
    Ok(sha.to_ascii_lowercase())
}

fn validate_path(path: &str) -> Result<PathBuf, StoreError> {
    if path.contains('\\') {
        return Err(StoreError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StoreError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    let mut normalized = PathBuf::new();
    for c in p.components() {
        match c {
            Component::ParentDir => {
                return Err(StoreError::InvalidPath {
                    path: p.clone(),
                    message: "manifest path must not leave the data directory".to_string(),
                });
            }
            Component::CurDir => {}
            _ => normalized.push(c.as_os_str()),
        }
    }

    if normalized.as_os_str().is_empty() {
        return Err(StoreError::InvalidPath {
            path: p,
            message: "manifest path is empty".to_string(),
        });
    }
    Ok(normalized)
}
