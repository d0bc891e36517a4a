//! Where collection documents come from.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::manifest::{MANIFEST_FILE_NAME, SourceFile, load_manifest};
use crate::{Collection, StoreError};

/// Supplies the raw JSON document of each collection.
///
/// Fetches for different collections are issued concurrently by
/// [`DataStore::load`](crate::DataStore::load).
pub trait DataSource {
    fn fetch(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send;

    /// Human readable description used in logs and errors.
    fn origin(&self) -> String;
}

fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Reads collections from a data directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    files: BTreeMap<Collection, SourceFile>,
}

impl DirectorySource {
    /// Open a data directory, applying its `manifest.toml` when present.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(StoreError::DirectoryNotFound { path: root });
        }

        let manifest_path = root.join(MANIFEST_FILE_NAME);
        let files = if manifest_path.is_file() {
            let files = load_manifest(&manifest_path)?.resolve()?;
            debug!(
                path = %manifest_path.display(),
                overrides = files.len(),
                "applied data manifest"
            );
            files
        } else {
            debug!(root = %root.display(), "no data manifest, using default file names");
            BTreeMap::new()
        };

        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the document backing `collection`.
    pub fn path_for(&self, collection: Collection) -> PathBuf {
        match self.files.get(&collection) {
            Some(file) => self.root.join(&file.path),
            None => self.root.join(collection.default_file_name()),
        }
    }
}

impl DataSource for DirectorySource {
    fn fetch(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send {
        let path = self.path_for(collection);
        let expected = self
            .files
            .get(&collection)
            .and_then(|file| file.sha256.clone());

        async move {
            let read_path = path.clone();
            let bytes = tokio::task::spawn_blocking(move || std::fs::read(read_path))
                .await
                .map_err(|e| StoreError::Task {
                    collection,
                    message: e.to_string(),
                })?
                .map_err(|source| StoreError::Io {
                    collection,
                    path: path.clone(),
                    source,
                })?;

            if let Some(expected) = expected {
                let actual = sha256_hex(&bytes);
                if actual != expected {
                    warn!(%collection, path = %path.display(), "checksum mismatch");
                    return Err(StoreError::Sha256Mismatch {
                        path,
                        expected,
                        actual,
                    });
                }
            }

            debug!(%collection, path = %path.display(), bytes = bytes.len(), "read collection");
            Ok(bytes)
        }
    }

    fn origin(&self) -> String {
        self.root.display().to_string()
    }
}

/// In-memory documents keyed by collection.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<Collection, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, collection: Collection, document: impl Into<Vec<u8>>) -> Self {
        self.insert(collection, document);
        self
    }

    pub fn insert(&mut self, collection: Collection, document: impl Into<Vec<u8>>) {
        self.documents.insert(collection, document.into());
    }

    pub fn remove(&mut self, collection: Collection) -> Option<Vec<u8>> {
        self.documents.remove(&collection)
    }
}

impl DataSource for MemorySource {
    fn fetch(
        &self,
        collection: Collection,
    ) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send {
        let result = self
            .documents
            .get(&collection)
            .cloned()
            .ok_or_else(|| StoreError::Missing {
                collection,
                origin: self.origin(),
            });
        std::future::ready(result)
    }

    fn origin(&self) -> String {
        "memory".to_string()
    }
}
