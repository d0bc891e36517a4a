//! Data directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "MEDIADIVE_DATA_DIR";

/// Get the data root directory.
///
/// Resolution order:
/// 1. `MEDIADIVE_DATA_DIR` environment variable
/// 2. `data/` relative to the working directory
pub fn data_root() -> PathBuf {
    if let Ok(root) = std::env::var(DATA_DIR_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("data")
}
