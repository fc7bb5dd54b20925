//! Path utilities

use std::path::PathBuf;

/// Data directory (~/.reflect), or `.reflect` in the working directory when
/// no home directory can be found
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".reflect"))
        .unwrap_or_else(|| PathBuf::from(".reflect"))
}

/// Config file location
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}
