//! Default paths for GutWise prompt tooling
//!
//! Paths are user-writable by default:
//! - Config: `$XDG_CONFIG_HOME/gutwise/prompts.toml` or `~/.config/gutwise/prompts.toml`
//! - Data: `$XDG_DATA_HOME/gutwise` or `~/.local/share/gutwise`

use std::path::{Path, PathBuf};

/// Environment variable for overriding the config file path
pub const GUTWISE_CONFIG_ENV: &str = "GUTWISE_CONFIG";

/// Environment variable for overriding the data directory
pub const GUTWISE_DATA_DIR_ENV: &str = "GUTWISE_DATA_DIR";

/// Config filename within the config directory
const CONFIG_FILENAME: &str = "prompts.toml";

/// Database filename within the data directory
const STORE_FILENAME: &str = "gutwise.db";

/// Application subdirectory name
const APP_DIR: &str = "gutwise";

/// Get the default config file path.
///
/// Order of precedence:
/// 1. `$GUTWISE_CONFIG` environment variable (if set)
/// 2. `$XDG_CONFIG_HOME/gutwise/prompts.toml` (if XDG_CONFIG_HOME is set)
/// 3. `~/.config/gutwise/prompts.toml` (fallback)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(GUTWISE_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    config_path_without_env()
}

/// Get the config path without checking the GUTWISE_CONFIG env var.
pub fn config_path_without_env() -> PathBuf {
    if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(config_home).join(APP_DIR).join(CONFIG_FILENAME);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILENAME);
    }

    PathBuf::from("/tmp").join(APP_DIR).join(CONFIG_FILENAME)
}

/// Get the default data directory.
///
/// Order of precedence:
/// 1. `$GUTWISE_DATA_DIR` environment variable (if set)
/// 2. `$XDG_DATA_HOME/gutwise` (if XDG_DATA_HOME is set)
/// 3. `~/.local/share/gutwise` (fallback)
pub fn default_data_dir() -> PathBuf {
    if let Ok(path) = std::env::var(GUTWISE_DATA_DIR_ENV) {
        return PathBuf::from(path);
    }

    data_dir_without_env()
}

/// Get the data directory without checking the GUTWISE_DATA_DIR env var.
/// Used for default values in configs where the env var is checked separately.
pub fn data_dir_without_env() -> PathBuf {
    if let Ok(data_home) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(data_home).join(APP_DIR);
    }

    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(APP_DIR);
    }

    // Last resort
    PathBuf::from("/tmp").join(APP_DIR).join("data")
}

/// Path of the prompt state database inside a data directory
pub fn store_path(data_dir: impl AsRef<Path>) -> PathBuf {
    data_dir.as_ref().join(STORE_FILENAME)
}
