//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Store settings
    #[serde(default)]
    pub store: RawStoreConfig,

    /// Configured prompts. Empty means the built-in set.
    #[serde(default)]
    pub prompts: Vec<RawPrompt>,
}

/// Store settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawStoreConfig {
    /// Directory holding the prompt state database
    pub data_dir: Option<PathBuf>,
}

/// Raw prompt definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPrompt {
    /// Unique stable ID
    pub id: String,

    /// Display label
    pub label: Option<String>,

    /// Minimum spacing between two shows, even without a dismissal
    pub min_interval_seconds: u64,

    /// Dismissal length when none is given
    pub default_dismiss_seconds: u64,

    /// Dismissal length for an explicit "not now"
    pub not_now_seconds: Option<u64>,

    /// Storage key overrides (default: `gutwise.<id>.dismissed_until` / `gutwise.<id>.last_shown`)
    pub dismissed_until_key: Option<String>,
    pub last_shown_key: Option<String>,
}
