//! Configuration parsing and validation for GutWise prompt cooldowns
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - Prompt definitions (minimum interval, dismissal durations, storage keys)
//! - Validation with clear error messages
//!
//! A config without any `[[prompts]]` gets the built-in check-in and
//! eating-out notification prompts.

mod prompts;
mod schema;
mod validation;

pub use prompts::*;
pub use schema::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<PromptsConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<PromptsConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Ok(PromptsConfig::from_raw(raw))
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use gutwise_util::{PromptId, StoreKey};
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [[prompts]]
            id = "weigh_in"
            label = "Weekly weigh-in"
            min_interval_seconds = 86400
            default_dismiss_seconds = 3600
        "#;

        let prompts = parse_config(config).unwrap();
        assert_eq!(prompts.prompts.len(), 1);

        let p = &prompts.prompts[0];
        assert_eq!(p.id.as_str(), "weigh_in");
        assert_eq!(p.min_interval, Duration::from_secs(86400));
        assert_eq!(p.default_dismiss, Duration::from_secs(3600));
        assert_eq!(p.not_now, None);
        assert_eq!(p.dismissed_until_key, StoreKey::new("gutwise.weigh_in.dismissed_until"));
        assert_eq!(p.last_shown_key, StoreKey::new("gutwise.weigh_in.last_shown"));
    }

    #[test]
    fn empty_config_uses_builtin_prompts() {
        let prompts = parse_config("config_version = 1").unwrap();
        assert!(prompts.get(&PromptId::new(CHECKIN_PROMPT_ID)).is_some());
        assert!(prompts.get(&PromptId::new(NOTIFY_PROMPT_ID)).is_some());
    }

    #[test]
    fn reject_wrong_version() {
        let result = parse_config("config_version = 99");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_prompts() {
        let config = r#"
            config_version = 1

            [[prompts]]
            id = ""
            min_interval_seconds = 60
            default_dismiss_seconds = 60
        "#;

        assert!(matches!(
            parse_config(config),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            config_version = 1

            [store]
            data_dir = "/tmp/gutwise-test"

            [[prompts]]
            id = "checkin"
            min_interval_seconds = 7200
            default_dismiss_seconds = 14400
            "#
        )
        .unwrap();

        let prompts = load_config(file.path()).unwrap();
        assert_eq!(prompts.store.data_dir, std::path::PathBuf::from("/tmp/gutwise-test"));
        assert_eq!(prompts.prompts.len(), 1);
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = load_config("/definitely/not/here/prompts.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
