//! Validated prompt configuration

use crate::schema::{RawConfig, RawPrompt, RawStoreConfig};
use gutwise_util::{default_data_dir, PromptId, StoreKey};
use std::path::PathBuf;
use std::time::Duration;

/// ID of the daily check-in prompt
pub const CHECKIN_PROMPT_ID: &str = "checkin";

/// ID of the eating-out notification permission prompt
pub const NOTIFY_PROMPT_ID: &str = "notify_prompt";

const HOUR: Duration = Duration::from_secs(3600);

/// Validated configuration ready for use by the core
#[derive(Debug, Clone)]
pub struct PromptsConfig {
    pub store: StoreSettings,
    pub prompts: Vec<PromptConfig>,
}

impl PromptsConfig {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let prompts = if raw.prompts.is_empty() {
            PromptConfig::builtin()
        } else {
            raw.prompts.into_iter().map(PromptConfig::from_raw).collect()
        };

        Self {
            store: StoreSettings::from_raw(raw.store),
            prompts,
        }
    }

    /// Built-in prompts with default store settings, for running without a
    /// config file
    pub fn builtin() -> Self {
        Self {
            store: StoreSettings::from_raw(RawStoreConfig::default()),
            prompts: PromptConfig::builtin(),
        }
    }

    /// Get prompt by ID
    pub fn get(&self, id: &PromptId) -> Option<&PromptConfig> {
        self.prompts.iter().find(|p| &p.id == id)
    }
}

/// Where prompt state is persisted
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub data_dir: PathBuf,
}

impl StoreSettings {
    fn from_raw(raw: RawStoreConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
        }
    }
}

/// Cooldown settings for one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    pub id: PromptId,
    pub label: String,
    pub min_interval: Duration,
    pub default_dismiss: Duration,
    /// Explicit "not now" dismissal. Prompts without one only use
    /// `default_dismiss`.
    pub not_now: Option<Duration>,
    pub dismissed_until_key: StoreKey,
    pub last_shown_key: StoreKey,
}

impl PromptConfig {
    /// A prompt with conventional storage keys and no "not now" duration
    pub fn new(
        id: impl Into<PromptId>,
        label: impl Into<String>,
        min_interval: Duration,
        default_dismiss: Duration,
    ) -> Self {
        let id = id.into();
        Self {
            dismissed_until_key: StoreKey::for_prompt(&id, "dismissed_until"),
            last_shown_key: StoreKey::for_prompt(&id, "last_shown"),
            id,
            label: label.into(),
            min_interval,
            default_dismiss,
            not_now: None,
        }
    }

    pub fn with_not_now(mut self, not_now: Duration) -> Self {
        self.not_now = Some(not_now);
        self
    }

    /// Daily check-in: at most every 2h, dismissed for 4h
    pub fn checkin() -> Self {
        Self::new(CHECKIN_PROMPT_ID, "Daily check-in", 2 * HOUR, 4 * HOUR)
    }

    /// Eating-out notification prompt: at most every 2h, dismissed for 4h by
    /// default or 2h on "not now"
    pub fn notify_prompt() -> Self {
        Self::new(
            NOTIFY_PROMPT_ID,
            "Eating-out notifications",
            2 * HOUR,
            4 * HOUR,
        )
        .with_not_now(2 * HOUR)
    }

    pub fn builtin() -> Vec<Self> {
        vec![Self::checkin(), Self::notify_prompt()]
    }

    fn from_raw(raw: RawPrompt) -> Self {
        let id = PromptId::new(raw.id);
        Self {
            label: raw.label.unwrap_or_else(|| id.to_string()),
            min_interval: Duration::from_secs(raw.min_interval_seconds),
            default_dismiss: Duration::from_secs(raw.default_dismiss_seconds),
            not_now: raw.not_now_seconds.map(Duration::from_secs),
            dismissed_until_key: raw
                .dismissed_until_key
                .map(StoreKey::new)
                .unwrap_or_else(|| StoreKey::for_prompt(&id, "dismissed_until")),
            last_shown_key: raw
                .last_shown_key
                .map(StoreKey::new)
                .unwrap_or_else(|| StoreKey::for_prompt(&id, "last_shown")),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_durations() {
        let checkin = PromptConfig::checkin();
        assert_eq!(checkin.min_interval, Duration::from_secs(2 * 3600));
        assert_eq!(checkin.default_dismiss, Duration::from_secs(4 * 3600));
        assert_eq!(checkin.not_now, None);

        let notify = PromptConfig::notify_prompt();
        assert_eq!(notify.min_interval, Duration::from_secs(2 * 3600));
        assert_eq!(notify.default_dismiss, Duration::from_secs(4 * 3600));
        assert_eq!(notify.not_now, Some(Duration::from_secs(2 * 3600)));
    }

    #[test]
    fn builtin_prompts_own_distinct_keys() {
        let checkin = PromptConfig::checkin();
        let notify = PromptConfig::notify_prompt();
        assert_ne!(checkin.last_shown_key, notify.last_shown_key);
        assert_ne!(checkin.dismissed_until_key, notify.dismissed_until_key);
        assert_eq!(checkin.last_shown_key.as_str(), "gutwise.checkin.last_shown");
    }

    #[test]
    fn raw_key_overrides_are_kept() {
        let raw = RawPrompt {
            id: "checkin".into(),
            label: None,
            min_interval_seconds: 60,
            default_dismiss_seconds: 120,
            not_now_seconds: Some(30),
            dismissed_until_key: Some("checkinDismissedUntil".into()),
            last_shown_key: None,
        };

        let prompt = PromptConfig::from_raw(raw);
        assert_eq!(prompt.label, "checkin");
        assert_eq!(prompt.dismissed_until_key.as_str(), "checkinDismissedUntil");
        assert_eq!(prompt.last_shown_key.as_str(), "gutwise.checkin.last_shown");
        assert_eq!(prompt.not_now, Some(Duration::from_secs(30)));
    }
}
