//! Configuration validation

use crate::schema::{RawConfig, RawPrompt};
use gutwise_util::{PromptId, StoreKey};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Prompt '{prompt_id}': {message}")]
    PromptError { prompt_id: String, message: String },

    #[error("Duplicate prompt ID: {0}")]
    DuplicatePromptId(String),

    #[error("Store key '{key}' is used by both '{first}' and '{second}'")]
    SharedStoreKey {
        key: String,
        first: String,
        second: String,
    },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen_ids = HashSet::new();
    for prompt in &config.prompts {
        if !seen_ids.insert(&prompt.id) {
            errors.push(ValidationError::DuplicatePromptId(prompt.id.clone()));
        }
    }

    for prompt in &config.prompts {
        errors.extend(validate_prompt(prompt));
    }

    // Each prompt owns its keys exclusively
    let mut key_owners: HashMap<String, &str> = HashMap::new();
    for prompt in &config.prompts {
        for key in effective_keys(prompt) {
            match key_owners.get(key.as_str()) {
                Some(owner) => errors.push(ValidationError::SharedStoreKey {
                    key: key.to_string(),
                    first: owner.to_string(),
                    second: prompt.id.clone(),
                }),
                None => {
                    key_owners.insert(key.to_string(), &prompt.id);
                }
            }
        }
    }

    errors
}

fn validate_prompt(prompt: &RawPrompt) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut error = |message: &str| {
        errors.push(ValidationError::PromptError {
            prompt_id: prompt.id.clone(),
            message: message.into(),
        })
    };

    if prompt.id.is_empty() {
        error("id cannot be empty");
    } else if prompt.id.chars().any(char::is_whitespace) {
        error("id cannot contain whitespace");
    }

    if prompt
        .dismissed_until_key
        .as_deref()
        .is_some_and(str::is_empty)
    {
        error("dismissed_until_key cannot be empty");
    }

    if prompt.last_shown_key.as_deref().is_some_and(str::is_empty) {
        error("last_shown_key cannot be empty");
    }

    errors
}

/// Storage keys a prompt will use once defaults are filled in
fn effective_keys(prompt: &RawPrompt) -> [StoreKey; 2] {
    let id = PromptId::new(prompt.id.as_str());
    [
        prompt
            .dismissed_until_key
            .as_deref()
            .map(StoreKey::from)
            .unwrap_or_else(|| StoreKey::for_prompt(&id, "dismissed_until")),
        prompt
            .last_shown_key
            .as_deref()
            .map(StoreKey::from)
            .unwrap_or_else(|| StoreKey::for_prompt(&id, "last_shown")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_prompt(id: &str) -> RawPrompt {
        RawPrompt {
            id: id.into(),
            label: None,
            min_interval_seconds: 7200,
            default_dismiss_seconds: 14400,
            not_now_seconds: None,
            dismissed_until_key: None,
            last_shown_key: None,
        }
    }

    fn raw_config(prompts: Vec<RawPrompt>) -> RawConfig {
        RawConfig {
            config_version: 1,
            store: Default::default(),
            prompts,
        }
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let config = raw_config(vec![raw_prompt("checkin"), raw_prompt("notify_prompt")]);
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_duplicate_id_detection() {
        let config = raw_config(vec![raw_prompt("checkin"), raw_prompt("checkin")]);

        let errors = validate_config(&config);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicatePromptId(_))));
    }

    #[test]
    fn test_bad_ids() {
        let config = raw_config(vec![raw_prompt(""), raw_prompt("check in")]);

        let errors = validate_config(&config);
        assert_eq!(
            errors
                .iter()
                .filter(|e| matches!(e, ValidationError::PromptError { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_shared_key_detection() {
        let mut a = raw_prompt("checkin");
        a.last_shown_key = Some("lastShown".into());
        let mut b = raw_prompt("notify_prompt");
        b.last_shown_key = Some("lastShown".into());

        let errors = validate_config(&raw_config(vec![a, b]));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::SharedStoreKey { key, .. } if key == "lastShown"
        )));
    }

    #[test]
    fn test_both_gates_on_one_key_detected() {
        let mut a = raw_prompt("checkin");
        a.last_shown_key = Some("checkin".into());
        a.dismissed_until_key = Some("checkin".into());

        let errors = validate_config(&raw_config(vec![a]));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::SharedStoreKey { .. })));
    }

    #[test]
    fn test_empty_key_override() {
        let mut a = raw_prompt("checkin");
        a.dismissed_until_key = Some(String::new());

        let errors = validate_config(&raw_config(vec![a]));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::PromptError { message, .. } if message.contains("dismissed_until_key")
        )));
    }
}
