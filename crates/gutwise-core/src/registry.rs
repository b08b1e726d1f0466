//! One cooldown policy per configured prompt

use gutwise_config::PromptsConfig;
use gutwise_store::KeyValueStore;
use gutwise_util::{Clock, GutwiseError, PromptId, Result};
use std::sync::Arc;
use tracing::info;

use crate::{CooldownConfig, CooldownPolicy};

/// Policies for every configured prompt, sharing one clock and store
pub struct PromptRegistry {
    policies: Vec<CooldownPolicy>,
}

impl PromptRegistry {
    pub fn new(
        config: &PromptsConfig,
        clock: Arc<dyn Clock>,
        store: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        let policies: Vec<_> = config
            .prompts
            .iter()
            .map(|p| CooldownPolicy::new(CooldownConfig::from(p), clock.clone(), store.clone()))
            .collect();

        info!(
            prompt_count = policies.len(),
            has_store = store.is_some(),
            "Prompt registry initialized"
        );

        Self { policies }
    }

    pub fn get(&self, id: &PromptId) -> Result<&CooldownPolicy> {
        self.policies
            .iter()
            .find(|p| p.prompt() == id)
            .ok_or_else(|| GutwiseError::PromptNotFound(id.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CooldownPolicy> {
        self.policies.iter()
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
