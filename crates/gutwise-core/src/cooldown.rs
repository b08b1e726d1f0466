//! Cooldown policy: may a recurring prompt be shown right now?
//!
//! Two independent gates, both of which must pass:
//! - dismissed-until: suppressed while `now < dismissed_until`
//! - minimum interval: suppressed while `now - last_shown < min_interval`
//!
//! A missing value imposes no restriction from its gate.

use gutwise_config::PromptConfig;
use gutwise_store::KeyValueStore;
use gutwise_util::{duration_to_millis, Clock, PromptId, StoreKey, Timestamp};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Settings fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CooldownConfig {
    /// Used for logging only
    pub prompt: PromptId,
    pub min_interval: Duration,
    pub default_dismiss: Duration,
    pub dismissed_until_key: StoreKey,
    pub last_shown_key: StoreKey,
}

impl From<&PromptConfig> for CooldownConfig {
    fn from(prompt: &PromptConfig) -> Self {
        Self {
            prompt: prompt.id.clone(),
            min_interval: prompt.min_interval,
            default_dismiss: prompt.default_dismiss,
            dismissed_until_key: prompt.dismissed_until_key.clone(),
            last_shown_key: prompt.last_shown_key.clone(),
        }
    }
}

/// Persisted state of one prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DismissalState {
    pub dismissed_until: Option<Timestamp>,
    pub last_shown: Option<Timestamp>,
}

impl DismissalState {
    /// Earliest instant at which both gates pass, or `None` if they already
    /// pass at `now`.
    pub fn eligible_at(&self, now: Timestamp, min_interval: Duration) -> Option<Timestamp> {
        let dismissed = self.dismissed_until.filter(|until| now < *until);

        let spaced = self.last_shown.and_then(|last| {
            if now.millis_since(last) < duration_to_millis(min_interval) {
                Some(last.saturating_add(min_interval))
            } else {
                None
            }
        });

        match (dismissed, spaced) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }
}

/// Snapshot of a prompt's eligibility at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PromptStatus {
    pub now: Timestamp,
    pub can_show: bool,
    pub eligible_at: Option<Timestamp>,
    pub state: DismissalState,
}

/// Decides whether a recurring prompt may be shown and records shows and
/// dismissals.
///
/// Each policy owns its two store keys. Without a store every prompt is
/// eligible and writes are dropped.
pub struct CooldownPolicy {
    config: CooldownConfig,
    clock: Arc<dyn Clock>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl CooldownPolicy {
    pub fn new(
        config: CooldownConfig,
        clock: Arc<dyn Clock>,
        store: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        if store.is_none() {
            debug!(prompt = %config.prompt, "Cooldown policy has no store; prompts always allowed");
        }

        Self {
            config,
            clock,
            store,
        }
    }

    pub fn config(&self) -> &CooldownConfig {
        &self.config
    }

    pub fn prompt(&self) -> &PromptId {
        &self.config.prompt
    }

    /// Whether the prompt may be shown now. Never fails; unreadable state
    /// counts as absent.
    pub fn can_show(&self) -> bool {
        self.status().can_show
    }

    /// Earliest instant the prompt becomes eligible, `None` if it is now
    pub fn eligible_at(&self) -> Option<Timestamp> {
        self.status().eligible_at
    }

    /// Read the stored state once and evaluate it against a single clock read
    pub fn status(&self) -> PromptStatus {
        let now = self.clock.now();
        let state = self.state();
        let eligible_at = state.eligible_at(now, self.config.min_interval);

        debug!(
            prompt = %self.config.prompt,
            now = %now,
            dismissed_until = ?state.dismissed_until,
            last_shown = ?state.last_shown,
            can_show = eligible_at.is_none(),
            "Cooldown evaluated"
        );

        PromptStatus {
            now,
            can_show: eligible_at.is_none(),
            eligible_at,
            state,
        }
    }

    /// Decoded persisted state
    pub fn state(&self) -> DismissalState {
        DismissalState {
            dismissed_until: self.read(&self.config.dismissed_until_key),
            last_shown: self.read(&self.config.last_shown_key),
        }
    }

    /// Record that the prompt was actually presented. Leaves any dismissal
    /// in place.
    pub fn mark_shown(&self) {
        let now = self.clock.now();
        self.write(&self.config.last_shown_key, now);
    }

    /// Dismiss for the configured default duration
    pub fn dismiss(&self) {
        self.dismiss_for(self.config.default_dismiss);
    }

    /// Suppress until `now + duration`. Replaces any earlier dismissal, even
    /// one that reaches further.
    pub fn dismiss_for(&self, duration: Duration) {
        let until = self.clock.now().saturating_add(duration);
        self.write(&self.config.dismissed_until_key, until);
    }

    /// Forget both timestamps
    pub fn reset(&self) {
        self.clear(&self.config.dismissed_until_key);
        self.clear(&self.config.last_shown_key);
    }

    fn read(&self, key: &StoreKey) -> Option<Timestamp> {
        let store = self.store.as_ref()?;

        match store.get(key) {
            Ok(Some(raw)) => match raw.parse::<Timestamp>() {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warn!(prompt = %self.config.prompt, key = %key, value = %raw, error = %e, "Ignoring malformed timestamp");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(prompt = %self.config.prompt, key = %key, error = %e, "Store read failed; treating as absent");
                None
            }
        }
    }

    fn write(&self, key: &StoreKey, value: Timestamp) {
        let Some(store) = &self.store else {
            return;
        };

        match store.set(key, &value.to_string()) {
            Ok(()) => debug!(prompt = %self.config.prompt, key = %key, value = %value, "Cooldown updated"),
            Err(e) => warn!(prompt = %self.config.prompt, key = %key, error = %e, "Store write failed; ignoring"),
        }
    }

    fn clear(&self, key: &StoreKey) {
        let Some(store) = &self.store else {
            return;
        };

        if let Err(e) = store.remove(key) {
            warn!(prompt = %self.config.prompt, key = %key, error = %e, "Store remove failed; ignoring");
        }
    }
}
