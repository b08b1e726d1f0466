//! Eating-out notification permission prompt
//!
//! The prompt asks the user to enable notifications. It is only offered while
//! the platform permission is still undecided, and it is rate limited by a
//! [`CooldownPolicy`]. The notification capability itself may be missing
//! (unsupported browser), in which case the prompt is never offered.

use gutwise_config::PromptConfig;
use gutwise_store::KeyValueStore;
use gutwise_util::Clock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use crate::{CooldownConfig, CooldownPolicy};

/// Platform notification permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    /// The user has not decided yet
    Default,
    Granted,
    Denied,
}

/// Platform notification capability
pub trait NotificationBackend: Send + Sync {
    fn permission(&self) -> NotificationPermission;

    /// Ask the user. May block on user interaction.
    fn request_permission(&self) -> NotificationPermission;
}

/// Offers the notification permission prompt at a tolerable rate
pub struct NotificationPromptService {
    backend: Option<Arc<dyn NotificationBackend>>,
    policy: CooldownPolicy,
    not_now: std::time::Duration,
}

impl NotificationPromptService {
    /// Service with the built-in notification prompt settings
    pub fn new(
        backend: Option<Arc<dyn NotificationBackend>>,
        clock: Arc<dyn Clock>,
        store: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        Self::with_config(&PromptConfig::notify_prompt(), backend, clock, store)
    }

    pub fn with_config(
        prompt: &PromptConfig,
        backend: Option<Arc<dyn NotificationBackend>>,
        clock: Arc<dyn Clock>,
        store: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        if backend.is_none() {
            debug!(prompt = %prompt.id, "Notifications unsupported; prompt disabled");
        }

        Self {
            backend,
            policy: CooldownPolicy::new(CooldownConfig::from(prompt), clock, store),
            not_now: prompt.not_now.unwrap_or(prompt.default_dismiss),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.backend.is_some()
    }

    /// Current permission, `None` when notifications are unsupported
    pub fn permission(&self) -> Option<NotificationPermission> {
        self.backend.as_ref().map(|b| b.permission())
    }

    /// Whether to show the prompt now
    pub fn should_prompt(&self) -> bool {
        match self.permission() {
            Some(NotificationPermission::Default) => self.policy.can_show(),
            _ => false,
        }
    }

    /// Call when the prompt is actually displayed
    pub fn prompt_shown(&self) {
        self.policy.mark_shown();
    }

    /// Dismiss for the default duration
    pub fn dismiss(&self) {
        self.policy.dismiss();
    }

    /// Explicit "not now"
    pub fn not_now(&self) {
        self.policy.dismiss_for(self.not_now);
    }

    /// Ask the platform for permission.
    ///
    /// A decided answer clears the cooldown; the prompt stays hidden because
    /// the permission is no longer undecided. An undecided answer (the user
    /// closed the request) counts as a default dismissal. Query
    /// [`should_prompt`](Self::should_prompt) again afterwards rather than
    /// reusing an earlier answer.
    pub fn request_permission(&self) -> NotificationPermission {
        let Some(backend) = &self.backend else {
            warn!("Permission requested but notifications are unsupported");
            return NotificationPermission::Denied;
        };

        let permission = backend.request_permission();
        info!(?permission, "Notification permission resolved");

        match permission {
            NotificationPermission::Default => self.policy.dismiss(),
            NotificationPermission::Granted | NotificationPermission::Denied => self.policy.reset(),
        }

        permission
    }

    pub fn reset(&self) {
        self.policy.reset();
    }

    pub fn policy(&self) -> &CooldownPolicy {
        &self.policy
    }
}

/// Scripted notification backend for tests and headless runs
#[derive(Debug)]
pub struct MockNotifications {
    permission: Mutex<NotificationPermission>,
    /// Answer given to the next `request_permission`
    answer: Mutex<NotificationPermission>,
}

impl MockNotifications {
    pub fn new(permission: NotificationPermission) -> Self {
        Self {
            permission: Mutex::new(permission),
            answer: Mutex::new(permission),
        }
    }

    pub fn answer_with(self, answer: NotificationPermission) -> Self {
        if let Ok(mut a) = self.answer.lock() {
            *a = answer;
        }
        self
    }
}

impl NotificationBackend for MockNotifications {
    fn permission(&self) -> NotificationPermission {
        self.permission
            .lock()
            .map(|p| *p)
            .unwrap_or(NotificationPermission::Default)
    }

    fn request_permission(&self) -> NotificationPermission {
        let answer = self
            .answer
            .lock()
            .map(|a| *a)
            .unwrap_or(NotificationPermission::Default);
        if let Ok(mut p) = self.permission.lock() {
            *p = answer;
        }
        answer
    }
}
