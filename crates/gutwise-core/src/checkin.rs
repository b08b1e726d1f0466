//! Daily check-in card dismissal tracking

use gutwise_config::PromptConfig;
use gutwise_store::KeyValueStore;
use gutwise_util::{format_duration, Clock, Timestamp};
use std::sync::Arc;
use tracing::info;

use crate::{CooldownConfig, CooldownPolicy};

/// Decides when the check-in card may appear again after it was shown or
/// dismissed.
pub struct CheckInTracker {
    policy: CooldownPolicy,
}

impl CheckInTracker {
    /// Tracker with the built-in check-in settings
    pub fn new(clock: Arc<dyn Clock>, store: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self::with_config(&PromptConfig::checkin(), clock, store)
    }

    pub fn with_config(
        prompt: &PromptConfig,
        clock: Arc<dyn Clock>,
        store: Option<Arc<dyn KeyValueStore>>,
    ) -> Self {
        Self {
            policy: CooldownPolicy::new(CooldownConfig::from(prompt), clock, store),
        }
    }

    pub fn should_show(&self) -> bool {
        self.policy.can_show()
    }

    /// Call when the card is rendered, not when it is merely considered
    pub fn record_shown(&self) {
        self.policy.mark_shown();
    }

    pub fn dismiss(&self) {
        info!(
            duration = %format_duration(self.policy.config().default_dismiss),
            "Check-in dismissed"
        );
        self.policy.dismiss();
    }

    /// When the card becomes eligible again, `None` if it already is
    pub fn next_eligible(&self) -> Option<Timestamp> {
        self.policy.eligible_at()
    }

    pub fn clear(&self) {
        self.policy.reset();
    }

    pub fn policy(&self) -> &CooldownPolicy {
        &self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gutwise_store::MemoryStore;
    use gutwise_util::ManualClock;
    use std::time::Duration;

    const HOUR: Duration = Duration::from_secs(3600);

    fn setup() -> (CheckInTracker, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Timestamp::from_millis(1_000)));
        let store = Arc::new(MemoryStore::new());
        (CheckInTracker::new(clock.clone(), Some(store)), clock)
    }

    #[test]
    fn test_shows_when_never_seen() {
        let (tracker, _) = setup();
        assert!(tracker.should_show());
        assert_eq!(tracker.next_eligible(), None);
    }

    #[test]
    fn test_dismiss_hides_for_four_hours() {
        let (tracker, clock) = setup();
        tracker.dismiss();

        clock.advance(4 * HOUR - Duration::from_millis(1));
        assert!(!tracker.should_show());

        clock.advance(Duration::from_millis(1));
        assert!(tracker.should_show());
    }

    #[test]
    fn test_shown_card_waits_two_hours() {
        let (tracker, clock) = setup();
        tracker.record_shown();

        clock.advance(HOUR);
        assert!(!tracker.should_show());
        assert_eq!(
            tracker.next_eligible(),
            Some(Timestamp::from_millis(1_000).saturating_add(2 * HOUR))
        );

        clock.advance(HOUR);
        assert!(tracker.should_show());
    }

    #[test]
    fn test_clear() {
        let (tracker, _) = setup();
        tracker.record_shown();
        tracker.dismiss();
        tracker.clear();
        assert!(tracker.should_show());
    }

    #[test]
    fn test_custom_durations() {
        let clock = Arc::new(ManualClock::new(Timestamp::EPOCH));
        let prompt = PromptConfig::new("checkin", "Check-in", Duration::ZERO, HOUR);
        let tracker = CheckInTracker::with_config(&prompt, clock.clone(), Some(Arc::new(MemoryStore::new())));

        tracker.record_shown();
        assert!(tracker.should_show());

        tracker.dismiss();
        assert!(!tracker.should_show());
        clock.advance(HOUR);
        assert!(tracker.should_show());
    }

    #[test]
    fn test_sub_hour_dismissal() {
        let clock = Arc::new(ManualClock::new(Timestamp::EPOCH));
        let half_hour = Duration::from_secs(30 * 60);
        let prompt = PromptConfig::new("checkin", "Check-in", Duration::ZERO, half_hour);
        let tracker = CheckInTracker::with_config(&prompt, clock.clone(), Some(Arc::new(MemoryStore::new())));

        tracker.dismiss();
        assert_eq!(
            tracker.policy().eligible_at(),
            Some(Timestamp::EPOCH.saturating_add(half_hour))
        );
        clock.advance(half_hour - Duration::from_millis(1));
        assert!(!tracker.should_show());
        clock.advance(Duration::from_millis(1));
        assert!(tracker.should_show());
    }
}
