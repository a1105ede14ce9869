//! Application Coordinator
//!
//! Owns the shared store and the toast queue, and runs the flows screens
//! trigger on user actions: one store command followed by one toast that
//! reports the outcome.

use tracing::info;

use crate::catalog::{Challenge, EventListing, FoodTemplate};
use crate::config::AppConfig;
use crate::notify::{NotifyError, Severity, ToastId, ToastQueue, ToastTiming};
use crate::shared::FoodLogEntry;
use crate::store::{AppStore, SharedStore};

/// Result of a water quick-add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaterOutcome {
    /// Water was added and the goal is still ahead
    Added,
    /// This addition reached the goal
    GoalReached,
    /// The goal was already reached; nothing changed
    AlreadyReached,
}

/// Result of tapping join/leave on an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Joined,
    Left,
    /// The event was full; membership unchanged
    Waitlisted,
}

/// Result of tapping join on a challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    Joined,
    AlreadyJoined,
}

/// Main application coordinator
pub struct FitPulseApp {
    /// Application configuration
    config: AppConfig,
    /// State shared by every screen
    store: SharedStore,
    /// Outcome notifications
    toasts: ToastQueue,
}

impl FitPulseApp {
    /// Create the coordinator on the current tokio runtime
    pub fn new(config: AppConfig) -> Result<Self, NotifyError> {
        let store = AppStore::from_settings(&config.water);
        let toasts = ToastQueue::new(ToastTiming::from(&config.toasts))?;
        Ok(Self::with_parts(config, store, toasts))
    }

    /// Assemble the coordinator from prepared parts
    pub fn with_parts(config: AppConfig, store: AppStore, toasts: ToastQueue) -> Self {
        info!(
            water_goal_ml = store.water_goal(),
            "Application state initialized"
        );
        Self {
            config,
            store: store.into_shared(),
            toasts,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the shared store handle
    pub fn store(&self) -> SharedStore {
        self.store.clone()
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Amounts the home screen offers as quick-add buttons
    pub fn quick_add_amounts(&self) -> &[u32] {
        &self.config.water.quick_add_ml
    }

    /// Home screen water quick-add
    pub fn add_water(&self, amount_ml: u32) -> WaterOutcome {
        let outcome = {
            let mut store = self.store.write();
            if store.water().goal_reached() {
                WaterOutcome::AlreadyReached
            } else {
                store.add_water(amount_ml);
                if store.water().goal_reached() {
                    WaterOutcome::GoalReached
                } else {
                    WaterOutcome::Added
                }
            }
        };

        match outcome {
            WaterOutcome::AlreadyReached => self
                .toasts
                .show_toast("Daily water goal already reached! 💧", Severity::Info),
            WaterOutcome::GoalReached => self
                .toasts
                .show_toast("Daily water goal reached! 🎉", Severity::Success),
            WaterOutcome::Added => self
                .toasts
                .show_toast(format!("+{amount_ml} ml added"), Severity::Success),
        };
        outcome
    }

    /// Home screen water reset
    pub fn reset_water(&self) {
        self.store.write().reset_water();
        self.toasts.show_toast("Water intake reset to 0", Severity::Info);
    }

    /// Calorie index "add" button
    pub fn log_food(&self, template: &FoodTemplate) -> FoodLogEntry {
        let entry = self.store.write().add_food(template);
        self.toasts.show_toast(
            format!("+{} kcal — {} added", template.kcal, template.name),
            Severity::Success,
        );
        entry
    }

    /// Remove one entry from the daily log; returns whether it existed
    pub fn remove_food(&self, entry_id: &str) -> bool {
        let removed = {
            let mut store = self.store.write();
            let name = store
                .calorie_log()
                .iter()
                .find(|entry| entry.id == entry_id)
                .map(|entry| entry.name.clone());
            name.filter(|_| store.remove_food(entry_id))
        };

        match removed {
            Some(name) => {
                self.toasts.show_toast(format!("Removed {name}"), Severity::Info);
                true
            }
            None => false,
        }
    }

    /// Empty the daily log; returns whether there was anything to clear
    pub fn clear_food_log(&self) -> bool {
        let had_entries = {
            let mut store = self.store.write();
            let had_entries = !store.calorie_log().is_empty();
            store.clear_log();
            had_entries
        };

        if had_entries {
            self.toasts.show_toast("Daily log cleared", Severity::Info);
        }
        had_entries
    }

    /// Discover screen join/leave button
    pub fn toggle_event(&self, event: &EventListing) -> EventOutcome {
        let outcome = {
            let mut store = self.store.write();
            if store.is_event_joined(&event.id) {
                store.leave_event(&event.id);
                EventOutcome::Left
            } else if event.is_full() {
                EventOutcome::Waitlisted
            } else {
                store.join_event(&event.id);
                EventOutcome::Joined
            }
        };

        match outcome {
            EventOutcome::Left => self
                .toasts
                .show_toast(format!("Left \"{}\"", event.title), Severity::Info),
            EventOutcome::Waitlisted => self.toasts.show_toast(
                "Event is full. You've been added to the waitlist.",
                Severity::Info,
            ),
            EventOutcome::Joined => self
                .toasts
                .show_toast(format!("Joined \"{}\"! 🎉", event.title), Severity::Success),
        };
        outcome
    }

    /// Spots left on an event from the current user's point of view
    pub fn spots_left(&self, event: &EventListing) -> u32 {
        event.spots_left(self.store.read().is_event_joined(&event.id))
    }

    /// Challenges screen join button
    pub fn join_challenge(&self, challenge: &Challenge) -> ChallengeOutcome {
        let outcome = {
            let mut store = self.store.write();
            if store.is_challenge_joined(&challenge.title) {
                ChallengeOutcome::AlreadyJoined
            } else {
                store.join_challenge(&challenge.title);
                ChallengeOutcome::Joined
            }
        };

        match outcome {
            ChallengeOutcome::AlreadyJoined => self.toasts.show_toast(
                format!("Already joined \"{}\"", challenge.title),
                Severity::Info,
            ),
            ChallengeOutcome::Joined => self.toasts.show_toast(
                format!("Joined \"{}\"! 🔥", challenge.title),
                Severity::Success,
            ),
        };
        outcome
    }

    /// Free-form message for taps with no state behind them
    pub fn announce(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        self.toasts.show_toast(message, severity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_challenges, default_events, default_foods};

    fn app() -> FitPulseApp {
        FitPulseApp::new(AppConfig::default()).unwrap()
    }

    fn last_message(app: &FitPulseApp) -> String {
        app.toasts().messages().last().cloned().unwrap_or_default()
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_water_messages() {
        let app = app();

        assert_eq!(app.add_water(200), WaterOutcome::Added);
        assert_eq!(last_message(&app), "+200 ml added");
        assert_eq!(app.store().read().water_intake(), 1400);

        assert_eq!(app.add_water(5000), WaterOutcome::GoalReached);
        assert_eq!(last_message(&app), "Daily water goal reached! 🎉");
        assert_eq!(app.store().read().water_intake(), 3400);

        assert_eq!(app.add_water(200), WaterOutcome::AlreadyReached);
        assert_eq!(last_message(&app), "Daily water goal already reached! 💧");
        assert_eq!(app.toasts().active()[2].severity(), Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_water() {
        let app = app();
        app.reset_water();
        assert_eq!(app.store().read().water_intake(), 0);
        assert_eq!(last_message(&app), "Water intake reset to 0");
    }

    #[tokio::test(start_paused = true)]
    async fn test_log_and_remove_food() {
        let app = app();
        let foods = default_foods();

        let honey = app.log_food(&foods[0]);
        app.log_food(&foods[1]);
        assert_eq!(last_message(&app), "+275 kcal — White Cheese added");
        assert_eq!(app.store().read().total_calories(), 582);

        assert!(app.remove_food(&honey.id));
        assert_eq!(last_message(&app), "Removed Honey");
        assert_eq!(app.store().read().total_calories(), 275);

        assert!(!app.remove_food(&honey.id));
        assert_eq!(app.toasts().len(), 3);

        assert!(app.clear_food_log());
        assert_eq!(last_message(&app), "Daily log cleared");
        assert!(!app.clear_food_log());
        assert_eq!(app.toasts().len(), 4);
        assert_eq!(app.store().read().total_calories(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_event() {
        let app = app();
        let event = default_events().remove(0);
        assert_eq!(app.spots_left(&event), 6);

        assert_eq!(app.toggle_event(&event), EventOutcome::Joined);
        assert_eq!(last_message(&app), "Joined \"Belgrad Forest Trekking\"! 🎉");
        assert_eq!(app.spots_left(&event), 5);

        assert_eq!(app.toggle_event(&event), EventOutcome::Left);
        assert_eq!(last_message(&app), "Left \"Belgrad Forest Trekking\"");
        assert!(!app.store().read().is_event_joined(&event.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_event_waitlists_without_joining() {
        let app = app();
        let mut event = default_events().remove(1);
        event.participants = event.max_participants;

        assert_eq!(app.toggle_event(&event), EventOutcome::Waitlisted);
        assert_eq!(
            last_message(&app),
            "Event is full. You've been added to the waitlist."
        );
        assert!(!app.store().read().is_event_joined(&event.id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_join_challenge_twice() {
        let app = app();
        let challenge = default_challenges().remove(0);

        assert_eq!(app.join_challenge(&challenge), ChallengeOutcome::Joined);
        assert_eq!(last_message(&app), "Joined \"30-Day Running Streak\"! 🔥");

        assert_eq!(app.join_challenge(&challenge), ChallengeOutcome::AlreadyJoined);
        assert_eq!(last_message(&app), "Already joined \"30-Day Running Streak\"");
        assert_eq!(app.store().read().state().joined_challenges.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_observers_see_flow_mutations() {
        let app = app();
        let rx = app.store().write().subscribe();

        app.add_water(350);
        app.announce("Profile coming soon", Severity::ComingSoon);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].snapshot.water.intake_ml(), 1550);
        assert_eq!(app.toasts().active()[1].severity(), Severity::ComingSoon);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flow_toasts_expire() {
        let app = app();
        app.add_water(200);
        app.reset_water();
        assert_eq!(app.toasts().len(), 2);

        tokio::time::sleep(ToastTiming::default().total() + std::time::Duration::from_millis(1))
            .await;
        assert!(app.toasts().is_empty());
    }

    #[test]
    fn test_quick_add_amounts_from_config() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _guard = runtime.enter();

        let app = app();
        assert_eq!(app.quick_add_amounts(), &[200, 350, 500]);
    }
}
