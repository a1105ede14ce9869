//! Application State Store
//!
//! Single source of truth for cross-screen state: water intake, the calorie
//! log and event/challenge membership. Commands replace the current
//! [`AppState`] snapshot and notify every subscriber before returning.

pub mod clock;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::FoodTemplate;
use crate::config::WaterSettings;
use crate::shared::{AppState, FoodLogEntry, StoreChange, StoreEvent, WaterState};

pub use clock::{Clock, ManualClock, SystemClock};

/// Store handle shared between screens
pub type SharedStore = Arc<RwLock<AppStore>>;

/// Owner of the application state
#[derive(Debug)]
pub struct AppStore {
    /// Current snapshot
    state: Arc<AppState>,
    /// Time source for log entry stamps
    clock: Box<dyn Clock>,
    /// Last stamp handed to a log entry
    last_stamp: i64,
    /// Live observers
    subscribers: Vec<Sender<StoreEvent>>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// Create a store with default water settings and an empty log
    pub fn new() -> Self {
        Self::with_state(AppState::default())
    }

    /// Create a store from configured water settings
    pub fn from_settings(settings: &WaterSettings) -> Self {
        let water = WaterState::new(settings.initial_intake_ml, settings.goal_ml);
        Self::with_state(AppState::with_water(water))
    }

    fn with_state(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
            clock: Box::new(SystemClock),
            last_stamp: i64::MIN,
            subscribers: Vec::new(),
        }
    }

    /// Replace the time source
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Wrap the store for sharing across screens
    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    /// Register an observer; it receives every later effective mutation
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Number of observers that have not been dropped yet
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Current snapshot
    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn water(&self) -> WaterState {
        self.state.water
    }

    pub fn water_intake(&self) -> u32 {
        self.state.water.intake_ml()
    }

    pub fn water_goal(&self) -> u32 {
        self.state.water.goal_ml()
    }

    pub fn calorie_log(&self) -> &[FoodLogEntry] {
        &self.state.calorie_log
    }

    /// Sum of kilocalories over the log as it is right now
    pub fn total_calories(&self) -> u32 {
        self.state.total_calories()
    }

    pub fn is_event_joined(&self, event_id: &str) -> bool {
        self.state.is_event_joined(event_id)
    }

    pub fn is_challenge_joined(&self, title: &str) -> bool {
        self.state.is_challenge_joined(title)
    }

    /// Add water, discarding anything above the goal
    pub fn add_water(&mut self, amount_ml: u32) {
        let before = self.state.water;
        let water = before.with_added(amount_ml);
        let applied_ml = water.intake_ml() - before.intake_ml();

        debug!(
            requested_ml = amount_ml,
            applied_ml,
            intake_ml = water.intake_ml(),
            "add_water"
        );

        let next = AppState {
            water,
            ..(*self.state).clone()
        };
        self.commit(
            next,
            StoreChange::WaterAdded {
                requested_ml: amount_ml,
                applied_ml,
            },
        );
    }

    /// Set water intake back to zero
    pub fn reset_water(&mut self) {
        debug!("reset_water");
        let next = AppState {
            water: self.state.water.reset(),
            ..(*self.state).clone()
        };
        self.commit(next, StoreChange::WaterReset);
    }

    /// Append a copy of the template to the log under a fresh id
    pub fn add_food(&mut self, template: &FoodTemplate) -> FoodLogEntry {
        let stamp = self.next_stamp();
        let entry = FoodLogEntry {
            id: format!("{}_{}", template.id, stamp),
            name: template.name.clone(),
            localized_name: template.localized_name.clone(),
            kcal: template.kcal,
            portion: template.portion.clone(),
            added_at: chrono::DateTime::from_timestamp_millis(stamp).unwrap_or_default(),
        };

        debug!(entry_id = %entry.id, kcal = entry.kcal, "add_food");

        let mut next = (*self.state).clone();
        next.calorie_log.push(entry.clone());
        self.commit(
            next,
            StoreChange::FoodAdded {
                entry_id: entry.id.clone(),
            },
        );
        entry
    }

    /// Remove the entry with this id; returns whether one was removed
    pub fn remove_food(&mut self, entry_id: &str) -> bool {
        let mut next = (*self.state).clone();
        next.calorie_log.retain(|entry| entry.id != entry_id);

        debug!(entry_id, "remove_food");
        self.commit(
            next,
            StoreChange::FoodRemoved {
                entry_id: entry_id.to_string(),
            },
        )
    }

    /// Empty the calorie log
    pub fn clear_log(&mut self) {
        debug!(entries = self.state.calorie_log.len(), "clear_log");
        let next = AppState {
            calorie_log: Vec::new(),
            ..(*self.state).clone()
        };
        self.commit(next, StoreChange::LogCleared);
    }

    /// Add an event to the joined set
    pub fn join_event(&mut self, event_id: &str) {
        let mut next = (*self.state).clone();
        next.joined_events.insert(event_id.to_string());

        debug!(event_id, "join_event");
        self.commit(next, StoreChange::EventJoined(event_id.to_string()));
    }

    /// Remove an event from the joined set
    pub fn leave_event(&mut self, event_id: &str) {
        let mut next = (*self.state).clone();
        next.joined_events.remove(event_id);

        debug!(event_id, "leave_event");
        self.commit(next, StoreChange::EventLeft(event_id.to_string()));
    }

    /// Add a challenge to the joined set. There is no way to leave one.
    pub fn join_challenge(&mut self, title: &str) {
        let mut next = (*self.state).clone();
        next.joined_challenges.insert(title.to_string());

        debug!(title, "join_challenge");
        self.commit(next, StoreChange::ChallengeJoined(title.to_string()));
    }

    /// Install `next` and notify observers, unless nothing changed
    fn commit(&mut self, next: AppState, change: StoreChange) -> bool {
        if next == *self.state {
            return false;
        }

        self.state = Arc::new(next);
        let event = StoreEvent {
            change,
            snapshot: Arc::clone(&self.state),
        };

        // Dropped receivers are pruned here
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        true
    }

    /// Strictly increasing insertion stamp, so repeated templates never share an id
    fn next_stamp(&mut self) -> i64 {
        let now = self.clock.now_millis();
        let stamp = if now > self.last_stamp {
            now
        } else {
            self.last_stamp + 1
        };
        self.last_stamp = stamp;
        stamp
    }
}
