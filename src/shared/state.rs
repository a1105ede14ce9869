//! Application state snapshot shared by every screen

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Water already logged when a fresh store starts
pub const DEFAULT_WATER_INTAKE_ML: u32 = 1200;
/// Daily water target
pub const DEFAULT_WATER_GOAL_ML: u32 = 3400;

/// Water intake progress for today
///
/// The intake never exceeds the goal: every constructor and update clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterState {
    intake_ml: u32,
    goal_ml: u32,
}

impl Default for WaterState {
    fn default() -> Self {
        Self::new(DEFAULT_WATER_INTAKE_ML, DEFAULT_WATER_GOAL_ML)
    }
}

impl WaterState {
    /// Create a water state, clamping the intake to the goal
    pub fn new(intake_ml: u32, goal_ml: u32) -> Self {
        let goal_ml = goal_ml.max(1);
        Self {
            intake_ml: intake_ml.min(goal_ml),
            goal_ml,
        }
    }

    pub fn intake_ml(&self) -> u32 {
        self.intake_ml
    }

    pub fn goal_ml(&self) -> u32 {
        self.goal_ml
    }

    /// Intake after adding `amount_ml`, excess above the goal discarded
    pub fn with_added(self, amount_ml: u32) -> Self {
        Self {
            intake_ml: self.intake_ml.saturating_add(amount_ml).min(self.goal_ml),
            ..self
        }
    }

    pub fn reset(self) -> Self {
        Self {
            intake_ml: 0,
            ..self
        }
    }

    /// Progress toward the goal in percent, capped at 100
    pub fn fill_percent(&self) -> f64 {
        (f64::from(self.intake_ml) / f64::from(self.goal_ml) * 100.0).min(100.0)
    }

    pub fn remaining_ml(&self) -> u32 {
        self.goal_ml - self.intake_ml
    }

    pub fn goal_reached(&self) -> bool {
        self.intake_ml >= self.goal_ml
    }
}

/// A food template instantiated into the calorie log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodLogEntry {
    /// Template id suffixed with the insertion stamp, unique within the log
    pub id: String,
    /// English name
    pub name: String,
    /// Name in the app's second language
    pub localized_name: String,
    /// Energy per portion
    pub kcal: u32,
    /// Human readable portion ("100 gram", "1 tbsp")
    pub portion: String,
    /// When the entry was logged
    pub added_at: DateTime<Utc>,
}

/// Immutable snapshot of everything the screens share
///
/// The store never mutates a snapshot in place. Each command builds the next
/// snapshot from a clone, so a snapshot handed to an observer stays valid and
/// two snapshots can be compared to detect change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    /// Water tracker
    pub water: WaterState,
    /// Foods logged today, in insertion order
    pub calorie_log: Vec<FoodLogEntry>,
    /// Ids of events the user has joined
    pub joined_events: BTreeSet<String>,
    /// Titles of challenges the user has joined
    pub joined_challenges: BTreeSet<String>,
}

impl AppState {
    /// Create an empty state with the given water settings
    pub fn with_water(water: WaterState) -> Self {
        Self {
            water,
            ..Self::default()
        }
    }

    /// Sum of kilocalories over the current log
    pub fn total_calories(&self) -> u32 {
        self.calorie_log.iter().map(|entry| entry.kcal).sum()
    }

    pub fn is_event_joined(&self, event_id: &str) -> bool {
        self.joined_events.contains(event_id)
    }

    pub fn is_challenge_joined(&self, title: &str) -> bool {
        self.joined_challenges.contains(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_water_state() {
        let water = WaterState::default();
        assert_eq!(water.intake_ml(), 1200);
        assert_eq!(water.goal_ml(), 3400);
        assert_eq!(water.remaining_ml(), 2200);
        assert!(!water.goal_reached());
    }

    #[test]
    fn test_water_addition_clamps_to_goal() {
        let water = WaterState::default().with_added(3000);
        assert_eq!(water.intake_ml(), 3400);
        assert!(water.goal_reached());
        assert_eq!(water.remaining_ml(), 0);

        let water = water.with_added(u32::MAX);
        assert_eq!(water.intake_ml(), 3400);
    }

    #[test]
    fn test_water_constructor_clamps_initial_intake() {
        let water = WaterState::new(5000, 2000);
        assert_eq!(water.intake_ml(), 2000);
    }

    #[test]
    fn test_fill_percent() {
        let water = WaterState::new(1700, 3400);
        assert!((water.fill_percent() - 50.0).abs() < f64::EPSILON);

        let full = WaterState::new(3400, 3400);
        assert!((full.fill_percent() - 100.0).abs() < f64::EPSILON);

        let empty = WaterState::default().reset();
        assert_eq!(empty.fill_percent(), 0.0);
    }

    #[test]
    fn test_total_calories_empty_log() {
        assert_eq!(AppState::default().total_calories(), 0);
    }
}
