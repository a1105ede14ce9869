//! FitPulse - client state core for a fitness and social app
//!
//! Water intake tracking, a calorie log, event and challenge membership and
//! self-expiring toast notifications. Screens read snapshots from the store,
//! issue commands, and report outcomes through the toast queue.

pub mod app;
pub mod calculators;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod shared;
pub mod store;

pub use app::{ChallengeOutcome, EventOutcome, FitPulseApp, WaterOutcome};
pub use notify::{Severity, ToastQueue};
pub use shared::{AppState, FoodLogEntry, StoreChange, StoreEvent, ToastEvent};
pub use store::{AppStore, SharedStore};
