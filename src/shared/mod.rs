//! Shared state and messaging between the store, the toast queue and views
//!
//! Screens read [`AppState`] snapshots and receive [`StoreEvent`] /
//! [`ToastEvent`] messages over channels instead of polling.

pub mod messages;
pub mod state;

pub use messages::{StoreChange, StoreEvent, ToastEvent};
pub use state::{AppState, FoodLogEntry, WaterState};
