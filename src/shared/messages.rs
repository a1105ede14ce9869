//! Message types broadcast by the store and the toast queue

use std::sync::Arc;

use crate::notify::{Toast, ToastId, ToastPhase};
use crate::shared::state::AppState;

/// What a store command changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// Water was added; `applied_ml` is what remained after clamping
    WaterAdded { requested_ml: u32, applied_ml: u32 },
    /// Water intake was set back to zero
    WaterReset,
    /// A food entry was appended to the log
    FoodAdded { entry_id: String },
    /// A food entry was removed from the log
    FoodRemoved { entry_id: String },
    /// The calorie log was emptied
    LogCleared,
    /// An event id joined the membership set
    EventJoined(String),
    /// An event id left the membership set
    EventLeft(String),
    /// A challenge title joined the membership set
    ChallengeJoined(String),
}

/// Notification sent to store subscribers after every effective mutation
#[derive(Debug, Clone)]
pub struct StoreEvent {
    /// The command that produced this snapshot
    pub change: StoreChange,
    /// State after the command
    pub snapshot: Arc<AppState>,
}

/// Notification sent to toast subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    /// A toast entered the active queue
    Shown(Toast),
    /// A live toast moved to a new lifecycle phase
    PhaseChanged { id: ToastId, phase: ToastPhase },
    /// A toast left the active queue
    Removed(ToastId),
}
