//! Toast Notification Queue
//!
//! Holds the short-lived messages screens show after a user action. Every
//! toast runs its own lifecycle task on the tokio runtime:
//! `Appearing -> Visible -> Disappearing -> Removed`. Toasts stack in
//! insertion order and each one removes itself when its own timer ends.

pub mod toast;

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, info};

use crate::shared::ToastEvent;

pub use toast::{ActiveToast, Severity, Toast, ToastId, ToastPhase, ToastTiming};

/// Errors raised by the toast queue and its types
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("toast queue must be created inside a tokio runtime")]
    NoRuntime,
    #[error("unknown severity `{0}`; expected success|error|info|coming-soon")]
    UnknownSeverity(String),
}

/// State shared between the queue and the lifecycle tasks
#[derive(Debug, Default)]
struct QueueState {
    /// Live toasts in insertion order
    active: Vec<ActiveToast>,
    /// Cancellation handle of each live toast's lifecycle task
    timers: HashMap<ToastId, AbortHandle>,
    /// Observers
    subscribers: Vec<Sender<ToastEvent>>,
}

impl QueueState {
    fn broadcast(&mut self, event: ToastEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn abort_all(&mut self) {
        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
    }
}

/// Queue of concurrently live toasts
#[derive(Debug)]
pub struct ToastQueue {
    state: Arc<Mutex<QueueState>>,
    timing: ToastTiming,
    runtime: Handle,
}

impl ToastQueue {
    /// Create a queue on the current tokio runtime
    pub fn new(timing: ToastTiming) -> Result<Self, NotifyError> {
        let runtime = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        Ok(Self::with_handle(timing, runtime))
    }

    /// Create a queue whose timers run on the given runtime
    pub fn with_handle(timing: ToastTiming, runtime: Handle) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            timing,
            runtime,
        }
    }

    pub fn timing(&self) -> ToastTiming {
        self.timing
    }

    /// Show a success toast
    pub fn show(&self, message: impl Into<String>) -> ToastId {
        self.show_toast(message, Severity::Success)
    }

    /// Append a toast and start its lifecycle timer
    pub fn show_toast(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let toast = Toast::new(message, severity);
        let id = toast.id;

        info!(id = id.value(), severity = %severity, message = %toast.message, "toast shown");

        // The lifecycle task needs this lock for every transition, so it
        // cannot observe the toast before its timer is registered.
        let mut state = self.state.lock();
        state.active.push(ActiveToast::new(toast.clone(), self.timing));
        state.broadcast(ToastEvent::Shown(toast));

        let task = self
            .runtime
            .spawn(run_lifecycle(Arc::downgrade(&self.state), id, self.timing));
        state.timers.insert(id, task.abort_handle());

        id
    }

    /// Register an observer for lifecycle events
    pub fn subscribe(&self) -> Receiver<ToastEvent> {
        let (tx, rx) = unbounded();
        self.state.lock().subscribers.push(tx);
        rx
    }

    /// Snapshot of the live toasts, oldest first
    pub fn active(&self) -> Vec<ActiveToast> {
        self.state.lock().active.clone()
    }

    /// Messages of the live toasts, oldest first
    pub fn messages(&self) -> Vec<String> {
        self.state
            .lock()
            .active
            .iter()
            .map(|t| t.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().active.is_empty()
    }

    /// Cancel every timer and drop every live toast
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.abort_all();
        let removed: Vec<ToastId> = state.active.drain(..).map(|t| t.id()).collect();
        for id in removed {
            state.broadcast(ToastEvent::Removed(id));
        }
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        // Timers must not outlive the queue that displays them
        self.state.lock().abort_all();
    }
}

/// Drive one toast through its phases, then take it out of the queue
async fn run_lifecycle(state: Weak<Mutex<QueueState>>, id: ToastId, timing: ToastTiming) {
    tokio::time::sleep(timing.appear).await;
    if !transition(&state, id, ToastPhase::Visible) {
        return;
    }

    tokio::time::sleep(timing.hold()).await;
    if !transition(&state, id, ToastPhase::Disappearing) {
        return;
    }

    tokio::time::sleep(timing.disappear).await;
    transition(&state, id, ToastPhase::Removed);
}

/// Apply a phase change; returns false when the toast or the queue is gone
fn transition(state: &Weak<Mutex<QueueState>>, id: ToastId, phase: ToastPhase) -> bool {
    let Some(state) = state.upgrade() else {
        return false;
    };
    let mut state = state.lock();

    let Some(pos) = state.active.iter().position(|t| t.id() == id) else {
        return false;
    };

    debug!(id = id.value(), ?phase, "toast phase");

    if phase == ToastPhase::Removed {
        state.active.remove(pos);
        state.timers.remove(&id);
        state.broadcast(ToastEvent::Removed(id));
    } else {
        state.active[pos].set_phase(phase);
        state.broadcast(ToastEvent::PhaseChanged { id, phase });
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn queue() -> ToastQueue {
        ToastQueue::new(ToastTiming::default()).unwrap()
    }

    #[test]
    fn test_new_outside_runtime_fails() {
        let result = ToastQueue::new(ToastTiming::default());
        assert!(matches!(result, Err(NotifyError::NoRuntime)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_stack_in_insertion_order() {
        let queue = queue();
        let x = queue.show_toast("X", Severity::Success);
        let y = queue.show_toast("Y", Severity::Info);

        assert!(x < y);
        assert_eq!(queue.messages(), vec!["X", "Y"]);
        assert_eq!(queue.active()[1].severity(), Severity::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_defaults_to_success() {
        let queue = queue();
        queue.show("saved");
        assert_eq!(queue.active()[0].severity(), Severity::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lifecycle_phases() {
        let queue = queue();
        queue.show("hello");
        assert_eq!(queue.active()[0].phase(), ToastPhase::Appearing);

        sleep(Duration::from_millis(350)).await;
        assert_eq!(queue.active()[0].phase(), ToastPhase::Visible);

        sleep(Duration::from_millis(2100)).await;
        assert_eq!(queue.active()[0].phase(), ToastPhase::Disappearing);

        sleep(Duration::from_millis(300)).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_toast_expires_on_its_own_timer() {
        let queue = queue();
        let rx = queue.subscribe();

        let x = queue.show_toast("X", Severity::Success);
        sleep(Duration::from_millis(100)).await;
        let y = queue.show_toast("Y", Severity::Info);

        // X was created at 0ms and leaves at 2700ms; Y leaves at 2800ms
        sleep(Duration::from_millis(2650)).await;
        assert_eq!(queue.messages(), vec!["Y"]);

        sleep(Duration::from_millis(100)).await;
        assert!(queue.is_empty());

        let removed: Vec<ToastId> = rx
            .try_iter()
            .filter_map(|event| match event {
                ToastEvent::Removed(id) => Some(id),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec![x, y]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_full_lifecycle() {
        let queue = queue();
        let rx = queue.subscribe();
        let id = queue.show("done");

        sleep(ToastTiming::default().total() + Duration::from_millis(10)).await;

        let events: Vec<ToastEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], ToastEvent::Shown(t) if t.id == id));
        assert_eq!(
            events[1],
            ToastEvent::PhaseChanged {
                id,
                phase: ToastPhase::Visible
            }
        );
        assert_eq!(
            events[2],
            ToastEvent::PhaseChanged {
                id,
                phase: ToastPhase::Disappearing
            }
        );
        assert_eq!(events[3], ToastEvent::Removed(id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_timers() {
        let queue = queue();
        let rx = queue.subscribe();
        queue.show("a");
        queue.show("b");

        queue.clear();
        assert!(queue.is_empty());

        sleep(Duration::from_secs(5)).await;
        let phase_changes = rx
            .try_iter()
            .filter(|e| matches!(e, ToastEvent::PhaseChanged { .. }))
            .count();
        assert_eq!(phase_changes, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_outstanding_timers() {
        let queue = queue();
        let rx = queue.subscribe();
        queue.show("bye");

        drop(queue);
        sleep(Duration::from_secs(5)).await;

        let events: Vec<ToastEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ToastEvent::Shown(_)));
    }
}
