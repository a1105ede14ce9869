//! Toast data structures and the per-item display envelope

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

use super::NotifyError;
use crate::config::ToastSettings;

/// Process-wide toast identifier, strictly increasing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

impl ToastId {
    /// Take the next id from the process-wide counter
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a toast is styled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Success,
    Error,
    Info,
    ComingSoon,
}

impl Severity {
    /// Background colour as a hex string
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#22C55E",
            Severity::Error => "#E63946",
            Severity::Info => "#3B82F6",
            Severity::ComingSoon => "#F59E0B",
        }
    }

    /// Icon shown next to the message
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "alert-circle",
            Severity::Info | Severity::ComingSoon => "info",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::ComingSoon => "coming-soon",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Ok(Severity::Success),
            "error" => Ok(Severity::Error),
            "info" => Ok(Severity::Info),
            "coming-soon" | "coming_soon" => Ok(Severity::ComingSoon),
            other => Err(NotifyError::UnknownSeverity(other.to_string())),
        }
    }
}

/// Lifecycle position of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    /// Fading in
    Appearing,
    /// Fully shown
    Visible,
    /// Fading out
    Disappearing,
    /// Out of the queue
    Removed,
}

/// A user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
}

impl Toast {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: ToastId::next(),
            message: message.into(),
            severity,
        }
    }
}

/// Fixed durations every toast goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    /// Fade-in
    pub appear: Duration,
    /// From creation until fade-out starts
    pub display: Duration,
    /// Fade-out
    pub disappear: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self::from(&ToastSettings::default())
    }
}

impl From<&ToastSettings> for ToastTiming {
    fn from(settings: &ToastSettings) -> Self {
        Self {
            appear: settings.appear(),
            display: settings.display(),
            disappear: settings.disappear(),
        }
    }
}

impl ToastTiming {
    /// Time spent fully visible
    pub fn hold(&self) -> Duration {
        self.display.saturating_sub(self.appear)
    }

    /// Time from creation until removal
    pub fn total(&self) -> Duration {
        self.display.max(self.appear) + self.disappear
    }
}

/// A toast currently in the queue, with its timing information
#[derive(Debug, Clone)]
pub struct ActiveToast {
    toast: Toast,
    phase: ToastPhase,
    created_at: Instant,
    phase_started_at: Instant,
    timing: ToastTiming,
}

impl ActiveToast {
    pub(crate) fn new(toast: Toast, timing: ToastTiming) -> Self {
        let now = Instant::now();
        Self {
            toast,
            phase: ToastPhase::Appearing,
            created_at: now,
            phase_started_at: now,
            timing,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: ToastPhase) {
        self.phase = phase;
        self.phase_started_at = Instant::now();
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn id(&self) -> ToastId {
        self.toast.id
    }

    pub fn message(&self) -> &str {
        &self.toast.message
    }

    pub fn severity(&self) -> Severity {
        self.toast.severity
    }

    pub fn phase(&self) -> ToastPhase {
        self.phase
    }

    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Opacity for renderers: ramps up while appearing, down while disappearing
    pub fn opacity(&self) -> f32 {
        let in_phase = self.phase_started_at.elapsed();
        match self.phase {
            ToastPhase::Appearing => ramp(in_phase, self.timing.appear),
            ToastPhase::Visible => 1.0,
            ToastPhase::Disappearing => 1.0 - ramp(in_phase, self.timing.disappear),
            ToastPhase::Removed => 0.0,
        }
    }
}

fn ramp(elapsed: Duration, over: Duration) -> f32 {
    if over.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / over.as_secs_f32()).min(1.0)
}
