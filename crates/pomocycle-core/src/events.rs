use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionType, TimerState};

/// Every state change of the scheduler produces an Event.
/// Hosts render them or forward them to their own subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        session_type: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A break was abandoned; the next work session is armed.
    BreakSkipped {
        skipped: SessionType,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        completed: SessionType,
        next: SessionType,
        work_sessions_completed: u64,
        cycle_count: u64,
        message: String,
        at: DateTime<Utc>,
    },
    /// New durations were accepted. `rearmed` is false when a countdown was
    /// in flight and kept its remaining time.
    SettingsApplied {
        rearmed: bool,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot(Snapshot),
}

/// Point-in-time view of the scheduler, produced after every command and tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: TimerState,
    pub session_type: SessionType,
    pub remaining_secs: u64,
    /// Duration the current session was armed with.
    pub total_secs: u64,
    pub work_sessions_completed: u64,
    pub cycle_count: u64,
    pub at: DateTime<Utc>,
}

impl Snapshot {
    /// 0.0 .. 1.0 progress within the current session.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }
}
