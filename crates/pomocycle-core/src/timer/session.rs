use serde::{Deserialize, Serialize};

/// Machine state of the session scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// No countdown; `remaining` holds the full duration of the current session.
    Idle,
    Running,
    /// Countdown frozen at its last value.
    Paused,
}

/// Kind of timed interval. Selects which configured duration applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionType {
    Work,
    ShortBreak,
    LongBreak,
}

impl SessionType {
    pub fn is_break(self) -> bool {
        !matches!(self, SessionType::Work)
    }

    /// Human-readable label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            SessionType::Work => "Work Session",
            SessionType::ShortBreak => "Short Break",
            SessionType::LongBreak => "Long Break",
        }
    }
}
