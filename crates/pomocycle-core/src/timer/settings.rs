//! Session durations supplied by the settings provider.
//!
//! Durations are configured in whole minutes. Any value the provider hands
//! over is sanitized here: non-positive minutes fall back to the defaults,
//! oversized ones saturate.

use serde::{Deserialize, Serialize};

use super::session::SessionType;

pub const DEFAULT_WORK_MIN: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
pub const DEFAULT_LONG_BREAK_MIN: u32 = 15;

/// Sanitized session durations, in minutes. Every field is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    work: u32,
    short_break: u32,
    long_break: u32,
}

impl Settings {
    /// Build settings from raw minute values, replacing invalid ones with defaults.
    pub fn new(work: i64, short_break: i64, long_break: i64) -> Self {
        Self {
            work: sanitize(work, DEFAULT_WORK_MIN),
            short_break: sanitize(short_break, DEFAULT_SHORT_BREAK_MIN),
            long_break: sanitize(long_break, DEFAULT_LONG_BREAK_MIN),
        }
    }

    pub fn work_min(&self) -> u32 {
        self.work
    }

    pub fn short_break_min(&self) -> u32 {
        self.short_break
    }

    pub fn long_break_min(&self) -> u32 {
        self.long_break
    }

    /// Configured minutes for `kind`.
    pub fn minutes(&self, kind: SessionType) -> u32 {
        match kind {
            SessionType::Work => self.work,
            SessionType::ShortBreak => self.short_break,
            SessionType::LongBreak => self.long_break,
        }
    }

    /// Full duration of a `kind` session in seconds.
    pub fn session_duration(&self, kind: SessionType) -> u64 {
        u64::from(self.minutes(kind)) * 60
    }

    /// Copy with one duration replaced (sanitized like [`Settings::new`]).
    pub fn with_minutes(mut self, kind: SessionType, minutes: i64) -> Self {
        match kind {
            SessionType::Work => self.work = sanitize(minutes, DEFAULT_WORK_MIN),
            SessionType::ShortBreak => {
                self.short_break = sanitize(minutes, DEFAULT_SHORT_BREAK_MIN)
            }
            SessionType::LongBreak => self.long_break = sanitize(minutes, DEFAULT_LONG_BREAK_MIN),
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work: DEFAULT_WORK_MIN,
            short_break: DEFAULT_SHORT_BREAK_MIN,
            long_break: DEFAULT_LONG_BREAK_MIN,
        }
    }
}

fn sanitize(minutes: i64, fallback: u32) -> u32 {
    if minutes <= 0 {
        fallback
    } else {
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}
