//! Session scheduler.
//!
//! The scheduler is a tick-driven state machine over [`TimerState`] and
//! [`SessionType`]. It owns at most one live periodic task (a [`TickHandle`])
//! and holds it exactly while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running
//! Running | Paused -> Idle          (stop / reset)
//! Running -> Idle                   (countdown reaches zero, next session armed)
//! any state, break session -> Idle  (skip break, work session armed)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut scheduler = SessionScheduler::new(settings, ManualTickSource::new(), LogNotifier);
//! scheduler.start();
//! // Once per second, from the tick source:
//! scheduler.tick(); // Returns Some(Event::SessionCompleted) when the session ends
//! ```

use std::fmt;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::command::Command;
use super::session::{SessionType, TimerState};
use super::settings::Settings;
use super::tick::{TickHandle, TickId, TickSource};
use crate::events::{Event, Snapshot};
use crate::notify::Notifier;

/// Work sessions per cycle. Every `CYCLE_LENGTH`-th completed work session is
/// followed by a long break.
pub const CYCLE_LENGTH: u64 = 4;

pub const WORK_COMPLETED_MESSAGE: &str = "Work session completed! Time for a break.";
pub const BREAK_COMPLETED_MESSAGE: &str = "Break completed! Time to get back to work.";

pub struct SessionScheduler {
    settings: Settings,
    state: TimerState,
    session_type: SessionType,
    remaining_secs: u64,
    /// Duration the current session was armed with. Only re-read from the
    /// settings when a session is (re)armed.
    total_secs: u64,
    cycle_count: u64,
    work_sessions_completed: u64,
    ticks: Box<dyn TickSource>,
    active_tick: Option<TickHandle>,
    next_tick_id: TickId,
    notifier: Box<dyn Notifier>,
}

impl SessionScheduler {
    /// Create a scheduler idle at the start of a work session.
    pub fn new(
        settings: Settings,
        ticks: impl TickSource + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let total_secs = settings.session_duration(SessionType::Work);
        Self {
            settings,
            state: TimerState::Idle,
            session_type: SessionType::Work,
            remaining_secs: total_secs,
            total_secs,
            cycle_count: 0,
            // Display counter; starts at one before anything is completed.
            work_sessions_completed: 1,
            ticks: Box::new(ticks),
            active_tick: None,
            next_tick_id: 1,
            notifier: Box::new(notifier),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn session_type(&self) -> SessionType {
        self.session_type
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn work_sessions_completed(&self) -> u64 {
        self.work_sessions_completed
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Id of the live tick task, if the timer is running.
    pub fn active_tick(&self) -> Option<TickId> {
        self.active_tick.as_ref().map(TickHandle::id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            session_type: self.session_type,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            work_sessions_completed: self.work_sessions_completed,
            cycle_count: self.cycle_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.run();
                debug!(session = ?self.session_type, remaining_secs = self.remaining_secs, "timer started");
                Some(Event::TimerStarted {
                    session_type: self.session_type,
                    remaining_secs: self.remaining_secs,
                    at: Utc::now(),
                })
            }
            // Already counting down, or waiting for resume.
            TimerState::Running | TimerState::Paused => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.release_tick();
        self.state = TimerState::Paused;
        debug!(remaining_secs = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.run();
        debug!(remaining_secs = self.remaining_secs, "timer resumed");
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Abandon the current countdown and re-arm the same session type.
    pub fn stop(&mut self) -> Option<Event> {
        let was_active = self.disarm();
        if !was_active {
            return None;
        }
        debug!(session = ?self.session_type, "timer stopped");
        Some(Event::TimerStopped {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Same transition as [`SessionScheduler::stop`].
    pub fn reset(&mut self) -> Option<Event> {
        let was_active = self.disarm();
        if !was_active {
            return None;
        }
        debug!(session = ?self.session_type, "timer reset");
        Some(Event::TimerReset {
            session_type: self.session_type,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Leave a break early. Counters are untouched: skipping is not completing.
    pub fn skip_break(&mut self) -> Option<Event> {
        if !self.session_type.is_break() {
            return None;
        }
        let skipped = self.session_type;
        self.release_tick();
        self.arm(SessionType::Work);
        debug!(?skipped, "break skipped");
        Some(Event::BreakSkipped {
            skipped,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start, pause or resume depending on the current state.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle => self.start(),
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
        }
    }

    /// Accept new durations.
    ///
    /// An idle timer is re-armed immediately. A running or paused countdown
    /// keeps its remaining time; the new durations apply from the next session.
    pub fn apply_settings(&mut self, settings: Settings) -> Option<Event> {
        self.settings = settings;
        let rearmed = self.state == TimerState::Idle;
        if rearmed {
            self.arm(self.session_type);
        }
        debug!(rearmed, remaining_secs = self.remaining_secs, "settings applied");
        Some(Event::SettingsApplied {
            rearmed,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn handle(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Stop => self.stop(),
            Command::Reset => self.reset(),
            Command::SkipBreak => self.skip_break(),
            Command::Toggle => self.toggle(),
            Command::ApplySettings(settings) => self.apply_settings(settings),
        }
    }

    /// Advance the countdown by one second.
    ///
    /// Returns `Some(Event::SessionCompleted)` when the session ends.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            return Some(self.complete());
        }
        self.remaining_secs -= 1;
        None
    }

    /// Deliver a tick produced by the tick task `id`.
    ///
    /// Ticks from a task that has since been released are discarded.
    pub fn on_tick(&mut self, id: TickId) -> Option<Event> {
        if self.active_tick() != Some(id) {
            debug!(id, "discarding stale tick");
            return None;
        }
        self.tick()
    }

    /// Tear the scheduler down, cancelling any live tick task.
    pub fn dispose(mut self) {
        self.release_tick();
        debug!("scheduler disposed");
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self) -> Event {
        self.release_tick();
        let completed = self.session_type;

        let (next, message) = match completed {
            SessionType::Work => {
                self.work_sessions_completed += 1;
                self.cycle_count += 1;
                let next = if self.cycle_count % CYCLE_LENGTH == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::ShortBreak
                };
                (next, WORK_COMPLETED_MESSAGE)
            }
            SessionType::ShortBreak | SessionType::LongBreak => {
                (SessionType::Work, BREAK_COMPLETED_MESSAGE)
            }
        };

        self.arm(next);
        info!(?completed, ?next, cycle_count = self.cycle_count, "session completed");

        if let Err(e) = self.notifier.notify(message) {
            warn!("completion notification dropped: {e}");
        }

        Event::SessionCompleted {
            completed,
            next,
            work_sessions_completed: self.work_sessions_completed,
            cycle_count: self.cycle_count,
            message: message.to_string(),
            at: Utc::now(),
        }
    }

    /// Enter `Running` with a fresh tick task.
    fn run(&mut self) {
        self.release_tick();
        let id = self.next_tick_id;
        self.next_tick_id += 1;
        self.active_tick = Some(self.ticks.activate(id));
        self.state = TimerState::Running;
    }

    /// Release the tick task and re-arm the current session as idle.
    /// Returns whether a countdown was in flight.
    fn disarm(&mut self) -> bool {
        let was_active = self.state != TimerState::Idle;
        self.release_tick();
        self.arm(self.session_type);
        was_active
    }

    /// Idle at the start of a `kind` session.
    fn arm(&mut self, kind: SessionType) {
        self.session_type = kind;
        self.total_secs = self.settings.session_duration(kind);
        self.remaining_secs = self.total_secs;
        self.state = TimerState::Idle;
    }

    fn release_tick(&mut self) {
        // Dropping the handle cancels the task.
        self.active_tick = None;
    }
}

impl Drop for SessionScheduler {
    fn drop(&mut self) {
        self.release_tick();
    }
}

impl fmt::Debug for SessionScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionScheduler")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("session_type", &self.session_type)
            .field("remaining_secs", &self.remaining_secs)
            .field("total_secs", &self.total_secs)
            .field("cycle_count", &self.cycle_count)
            .field("work_sessions_completed", &self.work_sessions_completed)
            .field("active_tick", &self.active_tick)
            .finish_non_exhaustive()
    }
}
