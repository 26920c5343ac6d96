//! Snapshot rendering for the interactive host.

use std::io::{self, Write};

use pomocycle_core::timer::CYCLE_LENGTH;
use pomocycle_core::{Event, Snapshot, TimerState};

const BAR_WIDTH: usize = 20;

/// Writes snapshots and events either as text lines or as JSON lines.
pub struct Renderer<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    pub fn snapshot(&mut self, snapshot: &Snapshot) -> io::Result<()> {
        if self.json {
            let event = Event::StateSnapshot(snapshot.clone());
            serde_json::to_writer(&mut self.out, &event)?;
            writeln!(self.out)?;
        } else {
            writeln!(self.out, "{}", status_line(snapshot))?;
        }
        self.out.flush()
    }

    pub fn event(&mut self, event: &Event) -> io::Result<()> {
        if self.json {
            serde_json::to_writer(&mut self.out, event)?;
            writeln!(self.out)?;
        } else if let Event::SessionCompleted { message, .. } = event {
            writeln!(self.out, "** {message}")?;
        }
        self.out.flush()
    }
}

/// `MM:SS`, minutes unbounded.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

pub fn status_line(snapshot: &Snapshot) -> String {
    let filled = (snapshot.progress() * BAR_WIDTH as f64).round() as usize;
    let state = match snapshot.state {
        TimerState::Idle => "idle",
        TimerState::Running => "running",
        TimerState::Paused => "paused",
    };
    format!(
        "{}  [{}{}]  {:<12}  {:<7}  {} of {} works done",
        format_clock(snapshot.remaining_secs),
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
        snapshot.session_type.label(),
        state,
        snapshot.work_sessions_completed,
        CYCLE_LENGTH,
    )
}
