//! Line-oriented input for the interactive host.
//!
//! One command per line. Single-letter aliases mirror the keyboard shortcuts
//! of the desktop page: an empty line or a space toggles, `r` resets and `s`
//! stops, each only where the page would offer it.

use pomocycle_core::{Command, SessionType, TimerState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Timer(Command),
    Shortcut(Shortcut),
    Set { kind: SessionType, minutes: i64 },
    Status,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `r`: reset unless idle.
    Reset,
    /// `s`: stop while running.
    Stop,
}

impl Shortcut {
    /// Command this shortcut stands for in `state`, if any.
    pub fn command(self, state: TimerState) -> Option<Command> {
        match (self, state) {
            (Shortcut::Reset, TimerState::Running | TimerState::Paused) => Some(Command::Reset),
            (Shortcut::Stop, TimerState::Running) => Some(Command::Stop),
            _ => None,
        }
    }
}

pub fn parse(line: &str) -> Result<Input, String> {
    if line.trim().is_empty() {
        return Ok(Input::Timer(Command::Toggle));
    }
    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default().to_ascii_lowercase();

    let input = match head.as_str() {
        "start" => Input::Timer(Command::Start),
        "pause" => Input::Timer(Command::Pause),
        "resume" => Input::Timer(Command::Resume),
        "stop" => Input::Timer(Command::Stop),
        "reset" => Input::Timer(Command::Reset),
        "skip" | "skip-break" => Input::Timer(Command::SkipBreak),
        "toggle" => Input::Timer(Command::Toggle),
        "r" => Input::Shortcut(Shortcut::Reset),
        "s" => Input::Shortcut(Shortcut::Stop),
        "status" => Input::Status,
        "q" | "quit" | "exit" => Input::Quit,
        "set" => {
            let kind = match words.next() {
                Some("work") => SessionType::Work,
                Some("short") => SessionType::ShortBreak,
                Some("long") => SessionType::LongBreak,
                other => {
                    return Err(format!(
                        "expected work, short or long after 'set', got {}",
                        other.unwrap_or("nothing")
                    ))
                }
            };
            let minutes = words
                .next()
                .ok_or_else(|| "missing minutes".to_string())?
                .parse::<i64>()
                .map_err(|e| format!("invalid minutes: {e}"))?;
            Input::Set { kind, minutes }
        }
        other => return Err(format!("unknown command: {other}")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }
    Ok(input)
}
