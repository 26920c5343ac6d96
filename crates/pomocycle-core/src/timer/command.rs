use super::settings::Settings;

/// Discrete input accepted by [`SessionScheduler::handle`](super::SessionScheduler::handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Stop,
    Reset,
    SkipBreak,
    /// Start, pause or resume, whichever the current state allows.
    Toggle,
    ApplySettings(Settings),
}
