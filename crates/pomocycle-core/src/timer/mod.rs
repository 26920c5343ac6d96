mod command;
mod scheduler;
mod session;
mod settings;
mod tick;

pub use command::Command;
pub use scheduler::{
    SessionScheduler, BREAK_COMPLETED_MESSAGE, CYCLE_LENGTH, WORK_COMPLETED_MESSAGE,
};
pub use session::{SessionType, TimerState};
pub use settings::{
    Settings, DEFAULT_LONG_BREAK_MIN, DEFAULT_SHORT_BREAK_MIN, DEFAULT_WORK_MIN,
};
pub use tick::{
    IntervalTickSource, ManualTickSource, TickHandle, TickId, TickProbe, TickSource,
};
