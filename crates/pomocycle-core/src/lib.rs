//! # pomocycle Core Library
//!
//! This library provides the core logic for the pomocycle Pomodoro timer.
//! Hosts (the `pomocycle` CLI, tests) drive a [`SessionScheduler`] with
//! commands and ticks and render the [`Snapshot`]s it produces.
//!
//! ## Architecture
//!
//! - **Session Scheduler**: a tick-driven state machine over idle/running/paused
//!   that alternates work sessions with short and long breaks
//! - **Tick Sources**: one cancellable periodic task per running countdown
//! - **Notifiers**: best-effort completion messages
//! - **Storage**: TOML configuration and SQLite-backed notes
//!
//! ## Key Components
//!
//! - [`SessionScheduler`]: Core timer state machine
//! - [`IntervalTickSource`]: tokio-driven 1-second ticks
//! - [`Config`]: Application configuration management
//! - [`Database`]: Notes persistence

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::{Event, Snapshot};
pub use notify::{DesktopNotifier, LogNotifier, Muted, Notifier, NotifyError};
pub use storage::{Config, Database, Note};
pub use timer::{
    Command, IntervalTickSource, ManualTickSource, SessionScheduler, SessionType, Settings,
    TickId, TickSource, TimerState,
};
