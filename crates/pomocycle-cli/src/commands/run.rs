//! Interactive timer host.
//!
//! Runs the session scheduler on a current-thread tokio runtime. A single
//! `select!` loop owns the scheduler and reacts to two sources: command lines
//! read from stdin and tick ids from the interval tick source.

use std::path::Path;
use std::time::Duration;

use clap::Args;
use pomocycle_core::{
    Config, DesktopNotifier, Event, IntervalTickSource, LogNotifier, Muted, Notifier,
    SessionScheduler, TimerState,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::input::{self, Input};
use crate::render::Renderer;

#[derive(Args)]
pub struct RunArgs {
    /// Print snapshots and events as JSON lines
    #[arg(long)]
    json: bool,
    /// Start the first session immediately
    #[arg(long)]
    autostart: bool,
    /// Tick period in milliseconds
    #[arg(long, default_value_t = 1000, hide = true)]
    tick_ms: u64,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(host(args))
}

fn notifier_for(config: &Config) -> Box<dyn Notifier> {
    if !config.notifications.enabled {
        Box::new(Muted)
    } else if config.notifications.desktop {
        Box::new(DesktopNotifier::new())
    } else {
        Box::new(LogNotifier)
    }
}

async fn host(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = Config::path()?;
    let mut config = Config::load_from(&config_path)?;

    let period = Duration::from_millis(args.tick_ms.max(1));
    let (ticks, mut tick_rx) = IntervalTickSource::new(period);
    let mut scheduler = SessionScheduler::new(config.settings(), ticks, notifier_for(&config));
    let mut renderer = Renderer::new(std::io::stdout(), args.json);
    tracing::debug!(?period, "timer host started");

    if args.autostart {
        if let Some(event) = scheduler.start() {
            renderer.event(&event)?;
        }
    }
    renderer.snapshot(&scheduler.snapshot())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    // No more commands; let a running countdown finish.
                    input_open = false;
                    tracing::debug!("input closed");
                    if scheduler.state() != TimerState::Running {
                        break;
                    }
                    continue;
                };
                let input = match input::parse(&line) {
                    Ok(Input::Quit) => break,
                    Ok(input) => input,
                    Err(e) => {
                        eprintln!("error: {e}");
                        continue;
                    }
                };
                if let Some(event) = apply(input, &mut scheduler, &mut config, &config_path) {
                    renderer.event(&event)?;
                }
                renderer.snapshot(&scheduler.snapshot())?;
            }
            Some(id) = tick_rx.recv() => {
                let live = scheduler.active_tick() == Some(id);
                if let Some(event) = scheduler.on_tick(id) {
                    renderer.event(&event)?;
                }
                if live {
                    renderer.snapshot(&scheduler.snapshot())?;
                }
                if !input_open && scheduler.state() != TimerState::Running {
                    break;
                }
            }
        }
    }

    scheduler.dispose();
    Ok(())
}

fn apply(
    input: Input,
    scheduler: &mut SessionScheduler,
    config: &mut Config,
    config_path: &Path,
) -> Option<Event> {
    match input {
        Input::Timer(command) => scheduler.handle(command),
        Input::Shortcut(shortcut) => shortcut
            .command(scheduler.state())
            .and_then(|command| scheduler.handle(command)),
        Input::Set { kind, minutes } => {
            let saved = config
                .set_minutes(kind, minutes)
                .and_then(|()| config.save_to(config_path));
            match saved {
                Ok(()) => scheduler.apply_settings(config.settings()),
                Err(e) => {
                    eprintln!("error: {e}");
                    None
                }
            }
        }
        Input::Status | Input::Quit => None,
    }
}
