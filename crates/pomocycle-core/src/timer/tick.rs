//! Periodic tick sources.
//!
//! A [`TickSource`] hands out one periodic task per activation. The task lives
//! as long as the returned [`TickHandle`]; dropping the handle cancels it.
//! Every tick carries the [`TickId`] it was activated with so a host can tell
//! a stale delivery (queued before cancellation) from a live one.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Identifies one activation of a tick source.
pub type TickId = u64;

/// Ownership token for a live periodic task. Cancels the task on drop.
pub struct TickHandle {
    id: TickId,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TickHandle {
    pub fn new(id: TickId, cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            id,
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn id(&self) -> TickId {
        self.id
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickHandle").field("id", &self.id).finish()
    }
}

pub trait TickSource {
    /// Start delivering ticks tagged with `id`, one per period, until the
    /// returned handle is dropped.
    fn activate(&mut self, id: TickId) -> TickHandle;
}

// ── Manual ───────────────────────────────────────────────────────────

/// Tick source for hosts that call `tick()` themselves.
///
/// Nothing is scheduled; the source only tracks how many handles are alive,
/// which the [`TickProbe`] exposes.
#[derive(Debug, Default)]
pub struct ManualTickSource {
    probe: TickProbe,
}

impl ManualTickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> TickProbe {
        self.probe.clone()
    }
}

impl TickSource for ManualTickSource {
    fn activate(&mut self, id: TickId) -> TickHandle {
        let inner = Arc::clone(&self.probe.inner);
        inner.active.fetch_add(1, Ordering::SeqCst);
        inner.activations.fetch_add(1, Ordering::SeqCst);
        inner.last_id.store(id, Ordering::SeqCst);
        TickHandle::new(id, move || {
            inner.active.fetch_sub(1, Ordering::SeqCst);
        })
    }
}

/// Shared view of a [`ManualTickSource`]'s bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct TickProbe {
    inner: Arc<ProbeCounters>,
}

#[derive(Debug, Default)]
struct ProbeCounters {
    active: AtomicUsize,
    activations: AtomicUsize,
    last_id: AtomicU64,
}

impl TickProbe {
    /// Number of handles currently alive.
    pub fn active(&self) -> usize {
        self.inner.active.load(Ordering::SeqCst)
    }

    /// Total number of activations so far.
    pub fn activations(&self) -> usize {
        self.inner.activations.load(Ordering::SeqCst)
    }

    /// Id passed to the most recent activation.
    pub fn last_id(&self) -> TickId {
        self.inner.last_id.load(Ordering::SeqCst)
    }
}

// ── Tokio interval ───────────────────────────────────────────────────

/// Tick source backed by a spawned tokio interval task.
///
/// Ticks are sent as ids over an unbounded channel; the receiving end belongs
/// to the host loop. Must be activated from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalTickSource {
    period: Duration,
    tx: mpsc::UnboundedSender<TickId>,
}

impl IntervalTickSource {
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<TickId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { period, tx }, rx)
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickSource for IntervalTickSource {
    fn activate(&mut self, id: TickId) -> TickHandle {
        let tx = self.tx.clone();
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(id).is_err() {
                    break;
                }
            }
        });
        TickHandle::new(id, move || task.abort())
    }
}
