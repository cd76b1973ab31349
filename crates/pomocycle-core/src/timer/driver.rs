//! Tick sources.
//!
//! A tick source is the only time-triggered activity in the system. At most
//! one is live at a time: starting an active source is a no-op, stopping an
//! inactive one is harmless.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Production tick interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

pub trait TickSource {
    /// Begin ticking. Returns `false` without doing anything if already active.
    fn start_ticking(&mut self) -> bool;
    /// Cancel ticking. Safe to call when inactive.
    fn stop_ticking(&mut self);
    fn is_active(&self) -> bool;
}

/// One tick, tagged with the start that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// Tokio-backed tick source.
///
/// Spawns one task per start that sends a [`Tick`] every `interval` on the
/// channel given at construction. The receiver side runs the session loop
/// and must check [`IntervalTicker::accepts`] before handling a tick, which
/// drops ticks queued by an earlier start.
///
/// `start_ticking` must be called from within a tokio runtime.
#[derive(Debug)]
pub struct IntervalTicker {
    interval: Duration,
    tx: mpsc::UnboundedSender<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalTicker {
    /// A zero `interval` is raised to one millisecond.
    pub fn new(interval: Duration, tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            tx,
            handle: None,
            generation: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` came from the currently active start.
    pub fn accepts(&self, tick: &Tick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }
}

impl TickSource for IntervalTicker {
    fn start_ticking(&mut self) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.generation += 1;
        let generation = self.generation;
        let period = self.interval;
        let tx = self.tx.clone();

        self.handle = Some(tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(generation, interval_ms = period.as_millis() as u64, "ticker started");
        true
    }

    fn stop_ticking(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::trace!(generation = self.generation, "ticker stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.stop_ticking();
    }
}

/// Tick source driven by the host.
///
/// It only tracks whether ticking was requested; the host is responsible for
/// calling `PomodoroTimer::on_tick` at its own pace while it is active.
#[derive(Debug, Default, Clone)]
pub struct ManualTicker {
    active: bool,
    starts: u32,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times ticking actually started.
    pub fn starts(&self) -> u32 {
        self.starts
    }
}

impl TickSource for ManualTicker {
    fn start_ticking(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.starts += 1;
        true
    }

    fn stop_ticking(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
