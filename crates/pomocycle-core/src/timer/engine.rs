//! Session state machine.
//!
//! The engine owns mode, cycle counter, preset and remaining time and computes
//! every transition. It never schedules anything itself: the tick source calls
//! `tick()` once per interval and the controller calls `on_period_elapsed()`
//! when the countdown hits zero.
//!
//! ## Period Order
//!
//! ```text
//! Work(1) -> ShortBreak -> Work(2) -> ShortBreak -> Work(3) -> ShortBreak
//!         -> Work(4) -> LongBreak -> Work(1) ...
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = SessionEngine::default();
//! engine.start();
//! // Once per interval:
//! if engine.tick() == TickOutcome::Elapsed {
//!     engine.on_period_elapsed();
//! }
//! ```

use chrono::Utc;

use super::schedule::{DurationPreset, Mode, TOTAL_CYCLES};
use crate::events::Event;

/// Result of a single decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Idle,
    Counting { remaining_secs: u64 },
    /// Remaining time reached zero on this tick.
    Elapsed,
}

/// The single mutable aggregate of a Pomodoro session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEngine {
    mode: Mode,
    preset: DurationPreset,
    cycle_index: u32,
    previous_mode: Mode,
    remaining_secs: u64,
    period_secs: u64,
    running: bool,
}

impl SessionEngine {
    /// Create an idle engine at the start of cycle 1 with a full work period.
    pub fn new(preset: DurationPreset) -> Self {
        let period_secs = Mode::Work.duration_secs(preset);
        Self {
            mode: Mode::Work,
            preset,
            cycle_index: 1,
            previous_mode: Mode::Work,
            remaining_secs: period_secs,
            period_secs,
            running: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn preset(&self) -> DurationPreset {
        self.preset
    }

    pub fn cycle_index(&self) -> u32 {
        self.cycle_index
    }

    pub fn total_cycles(&self) -> u32 {
        TOTAL_CYCLES
    }

    pub fn previous_mode(&self) -> Mode {
        self.previous_mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn period_secs(&self) -> u64 {
        self.period_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// A started-then-paused period shows "Resume" instead of "Start".
    pub fn is_resumable(&self) -> bool {
        self.remaining_secs != self.period_secs
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            preset: self.preset,
            cycle_index: self.cycle_index,
            total_cycles: TOTAL_CYCLES,
            remaining_secs: self.remaining_secs,
            period_secs: self.period_secs,
            running: self.running,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch the duration table and restart the session at cycle 1.
    /// Ignored while running.
    pub fn select_preset(&mut self, preset: DurationPreset) -> Option<Event> {
        if self.running {
            return None;
        }
        self.preset = preset;
        self.rewind();
        Some(Event::PresetSelected {
            preset,
            period_secs: self.period_secs,
            at: Utc::now(),
        })
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(Event::TimerStarted {
            mode: self.mode,
            cycle_index: self.cycle_index,
            remaining_secs: self.remaining_secs,
            resumed: self.is_resumable(),
            at: Utc::now(),
        })
    }

    /// Stop counting, keeping the remaining time.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Back to an idle first work period under the current preset.
    pub fn reset(&mut self) -> Event {
        self.running = false;
        self.rewind();
        Event::TimerReset {
            preset: self.preset,
            at: Utc::now(),
        }
    }

    /// Count down one second. Never goes below zero.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            TickOutcome::Elapsed
        } else {
            TickOutcome::Counting {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    /// Move to the next period. Called once the countdown reached zero and
    /// the tick source has been stopped; `running` is left untouched so the
    /// next period continues automatically.
    pub fn on_period_elapsed(&mut self) -> Event {
        self.previous_mode = self.mode;
        let from = self.mode;

        match self.mode {
            Mode::Work => {
                self.mode = if self.cycle_index == TOTAL_CYCLES {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
            }
            Mode::ShortBreak | Mode::LongBreak => {
                self.mode = Mode::Work;
                if self.previous_mode == Mode::LongBreak {
                    self.cycle_index = 1;
                } else {
                    self.cycle_index = (self.cycle_index + 1).min(TOTAL_CYCLES);
                }
            }
        }

        self.period_secs = self.mode.duration_secs(self.preset);
        self.remaining_secs = self.period_secs;

        Event::PeriodElapsed {
            from,
            to: self.mode,
            cycle_index: self.cycle_index,
            session_completed: from == Mode::LongBreak,
            at: Utc::now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn rewind(&mut self) {
        self.mode = Mode::Work;
        self.previous_mode = Mode::Work;
        self.cycle_index = 1;
        self.period_secs = Mode::Work.duration_secs(self.preset);
        self.remaining_secs = self.period_secs;
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(DurationPreset::Fast)
    }
}
