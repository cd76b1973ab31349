use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{DurationPreset, Mode};

/// Every state change of the session produces an Event.
/// Front ends render from the engine; events are for logging and JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    PresetSelected {
        preset: DurationPreset,
        period_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: Mode,
        cycle_index: u32,
        remaining_secs: u64,
        /// True when continuing a paused period rather than starting a fresh one.
        resumed: bool,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        preset: DurationPreset,
        at: DateTime<Utc>,
    },
    PeriodElapsed {
        from: Mode,
        to: Mode,
        /// Cycle index after the transition.
        cycle_index: u32,
        /// Set when a long break ended and the cycle count wrapped to 1.
        session_completed: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        preset: DurationPreset,
        cycle_index: u32,
        total_cycles: u32,
        remaining_secs: u64,
        period_secs: u64,
        running: bool,
        at: DateTime<Utc>,
    },
}
