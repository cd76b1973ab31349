mod controller;
pub mod driver;
mod engine;
mod schedule;

pub use controller::{Command, PomodoroTimer};
pub use driver::{IntervalTicker, ManualTicker, Tick, TickSource, DEFAULT_TICK_INTERVAL};
pub use engine::{SessionEngine, TickOutcome};
pub use schedule::{DurationPreset, Mode, TOTAL_CYCLES};
