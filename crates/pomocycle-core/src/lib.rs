//! # Pomocycle Core Library
//!
//! Core logic for the Pomocycle Pomodoro timer: four work periods separated
//! by short breaks, then a long break, on one of two duration presets.
//! Front ends (the `pomocycle` CLI, or anything else implementing [`View`])
//! stay thin and only render what the core tells them.
//!
//! ## Architecture
//!
//! - **Session Engine**: a pure state machine over mode, cycle, preset and
//!   remaining seconds. It never schedules anything itself.
//! - **Tick Driver**: at most one live tick source, either a tokio interval
//!   task ([`IntervalTicker`]) or host-driven ([`ManualTicker`])
//! - **Controller**: [`PomodoroTimer`] applies commands and ticks to the
//!   engine and renders through the [`View`] trait
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SessionEngine`]: Core cycle state machine
//! - [`PomodoroTimer`]: Command/tick/view protocol
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;
pub mod view;

pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    Command, DurationPreset, IntervalTicker, ManualTicker, Mode, PomodoroTimer, SessionEngine,
    Tick, TickOutcome, TickSource, TOTAL_CYCLES,
};
pub use view::View;
