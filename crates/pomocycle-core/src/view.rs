//! Presentation contract.
//!
//! The core writes to a [`View`] and never reads from it. The helpers here
//! produce the exact texts a front end shows so every front end agrees.

use crate::timer::{DurationPreset, Mode};

/// Page title shown after a reset, before any period has elapsed.
pub const NEUTRAL_TITLE: &str = "Pomocycle";

/// Receiver of render calls. All calls are one-way notifications.
pub trait View {
    fn render_time(&mut self, remaining_secs: u64);
    fn render_progress(&mut self, cycle_index: u32, total_cycles: u32);
    fn render_mode(&mut self, mode: Mode, preset: DurationPreset);
    fn render_buttons(&mut self, running: bool, is_resumable: bool);
    fn notify(&mut self, message: &str);
    fn set_page_title(&mut self, text: &str);
}

/// `M:SS`, minutes unpadded.
pub fn format_time(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// "Cycle 2 of 4"
pub fn progress_text(cycle_index: u32, total_cycles: u32) -> String {
    format!("Cycle {cycle_index} of {total_cycles}")
}

/// One flag per indicator slot; the first `cycle_index` are complete.
pub fn progress_slots(cycle_index: u32, total_cycles: u32) -> Vec<bool> {
    (0..total_cycles).map(|i| i < cycle_index).collect()
}

pub fn mode_label(mode: Mode, preset: DurationPreset) -> String {
    match mode {
        Mode::Work => "Work Session".to_string(),
        Mode::ShortBreak => format!("Short Break ({} min)", mode.duration_min(preset)),
        Mode::LongBreak => format!("Long Break ({} min)", mode.duration_min(preset)),
    }
}

pub fn page_title(mode: Mode) -> &'static str {
    match mode {
        Mode::Work => "Time to work!",
        Mode::ShortBreak => "Time for a short break!",
        Mode::LongBreak => "Time for a long break!",
    }
}

/// Message shown when a period ends and `to` begins.
pub fn transition_message(from: Mode, to: Mode, cycle_index: u32, total_cycles: u32) -> String {
    match (from, to) {
        (Mode::LongBreak, _) => {
            format!("Congratulations! You completed a full session of {total_cycles} cycles!")
        }
        (_, Mode::LongBreak) => {
            format!("All {total_cycles} cycles complete! Time for a long break.")
        }
        (_, Mode::ShortBreak) => {
            format!("Cycle {cycle_index} complete! Time for a short break.")
        }
        _ => format!("Break over! Starting cycle {cycle_index} of {total_cycles}."),
    }
}

/// Enabled/label state of the control buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    pub start_label: &'static str,
    pub start_enabled: bool,
    pub pause_enabled: bool,
    pub reset_enabled: bool,
    pub presets_enabled: bool,
}

impl ButtonStates {
    pub fn new(running: bool, is_resumable: bool) -> Self {
        if running {
            Self {
                start_label: "Start",
                start_enabled: false,
                pause_enabled: true,
                reset_enabled: false,
                presets_enabled: false,
            }
        } else {
            Self {
                start_label: if is_resumable { "Resume" } else { "Start" },
                start_enabled: true,
                pause_enabled: false,
                reset_enabled: true,
                presets_enabled: true,
            }
        }
    }
}
