use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Number of work periods in one session; the last one is followed by a long break.
pub const TOTAL_CYCLES: u32 = 4;

/// Duration table selection. Only changeable while the timer is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationPreset {
    #[default]
    Fast,
    Medium,
}

impl DurationPreset {
    pub const ALL: [DurationPreset; 2] = [DurationPreset::Fast, DurationPreset::Medium];

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationPreset::Fast => "fast",
            DurationPreset::Medium => "medium",
        }
    }
}

impl fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationPreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" | "f" => Ok(DurationPreset::Fast),
            "medium" | "m" => Ok(DurationPreset::Medium),
            _ => Err(ValidationError::UnknownPreset(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Period length in minutes for this mode under `preset`.
    pub fn duration_min(&self, preset: DurationPreset) -> u64 {
        match (self, preset) {
            (Mode::Work, DurationPreset::Fast) => 25,
            (Mode::Work, DurationPreset::Medium) => 45,
            (Mode::ShortBreak, DurationPreset::Fast) => 5,
            (Mode::ShortBreak, DurationPreset::Medium) => 15,
            (Mode::LongBreak, DurationPreset::Fast) => 15,
            (Mode::LongBreak, DurationPreset::Medium) => 60,
        }
    }

    /// Period length in seconds for this mode under `preset`.
    pub fn duration_secs(&self, preset: DurationPreset) -> u64 {
        self.duration_min(preset).saturating_mul(60)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Work => "work",
            Mode::ShortBreak => "short_break",
            Mode::LongBreak => "long_break",
        })
    }
}
