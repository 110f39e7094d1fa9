use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusMode {
    #[default]
    Focus,
    ShortBreak,
    LongBreak,
}

impl FocusMode {
    pub const ALL: [FocusMode; 3] = [FocusMode::Focus, FocusMode::ShortBreak, FocusMode::LongBreak];

    /// Human-readable label shown next to the countdown.
    pub fn label(self) -> &'static str {
        match self {
            FocusMode::Focus => "Focus",
            FocusMode::ShortBreak => "Short break",
            FocusMode::LongBreak => "Long break",
        }
    }

    pub fn is_break(self) -> bool {
        !matches!(self, FocusMode::Focus)
    }
}

impl fmt::Display for FocusMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FocusMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(FocusMode::Focus),
            "short" | "short_break" | "short-break" => Ok(FocusMode::ShortBreak),
            "long" | "long_break" | "long-break" => Ok(FocusMode::LongBreak),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected focus, short or long, got '{other}'"),
            }),
        }
    }
}

/// Durations (in minutes) of each mode and the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleConfig {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_cycles_before_long")]
    pub cycles_before_long: u32,
}

// Input bounds the host enforces before values reach the engine.
pub const FOCUS_MINUTES_RANGE: (u32, u32) = (5, 90);
pub const SHORT_BREAK_MINUTES_RANGE: (u32, u32) = (1, 30);
pub const LONG_BREAK_MINUTES_RANGE: (u32, u32) = (5, 60);
pub const CYCLES_BEFORE_LONG_RANGE: (u32, u32) = (1, 10);

fn default_focus_minutes() -> u32 {
    25
}
fn default_short_break_minutes() -> u32 {
    5
}
fn default_long_break_minutes() -> u32 {
    15
}
fn default_cycles_before_long() -> u32 {
    4
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            cycles_before_long: default_cycles_before_long(),
        }
    }
}

impl CycleConfig {
    pub fn minutes(&self, mode: FocusMode) -> u32 {
        match mode {
            FocusMode::Focus => self.focus_minutes,
            FocusMode::ShortBreak => self.short_break_minutes,
            FocusMode::LongBreak => self.long_break_minutes,
        }
    }

    /// Full duration of `mode` in seconds.
    pub fn duration_secs(&self, mode: FocusMode) -> u64 {
        u64::from(self.minutes(mode)).saturating_mul(60)
    }

    /// Long-break cadence, never below 1.
    pub fn cycles_before_long(&self) -> u32 {
        self.cycles_before_long.max(1)
    }

    /// Clamp every field into the bounds of the host's numeric inputs.
    pub fn clamped(self) -> Self {
        let clamp = |v: u32, (lo, hi): (u32, u32)| v.clamp(lo, hi);
        Self {
            focus_minutes: clamp(self.focus_minutes, FOCUS_MINUTES_RANGE),
            short_break_minutes: clamp(self.short_break_minutes, SHORT_BREAK_MINUTES_RANGE),
            long_break_minutes: clamp(self.long_break_minutes, LONG_BREAK_MINUTES_RANGE),
            cycles_before_long: clamp(self.cycles_before_long, CYCLES_BEFORE_LONG_RANGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_durations() {
        let c = CycleConfig::default();
        assert_eq!(c.duration_secs(FocusMode::Focus), 25 * 60);
        assert_eq!(c.duration_secs(FocusMode::ShortBreak), 5 * 60);
        assert_eq!(c.duration_secs(FocusMode::LongBreak), 15 * 60);
        assert_eq!(c.cycles_before_long(), 4);
    }

    #[test]
    fn zero_cycles_is_treated_as_one() {
        let c = CycleConfig {
            cycles_before_long: 0,
            ..CycleConfig::default()
        };
        assert_eq!(c.cycles_before_long(), 1);
    }

    #[test]
    fn clamped_respects_input_bounds() {
        let c = CycleConfig {
            focus_minutes: 0,
            short_break_minutes: 99,
            long_break_minutes: 1,
            cycles_before_long: 40,
        }
        .clamped();
        assert_eq!(c.focus_minutes, 5);
        assert_eq!(c.short_break_minutes, 30);
        assert_eq!(c.long_break_minutes, 5);
        assert_eq!(c.cycles_before_long, 10);
    }

    #[test]
    fn mode_parses_short_names() {
        assert_eq!("Focus".parse::<FocusMode>().unwrap(), FocusMode::Focus);
        assert_eq!("short".parse::<FocusMode>().unwrap(), FocusMode::ShortBreak);
        assert_eq!("long-break".parse::<FocusMode>().unwrap(), FocusMode::LongBreak);
        assert!("nap".parse::<FocusMode>().is_err());
    }

    #[test]
    fn mode_labels() {
        assert_eq!(FocusMode::ShortBreak.to_string(), "Short break");
        assert!(FocusMode::LongBreak.is_break());
        assert!(!FocusMode::Focus.is_break());
    }
}
