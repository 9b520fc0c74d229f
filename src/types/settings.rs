//! Motion detection settings snapshot

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_ANALYSIS_FPS, DEFAULT_DEBOUNCE_MS, DEFAULT_LOW_FPS_TARGET, DEFAULT_POST_ROLL_MS,
    DEFAULT_PRE_ROLL_SECONDS, DEFAULT_SENSITIVITY,
};

/// What kind of observation is allowed to trigger a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerMode {
    /// Any sufficient motion triggers
    AnyMotion,
    /// Motion must be accompanied by a person detection
    PersonConfirmed,
}

impl TriggerMode {
    /// Stable string value for persistence and CLI flags
    pub fn value(&self) -> &'static str {
        match self {
            TriggerMode::AnyMotion => "any_motion",
            TriggerMode::PersonConfirmed => "person_confirmed",
        }
    }

    /// Parse a stored value, falling back to ANY_MOTION for unknown input
    pub fn from_value(value: &str) -> Self {
        match value {
            "person_confirmed" => TriggerMode::PersonConfirmed,
            _ => TriggerMode::AnyMotion,
        }
    }
}

impl std::str::FromStr for TriggerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any_motion" | "any-motion" | "any" => Ok(TriggerMode::AnyMotion),
            "person_confirmed" | "person-confirmed" | "person" => Ok(TriggerMode::PersonConfirmed),
            other => Err(format!(
                "unknown trigger mode '{}' (expected any_motion or person_confirmed)",
                other
            )),
        }
    }
}

impl std::fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Immutable configuration snapshot consumed by the policy and engine
///
/// Created by the settings store; read-only here. A new snapshot takes
/// effect with the next signal, never retroactively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionSettings {
    pub enabled: bool,
    pub trigger_mode: TriggerMode,
    /// Sensitivity knob 0..=100; out-of-range values are clamped by the policy
    pub sensitivity: i32,
    /// Frame analysis rate driving the signal stream
    pub analysis_fps: i32,
    /// Minimum sustained-trigger duration before recording starts
    pub debounce_ms: i64,
    /// How long recording continues after the trigger appears to end
    pub post_roll_ms: i64,
    /// Pre-roll buffer kept by the capture side; decision logic ignores it
    pub pre_roll_seconds: i32,
    /// Drop the analysis rate when idle
    pub low_fps_fallback_enabled: bool,
    pub low_fps_target: i32,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_mode: TriggerMode::AnyMotion,
            sensitivity: DEFAULT_SENSITIVITY,
            analysis_fps: DEFAULT_ANALYSIS_FPS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            post_roll_ms: DEFAULT_POST_ROLL_MS,
            pre_roll_seconds: DEFAULT_PRE_ROLL_SECONDS,
            low_fps_fallback_enabled: false,
            low_fps_target: DEFAULT_LOW_FPS_TARGET,
        }
    }
}

impl MotionSettings {
    /// Effective analysis rate given the low-FPS fallback, never below 1 fps
    pub fn effective_fps(&self) -> i32 {
        let fps = if self.low_fps_fallback_enabled {
            self.analysis_fps.min(self.low_fps_target)
        } else {
            self.analysis_fps
        };
        fps.max(1)
    }

    /// Inter-frame interval in milliseconds at the effective analysis rate
    pub fn frame_interval_ms(&self) -> i64 {
        1000 / self.effective_fps() as i64
    }
}
