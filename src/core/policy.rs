//! Threshold policy: sensitivity → dual thresholds → trigger decision
//!
//! Pure and stateless. Two thresholds implement hysteresis: a harder start
//! threshold while IDLE, an easier stop threshold once armed or active, so
//! the session does not flap around a single cutoff.

use crate::types::{MotionSettings, MotionSignal, SessionState, TriggerMode};
use crate::{HYSTERESIS_MARGIN, SENSITIVITY_SPAN, START_THRESHOLD_MAX, STOP_THRESHOLD_FLOOR};

/// Stateless trigger policy
///
/// Safe for unrestricted concurrent use across any number of engines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionPolicy;

impl MotionPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Score required to arm from IDLE
    ///
    /// Sensitivity is clamped to 0..=100. Higher sensitivity lowers the
    /// threshold: 0 → 0.78, 100 → 0.08.
    pub fn start_threshold(&self, sensitivity: i32) -> f64 {
        let clamped = sensitivity.clamp(0, 100);
        START_THRESHOLD_MAX - (clamped as f64 / 100.0) * SENSITIVITY_SPAN
    }

    /// Score required to keep an armed/active session triggered
    ///
    /// Sits one hysteresis margin below the start threshold, never below
    /// the absolute floor.
    pub fn stop_threshold(&self, sensitivity: i32) -> f64 {
        (self.start_threshold(sensitivity) - HYSTERESIS_MARGIN).max(STOP_THRESHOLD_FLOOR)
    }

    /// Does this signal satisfy the trigger condition in the given state?
    ///
    /// Non-finite scores (NaN, infinities) are treated as below threshold
    /// rather than left to raw float comparison semantics.
    pub fn is_trigger_satisfied(
        &self,
        settings: &MotionSettings,
        signal: &MotionSignal,
        state: SessionState,
    ) -> bool {
        let required = if state.is_armed() {
            self.stop_threshold(settings.sensitivity)
        } else {
            self.start_threshold(settings.sensitivity)
        };

        if !signal.motion_score.is_finite() || signal.motion_score < required {
            return false;
        }

        match settings.trigger_mode {
            TriggerMode::AnyMotion => true,
            TriggerMode::PersonConfirmed => signal.person_detected,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
