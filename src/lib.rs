//! Motion Lab: motion-to-recording decision engine
//!
//! Converts a sensitivity knob and a stream of timestamped motion/person
//! observations into START/STOP recording decisions for a capture
//! orchestrator. The engine owns no clocks and performs no I/O; all elapsed
//! time flows through the timestamps carried on the signals.

pub mod core;
pub mod types;

// =============================================================================
// THRESHOLD POLICY [C]
// =============================================================================

/// Start threshold at sensitivity 0 (hardest to trigger)
pub const START_THRESHOLD_MAX: f64 = 0.78;

/// Span covered by the sensitivity knob; sensitivity 100 lands at 0.08
pub const SENSITIVITY_SPAN: f64 = 0.70;

/// Hysteresis margin between start and stop thresholds
pub const HYSTERESIS_MARGIN: f64 = 0.05;

/// Absolute floor for the stop threshold
pub const STOP_THRESHOLD_FLOOR: f64 = 0.12;

// =============================================================================
// SESSION TIMING [C]
// =============================================================================

/// Minimum recorded clip length (milliseconds); stop is deferred below this
pub const DEFAULT_MIN_CLIP_MS: i64 = 2500;

/// Quiet period after a session ends during which new triggers are ignored
pub const DEFAULT_COOLDOWN_MS: i64 = 1500;

/// Tolerated loss of the trigger condition while PENDING (milliseconds)
pub const DEFAULT_PENDING_GRACE_MS: i64 = 1000;

// =============================================================================
// SETTINGS DEFAULTS
// =============================================================================

pub const DEFAULT_SENSITIVITY: i32 = 50;
pub const DEFAULT_ANALYSIS_FPS: i32 = 10;
pub const DEFAULT_DEBOUNCE_MS: i64 = 800;
pub const DEFAULT_POST_ROLL_MS: i64 = 3000;
pub const DEFAULT_PRE_ROLL_SECONDS: i32 = 3;
pub const DEFAULT_LOW_FPS_TARGET: i32 = 5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
