//! Per-frame observation from the vision pipeline

use serde::{Deserialize, Serialize};

/// One timestamped motion/person observation
///
/// Timestamps must be delivered non-decreasing to a given engine instance;
/// that ordering is a caller contract, not something the engine checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionSignal {
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: i64,
    /// Motion score, expected range [0,1], higher = more motion
    pub motion_score: f64,
    /// Whether the person detector fired on this frame
    #[serde(default)]
    pub person_detected: bool,
}

impl MotionSignal {
    pub fn new(timestamp_ms: i64, motion_score: f64, person_detected: bool) -> Self {
        Self {
            timestamp_ms,
            motion_score,
            person_detected,
        }
    }
}
