//! Reason codes for policy decisions and state changes

use serde::{Deserialize, Serialize};

/// Reason codes for all state changes and decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R001: Steady states
    // =========================================================================
    /// State is IDLE, no trigger
    R001_STATE_IDLE,
    /// State is PENDING, trigger sustained
    R001_STATE_PENDING,
    /// State is RECORDING, trigger sustained
    R001_STATE_RECORDING,
    /// State is POST_ROLL, window still open
    R001_STATE_POST_ROLL,

    // =========================================================================
    // R002: Timing guards
    // =========================================================================
    /// Trigger ignored, cooldown window still active
    R002_COOLDOWN_ACTIVE,
    /// Debounce accumulating toward recording start
    R002_DEBOUNCE_ACCUMULATING,
    /// Trigger momentarily lost, held by the pending grace window
    R002_GRACE_HOLD,
    /// Post-roll expired but stop deferred for minimum clip length
    R002_MIN_CLIP_EXTENDED,

    // =========================================================================
    // R003: Transitions
    // =========================================================================
    /// Transitioning from IDLE to PENDING (armed)
    R003_TRANSITION_TO_PENDING,
    /// Transitioning from PENDING to RECORDING (debounce met)
    R003_TRANSITION_TO_RECORDING,
    /// Transitioning from RECORDING to POST_ROLL (trigger lost)
    R003_TRANSITION_TO_POST_ROLL,
    /// Transitioning from POST_ROLL back to RECORDING (trigger resumed)
    R003_TRANSITION_RESUMED,
    /// Transitioning from PENDING to IDLE (grace exceeded, arm abandoned)
    R003_TRANSITION_ABANDONED,
    /// Transitioning from POST_ROLL to IDLE (session stopped, cooldown set)
    R003_TRANSITION_STOPPED,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R001_STATE_IDLE => "R001_STATE_IDLE",
            Self::R001_STATE_PENDING => "R001_STATE_PENDING",
            Self::R001_STATE_RECORDING => "R001_STATE_RECORDING",
            Self::R001_STATE_POST_ROLL => "R001_STATE_POST_ROLL",
            Self::R002_COOLDOWN_ACTIVE => "R002_COOLDOWN_ACTIVE",
            Self::R002_DEBOUNCE_ACCUMULATING => "R002_DEBOUNCE_ACCUMULATING",
            Self::R002_GRACE_HOLD => "R002_GRACE_HOLD",
            Self::R002_MIN_CLIP_EXTENDED => "R002_MIN_CLIP_EXTENDED",
            Self::R003_TRANSITION_TO_PENDING => "R003_TRANSITION_TO_PENDING",
            Self::R003_TRANSITION_TO_RECORDING => "R003_TRANSITION_TO_RECORDING",
            Self::R003_TRANSITION_TO_POST_ROLL => "R003_TRANSITION_TO_POST_ROLL",
            Self::R003_TRANSITION_RESUMED => "R003_TRANSITION_RESUMED",
            Self::R003_TRANSITION_ABANDONED => "R003_TRANSITION_ABANDONED",
            Self::R003_TRANSITION_STOPPED => "R003_TRANSITION_STOPPED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R001_STATE_IDLE => "Idle, waiting for trigger",
            Self::R001_STATE_PENDING => "Pending, trigger sustained",
            Self::R001_STATE_RECORDING => "Recording, trigger sustained",
            Self::R001_STATE_POST_ROLL => "Post-roll window open",
            Self::R002_COOLDOWN_ACTIVE => "Trigger suppressed by cooldown",
            Self::R002_DEBOUNCE_ACCUMULATING => "Debounce accumulating",
            Self::R002_GRACE_HOLD => "Trigger loss within grace window",
            Self::R002_MIN_CLIP_EXTENDED => "Stop deferred for minimum clip length",
            Self::R003_TRANSITION_TO_PENDING => "Armed, entering PENDING",
            Self::R003_TRANSITION_TO_RECORDING => "Debounce met, recording started",
            Self::R003_TRANSITION_TO_POST_ROLL => "Trigger lost, entering POST_ROLL",
            Self::R003_TRANSITION_RESUMED => "Trigger resumed, back to RECORDING",
            Self::R003_TRANSITION_ABANDONED => "Grace exceeded, arm abandoned",
            Self::R003_TRANSITION_STOPPED => "Session stopped, cooldown started",
        }
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
