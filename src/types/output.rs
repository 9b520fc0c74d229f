//! Output structures for terminal display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ReasonCode, SessionState, TransitionAction};

/// Output structure for each processed signal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalOutput {
    /// Wall-clock timestamp of processing
    pub timestamp: DateTime<Utc>,
    /// Signal timestamp (engine time, milliseconds)
    pub signal_ts_ms: i64,
    /// Motion score of the signal
    pub score: f64,
    /// Whether the policy trigger condition was satisfied
    pub triggered: bool,
    /// Session state after processing
    pub state: SessionState,
    /// Advisory action for the orchestrator
    pub action: TransitionAction,
    /// Reason for the decision
    pub reason: ReasonCode,
}

impl SignalOutput {
    /// Create new output
    pub fn new(
        signal_ts_ms: i64,
        score: f64,
        triggered: bool,
        state: SessionState,
        action: TransitionAction,
        reason: ReasonCode,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            signal_ts_ms,
            score,
            triggered,
            state,
            action,
            reason,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = SessionState::color_reset();
        let emoji = self.state.emoji();

        format!(
            "{}{} t={}ms score={:.3} | state={} | action={} | {}{}",
            color,
            emoji,
            self.signal_ts_ms,
            self.score,
            self.state,
            self.action,
            self.reason.code(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "t={}ms score={:.3} | state={} | action={} | reason={}",
            self.signal_ts_ms,
            self.score,
            self.state,
            self.action,
            self.reason.code()
        )
    }
}
