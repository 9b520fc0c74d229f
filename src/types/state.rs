//! Session state definitions

use serde::{Deserialize, Serialize};

/// The four possible states of a recording-decision session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No activity, waiting for a trigger
    Idle,
    /// Trigger seen, accumulating debounce before recording starts
    Pending,
    /// Actively recording
    Recording,
    /// Trigger lost, holding the recording open through post-roll
    PostRoll,
}

impl SessionState {
    /// True while a recording session is open (RECORDING or POST_ROLL)
    pub fn is_capturing(&self) -> bool {
        matches!(self, SessionState::Recording | SessionState::PostRoll)
    }

    /// True when the easier (stop) threshold applies: already armed or active
    pub fn is_armed(&self) -> bool {
        !matches!(self, SessionState::Idle)
    }

    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            SessionState::Idle => "\x1b[90m",      // Gray
            SessionState::Pending => "\x1b[33m",   // Orange/Yellow
            SessionState::Recording => "\x1b[31m", // Red
            SessionState::PostRoll => "\x1b[36m",  // Cyan
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for state
    pub fn emoji(&self) -> &'static str {
        match self {
            SessionState::Idle => "💤",
            SessionState::Pending => "🔶",
            SessionState::Recording => "🔴",
            SessionState::PostRoll => "⏳",
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Idle => "IDLE",
            SessionState::Pending => "PENDING",
            SessionState::Recording => "RECORDING",
            SessionState::PostRoll => "POST_ROLL",
        };
        write!(f, "{}", name)
    }
}
