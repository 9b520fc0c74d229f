//! Advisory actions emitted toward the recording orchestrator

use serde::{Deserialize, Serialize};

/// What the orchestrator should do after a signal is processed
///
/// Advisory only: the engine never touches capture, torch, or storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitionAction {
    None,
    StartRecording,
    StopRecording,
}

impl TransitionAction {
    pub fn is_none(&self) -> bool {
        matches!(self, TransitionAction::None)
    }
}

impl std::fmt::Display for TransitionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransitionAction::None => "NONE",
            TransitionAction::StartRecording => "START_RECORDING",
            TransitionAction::StopRecording => "STOP_RECORDING",
        };
        write!(f, "{}", name)
    }
}
