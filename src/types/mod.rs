//! Core types for Motion Lab

mod action;
mod output;
mod reason;
mod settings;
mod signal;
mod state;

pub use action::TransitionAction;
pub use output::SignalOutput;
pub use reason::ReasonCode;
pub use settings::{MotionSettings, TriggerMode};
pub use signal::MotionSignal;
pub use state::SessionState;
