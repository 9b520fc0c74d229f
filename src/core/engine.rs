//! Motion session engine: timed, hysteretic four-state machine
//!
//! State transitions:
//! - IDLE → PENDING: trigger satisfied (unless cooldown active)
//! - PENDING → RECORDING: trigger sustained through debounce → START_RECORDING
//! - PENDING → IDLE: trigger lost beyond the grace window
//! - RECORDING → POST_ROLL: trigger lost
//! - POST_ROLL → RECORDING: trigger resumed
//! - POST_ROLL → IDLE: post-roll expired and minimum clip satisfied → STOP_RECORDING
//!
//! The engine owns no clocks; elapsed time flows exclusively through the
//! timestamps on the signals, so a synthetic clock drives it in tests.
//! Single-writer contract: one logical task per instance, timestamps
//! non-decreasing.

use crate::core::MotionPolicy;
use crate::types::{
    MotionSettings, MotionSignal, ReasonCode, SessionState, SignalOutput, TransitionAction,
};
use crate::{DEFAULT_COOLDOWN_MS, DEFAULT_MIN_CLIP_MS, DEFAULT_PENDING_GRACE_MS};

/// Timing guards not exposed on the settings surface, overridable for tests
#[derive(Debug, Clone, Copy)]
pub struct EngineTuning {
    /// Floor on recorded session duration; stop is deferred below this
    pub min_clip_ms: i64,
    /// Quiet period after STOP_RECORDING during which triggers are ignored
    pub cooldown_ms: i64,
    /// Tolerated trigger loss while PENDING before the arm is abandoned
    pub pending_grace_ms: i64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            min_clip_ms: DEFAULT_MIN_CLIP_MS,
            cooldown_ms: DEFAULT_COOLDOWN_MS,
            pending_grace_ms: DEFAULT_PENDING_GRACE_MS,
        }
    }
}

/// Recording-decision state machine engine
///
/// One mutable instance per recording-decision session.
#[derive(Debug)]
pub struct MotionEngine {
    policy: MotionPolicy,
    tuning: EngineTuning,
    /// Current state
    state: SessionState,
    /// When the current PENDING arm began
    pending_since_ms: Option<i64>,
    /// Last signal timestamp that satisfied the trigger while PENDING
    pending_last_triggered_at_ms: Option<i64>,
    /// When the open POST_ROLL window ends
    post_roll_until_ms: Option<i64>,
    /// When the current recording started (RECORDING through POST_ROLL)
    recording_started_at_ms: Option<i64>,
    /// Until when new arms are suppressed; survives reset_to_idle
    cooldown_until_ms: Option<i64>,
    /// Timestamp and score of the last processed signal
    last_signal_ts_ms: Option<i64>,
    last_score: f64,
    /// Number of processed signals
    signal_count: u64,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionEngine {
    /// Create new engine with default tuning
    pub fn new() -> Self {
        Self::with_tuning(EngineTuning::default())
    }

    /// Create new engine with explicit timing guards
    pub fn with_tuning(tuning: EngineTuning) -> Self {
        Self {
            policy: MotionPolicy::new(),
            tuning,
            state: SessionState::Idle,
            pending_since_ms: None,
            pending_last_triggered_at_ms: None,
            post_roll_until_ms: None,
            recording_started_at_ms: None,
            cooldown_until_ms: None,
            last_signal_ts_ms: None,
            last_score: 0.0,
            signal_count: 0,
        }
    }

    /// Process one signal, return the updated state plus advisory action
    pub fn on_signal(&mut self, settings: &MotionSettings, signal: &MotionSignal) -> SignalOutput {
        let ts = signal.timestamp_ms;
        let triggered = self.policy.is_trigger_satisfied(settings, signal, self.state);

        self.last_signal_ts_ms = Some(ts);
        self.last_score = signal.motion_score;
        self.signal_count += 1;

        let (action, reason) = match self.state {
            SessionState::Idle => {
                if self.cooldown_until_ms.map_or(false, |until| ts < until) {
                    (TransitionAction::None, ReasonCode::R002_COOLDOWN_ACTIVE)
                } else if triggered {
                    self.state = SessionState::Pending;
                    self.pending_since_ms = Some(ts);
                    self.pending_last_triggered_at_ms = Some(ts);
                    (TransitionAction::None, ReasonCode::R003_TRANSITION_TO_PENDING)
                } else {
                    (TransitionAction::None, ReasonCode::R001_STATE_IDLE)
                }
            }

            SessionState::Pending => {
                if triggered {
                    self.pending_last_triggered_at_ms = Some(ts);
                    let debounce_met = self
                        .pending_since_ms
                        .map_or(false, |since| ts - since >= settings.debounce_ms);
                    if debounce_met {
                        self.state = SessionState::Recording;
                        self.recording_started_at_ms = Some(ts);
                        (
                            TransitionAction::StartRecording,
                            ReasonCode::R003_TRANSITION_TO_RECORDING,
                        )
                    } else {
                        (
                            TransitionAction::None,
                            ReasonCode::R002_DEBOUNCE_ACCUMULATING,
                        )
                    }
                } else if self
                    .pending_last_triggered_at_ms
                    .map_or(false, |last| ts - last <= self.tuning.pending_grace_ms)
                {
                    // Brief signal loss tolerated, no timer reset
                    (TransitionAction::None, ReasonCode::R002_GRACE_HOLD)
                } else {
                    self.reset_to_idle();
                    (TransitionAction::None, ReasonCode::R003_TRANSITION_ABANDONED)
                }
            }

            SessionState::Recording => {
                if triggered {
                    (TransitionAction::None, ReasonCode::R001_STATE_RECORDING)
                } else {
                    self.state = SessionState::PostRoll;
                    self.post_roll_until_ms = Some(ts + settings.post_roll_ms);
                    (
                        TransitionAction::None,
                        ReasonCode::R003_TRANSITION_TO_POST_ROLL,
                    )
                }
            }

            SessionState::PostRoll => {
                if triggered {
                    self.state = SessionState::Recording;
                    self.post_roll_until_ms = None;
                    (TransitionAction::None, ReasonCode::R003_TRANSITION_RESUMED)
                } else if self.post_roll_until_ms.map_or(false, |until| ts >= until) {
                    let min_clip_pending = self
                        .recording_started_at_ms
                        .map_or(false, |started| ts - started < self.tuning.min_clip_ms);
                    if min_clip_pending {
                        // Too short to stop, extend the window instead
                        self.post_roll_until_ms = self
                            .recording_started_at_ms
                            .map(|started| started + self.tuning.min_clip_ms);
                        (TransitionAction::None, ReasonCode::R002_MIN_CLIP_EXTENDED)
                    } else {
                        self.cooldown_until_ms = Some(ts + self.tuning.cooldown_ms);
                        self.reset_to_idle();
                        (
                            TransitionAction::StopRecording,
                            ReasonCode::R003_TRANSITION_STOPPED,
                        )
                    }
                } else {
                    (TransitionAction::None, ReasonCode::R001_STATE_POST_ROLL)
                }
            }
        };

        SignalOutput::new(
            ts,
            signal.motion_score,
            triggered,
            self.state,
            action,
            reason,
        )
    }

    /// Force the session back to IDLE, e.g. on manual stop or mode disable
    ///
    /// Clears all session timers but not the cooldown window: a manual
    /// stop/restart must not bypass the flap guard. Safe to call at any
    /// time from the owning task.
    pub fn reset_to_idle(&mut self) {
        self.state = SessionState::Idle;
        self.pending_since_ms = None;
        self.pending_last_triggered_at_ms = None;
        self.post_roll_until_ms = None;
        self.recording_started_at_ms = None;
    }

    /// Get current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Is the cooldown window still suppressing new arms at `now_ms`?
    pub fn cooldown_active(&self, now_ms: i64) -> bool {
        self.cooldown_until_ms.map_or(false, |until| now_ms < until)
    }

    /// Get last processed motion score
    pub fn last_score(&self) -> f64 {
        self.last_score
    }

    /// Number of processed signals
    pub fn signal_count(&self) -> u64 {
        self.signal_count
    }

    /// Get current output without processing a signal
    pub fn current_output(&self) -> SignalOutput {
        SignalOutput::new(
            self.last_signal_ts_ms.unwrap_or(0),
            self.last_score,
            false,
            self.state,
            TransitionAction::None,
            match self.state {
                SessionState::Idle => ReasonCode::R001_STATE_IDLE,
                SessionState::Pending => ReasonCode::R001_STATE_PENDING,
                SessionState::Recording => ReasonCode::R001_STATE_RECORDING,
                SessionState::PostRoll => ReasonCode::R001_STATE_POST_ROLL,
            },
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
