//! Integration tests for the session engine
//!
//! Drives full sessions through the engine with a synthetic clock:
//! arm → debounce → record → post-roll → stop → cooldown.

use motionlab::core::{EngineTuning, MotionEngine};
use motionlab::types::{
    MotionSettings, MotionSignal, SessionState, TransitionAction, TriggerMode,
};
use pretty_assertions::assert_eq;

fn settings() -> MotionSettings {
    // sensitivity 50: start threshold 0.43, stop threshold 0.38
    MotionSettings {
        sensitivity: 50,
        debounce_ms: 800,
        post_roll_ms: 3000,
        ..Default::default()
    }
}

fn signal(ts: i64, score: f64) -> MotionSignal {
    MotionSignal::new(ts, score, false)
}

/// Full happy path: one complete session, then cooldown suppression
#[test]
fn test_full_session_lifecycle() {
    let mut engine = MotionEngine::new();
    let settings = settings();

    // Arm
    let out = engine.on_signal(&settings, &signal(1000, 0.5));
    assert_eq!(out.state, SessionState::Pending);
    assert_eq!(out.action, TransitionAction::None);

    // Debounce met after 801ms
    let out = engine.on_signal(&settings, &signal(1801, 0.5));
    assert_eq!(out.state, SessionState::Recording);
    assert_eq!(out.action, TransitionAction::StartRecording);

    // Trigger lost: post-roll window opens until 8000
    let out = engine.on_signal(&settings, &signal(5000, 0.05));
    assert_eq!(out.state, SessionState::PostRoll);
    assert_eq!(out.action, TransitionAction::None);

    // Window expires, clip is 6199ms (≥ 2500ms minimum): stop + cooldown
    let out = engine.on_signal(&settings, &signal(8000, 0.05));
    assert_eq!(out.state, SessionState::Idle);
    assert_eq!(out.action, TransitionAction::StopRecording);

    // Strong person signal inside the cooldown window is ignored
    let out = engine.on_signal(&settings, &MotionSignal::new(9000, 1.0, true));
    assert_eq!(out.state, SessionState::Idle);
    assert_eq!(out.action, TransitionAction::None);

    // Cooldown over at 9500: the next trigger arms normally
    let out = engine.on_signal(&settings, &signal(9500, 0.5));
    assert_eq!(out.state, SessionState::Pending);
}

/// A brief dropout while PENDING does not abandon the arm
#[test]
fn test_pending_survives_brief_dropout() {
    let mut engine = MotionEngine::new();
    let settings = settings();

    engine.on_signal(&settings, &signal(1000, 0.5));
    // 900ms of loss, inside the 1000ms grace window
    let out = engine.on_signal(&settings, &signal(1900, 0.05));
    assert_eq!(out.state, SessionState::Pending);

    // Trigger resumes and the original arm time still counts for debounce
    let out = engine.on_signal(&settings, &signal(2000, 0.5));
    assert_eq!(out.state, SessionState::Recording);
    assert_eq!(out.action, TransitionAction::StartRecording);
}

/// A long dropout while PENDING abandons the arm without any action
#[test]
fn test_pending_abandoned_after_long_dropout() {
    let mut engine = MotionEngine::new();
    let settings = settings();

    engine.on_signal(&settings, &signal(1000, 0.5));
    let out = engine.on_signal(&settings, &signal(2100, 0.05));
    assert_eq!(out.state, SessionState::Idle);
    assert_eq!(out.action, TransitionAction::None);

    // No cooldown after an abandoned arm: re-arming is immediate
    let out = engine.on_signal(&settings, &signal(2200, 0.5));
    assert_eq!(out.state, SessionState::Pending);
}

/// Post-roll re-trigger resumes the same recording without a new START
#[test]
fn test_post_roll_resume_emits_no_action() {
    let mut engine = MotionEngine::new();
    let settings = settings();

    engine.on_signal(&settings, &signal(1000, 0.5));
    engine.on_signal(&settings, &signal(1801, 0.5));
    engine.on_signal(&settings, &signal(5000, 0.05));
    assert_eq!(engine.state(), SessionState::PostRoll);

    // Score between stop (0.38) and start (0.43): hysteresis keeps it alive
    let out = engine.on_signal(&settings, &signal(6000, 0.40));
    assert_eq!(out.state, SessionState::Recording);
    assert_eq!(out.action, TransitionAction::None);
}

/// Minimum clip length defers the stop past the nominal post-roll window
#[test]
fn test_minimum_clip_defers_stop() {
    let mut engine = MotionEngine::new();
    let settings = MotionSettings {
        debounce_ms: 0,
        post_roll_ms: 200,
        ..Default::default()
    };

    engine.on_signal(&settings, &signal(1000, 0.5)); // PENDING
    engine.on_signal(&settings, &signal(1010, 0.5)); // RECORDING at 1010
    engine.on_signal(&settings, &signal(1100, 0.05)); // POST_ROLL until 1300

    // Expired, but clip is only 290ms old: deferred
    let out = engine.on_signal(&settings, &signal(1300, 0.05));
    assert_eq!(out.state, SessionState::PostRoll);
    assert_eq!(out.action, TransitionAction::None);

    // Extended window ends at 1010 + 2500 = 3510
    let out = engine.on_signal(&settings, &signal(3509, 0.05));
    assert_eq!(out.action, TransitionAction::None);
    let out = engine.on_signal(&settings, &signal(3510, 0.05));
    assert_eq!(out.action, TransitionAction::StopRecording);
}

/// Tuning overrides shrink the guards for fast tests
#[test]
fn test_custom_tuning_guards() {
    let mut engine = MotionEngine::with_tuning(EngineTuning {
        min_clip_ms: 0,
        cooldown_ms: 10_000,
        pending_grace_ms: 0,
    });
    let settings = MotionSettings {
        debounce_ms: 0,
        post_roll_ms: 100,
        ..Default::default()
    };

    engine.on_signal(&settings, &signal(0, 0.5));
    engine.on_signal(&settings, &signal(1, 0.5));
    engine.on_signal(&settings, &signal(2, 0.05));
    let out = engine.on_signal(&settings, &signal(102, 0.05));
    assert_eq!(out.action, TransitionAction::StopRecording);

    // Long custom cooldown holds for 10 seconds
    let out = engine.on_signal(&settings, &signal(10_101, 0.9));
    assert_eq!(out.action, TransitionAction::None);
    assert_eq!(out.state, SessionState::Idle);
    let out = engine.on_signal(&settings, &signal(10_102, 0.9));
    assert_eq!(out.state, SessionState::Pending);
}

/// reset_to_idle is idempotent and preserves the cooldown window
#[test]
fn test_reset_asymmetry() {
    let mut engine = MotionEngine::new();
    let settings = settings();

    engine.on_signal(&settings, &signal(1000, 0.5));
    engine.on_signal(&settings, &signal(1801, 0.5));
    engine.on_signal(&settings, &signal(5000, 0.05));
    engine.on_signal(&settings, &signal(8000, 0.05)); // cooldown until 9500

    engine.reset_to_idle();
    engine.reset_to_idle();
    assert_eq!(engine.state(), SessionState::Idle);

    // Cooldown survived both resets
    let out = engine.on_signal(&settings, &signal(9000, 0.9));
    assert_eq!(out.state, SessionState::Idle);
    assert_eq!(out.action, TransitionAction::None);
}

/// PERSON_CONFIRMED sessions ignore motion without a person end to end
#[test]
fn test_person_confirmed_session() {
    let mut engine = MotionEngine::new();
    let settings = MotionSettings {
        trigger_mode: TriggerMode::PersonConfirmed,
        debounce_ms: 800,
        ..Default::default()
    };

    // Strong motion, nobody there
    let out = engine.on_signal(&settings, &signal(1000, 0.95));
    assert_eq!(out.state, SessionState::Idle);

    // Person shows up
    engine.on_signal(&settings, &MotionSignal::new(2000, 0.95, true));
    let out = engine.on_signal(&settings, &MotionSignal::new(2801, 0.95, true));
    assert_eq!(out.action, TransitionAction::StartRecording);

    // Person leaves while recording; same score no longer counts
    let out = engine.on_signal(&settings, &signal(3000, 0.95));
    assert_eq!(out.state, SessionState::PostRoll);
}

/// A settings change takes effect on the next signal, not retroactively
#[test]
fn test_settings_swap_mid_session() {
    let mut engine = MotionEngine::new();
    let relaxed = settings();
    // Sensitivity 0: start threshold 0.78, stop threshold 0.73
    let strict = MotionSettings {
        sensitivity: 0,
        ..settings()
    };

    engine.on_signal(&relaxed, &signal(1000, 0.5));
    assert_eq!(engine.state(), SessionState::Pending);

    // Under strict settings the same score no longer clears the stop threshold
    let out = engine.on_signal(&strict, &signal(1100, 0.5));
    assert_eq!(out.state, SessionState::Pending); // grace hold, not yet abandoned
    let out = engine.on_signal(&strict, &signal(2200, 0.5));
    assert_eq!(out.state, SessionState::Idle);
}

/// Output records serialize round-trip
#[test]
fn test_output_json_round_trip() {
    let mut engine = MotionEngine::new();
    let out = engine.on_signal(&settings(), &signal(1000, 0.5));

    let json = serde_json::to_string(&out).unwrap();
    assert!(json.contains("\"state\":\"PENDING\""));
    assert!(json.contains("\"action\":\"NONE\""));

    let back: motionlab::types::SignalOutput = serde_json::from_str(&json).unwrap();
    assert_eq!(back.state, SessionState::Pending);
}
