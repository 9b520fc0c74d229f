//! Motion Lab CLI
//!
//! Usage:
//!   motionlab --score 0.6                    # Single signal evaluation
//!   motionlab --interactive                  # Interactive signal feed
//!   motionlab --replay signals.jsonl         # Replay a recorded signal log
//!   motionlab --serve                        # HTTP API server
//!   motionlab --score 0.6 --json             # JSON output

use clap::Parser;
use std::io::{self, BufRead, Write};

use motionlab::core::{run_server, MotionEngine, MotionPolicy};
use motionlab::types::{MotionSettings, MotionSignal, SessionState, SignalOutput, TriggerMode};
use motionlab::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "motionlab",
    version = VERSION,
    about = "Motion Lab - decide when motion should start and stop a recording",
    long_about = "Motion Lab converts a stream of motion/person observations into\n\
                  START_RECORDING / STOP_RECORDING decisions for a capture orchestrator.\n\n\
                  Modes:\n  \
                  --score        Evaluate a single signal\n  \
                  --interactive  Feed signals line by line (synthetic frame clock)\n  \
                  --replay       Replay a JSONL signal log\n  \
                  --serve        HTTP API server mode\n\n\
                  States:\n  \
                  IDLE       - No activity\n  \
                  PENDING    - Trigger seen, debounce accumulating\n  \
                  RECORDING  - Recording active\n  \
                  POST_ROLL  - Trigger lost, holding the clip open"
)]
struct Args {
    /// Single motion score to evaluate
    #[arg(long)]
    score: Option<f64>,

    /// Mark the single --score signal as a person detection
    #[arg(long)]
    person: bool,

    /// Interactive mode - read "score [person]" lines from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Replay a JSONL file of signals (one MotionSignal object per line)
    #[arg(short, long)]
    replay: Option<String>,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show threshold breakdown per signal
    #[arg(long)]
    verbose: bool,

    /// Sensitivity knob 0..=100 (higher = easier to trigger)
    #[arg(long, default_value_t = motionlab::DEFAULT_SENSITIVITY)]
    sensitivity: i32,

    /// Trigger mode: any_motion or person_confirmed
    #[arg(long, default_value = "any_motion")]
    trigger_mode: TriggerMode,

    /// Debounce before recording starts (milliseconds)
    #[arg(long, default_value_t = motionlab::DEFAULT_DEBOUNCE_MS)]
    debounce_ms: i64,

    /// Post-roll after the trigger ends (milliseconds)
    #[arg(long, default_value_t = motionlab::DEFAULT_POST_ROLL_MS)]
    post_roll_ms: i64,

    /// Analysis frame rate driving the synthetic clock
    #[arg(long, default_value_t = motionlab::DEFAULT_ANALYSIS_FPS)]
    analysis_fps: i32,

    /// Drop the synthetic clock to the low-FPS target
    #[arg(long)]
    low_fps: bool,

    /// Low-FPS fallback target rate
    #[arg(long, default_value_t = motionlab::DEFAULT_LOW_FPS_TARGET)]
    low_fps_target: i32,
}

impl Args {
    fn settings(&self) -> MotionSettings {
        MotionSettings {
            enabled: true,
            trigger_mode: self.trigger_mode,
            sensitivity: self.sensitivity,
            analysis_fps: self.analysis_fps,
            debounce_ms: self.debounce_ms,
            post_roll_ms: self.post_roll_ms,
            pre_roll_seconds: motionlab::DEFAULT_PRE_ROLL_SECONDS,
            low_fps_fallback_enabled: self.low_fps,
            low_fps_target: self.low_fps_target,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.serve {
        run_serve(&args).await;
    } else if let Some(ref path) = args.replay {
        run_replay(path, &args);
    } else if args.interactive {
        run_interactive(&args);
    } else if let Some(score) = args.score {
        run_single(score, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args);
    }
}

/// Run single signal evaluation
fn run_single(score: f64, args: &Args) {
    let settings = args.settings();
    let mut engine = MotionEngine::new();

    let signal = MotionSignal::new(0, score, args.person);
    let output = engine.on_signal(&settings, &signal);

    print_output(&output, &settings, args);
}

/// Run interactive mode: one signal per stdin line
///
/// Line format: "score" or "score person". The signal clock advances by one
/// frame interval per line. Commands: reset, quit.
fn run_interactive(args: &Args) {
    let settings = args.settings();
    let policy = MotionPolicy::new();
    let mut engine = MotionEngine::new();
    let mut clock_ms: i64 = 0;

    print_header("Interactive Mode", args.no_color);
    println!(
        "Enter a motion score per line (append 'person' for a person detection)."
    );
    println!(
        "Thresholds @ sensitivity {}: start={:.3} stop={:.3} | frame interval {}ms",
        settings.sensitivity,
        policy.start_threshold(settings.sensitivity),
        policy.stop_threshold(settings.sensitivity),
        settings.frame_interval_ms()
    );
    println!("Commands: 'reset' forces IDLE, 'quit' exits.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&engine, args.no_color);
        print!("{}", prompt);
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Signals: {}", engine.signal_count());
            break;
        }
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("reset") {
            engine.reset_to_idle();
            println!("Forced IDLE (cooldown, if any, still applies).");
            continue;
        }

        let Some(signal) = parse_signal_line(line, clock_ms) else {
            println!("Could not parse '{}' - expected: <score> [person]", line);
            continue;
        };
        clock_ms += settings.frame_interval_ms();

        let output = engine.on_signal(&settings, &signal);
        print_output(&output, &settings, args);
        print_action_message(&output, args.no_color);
    }
}

/// Replay a JSONL signal log through a fresh engine
fn run_replay(path: &str, args: &Args) {
    let settings = args.settings();
    let mut engine = MotionEngine::new();
    let mut starts = 0u64;
    let mut stops = 0u64;

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Cannot read '{}': {}", path, e);
            std::process::exit(1);
        }
    };

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let signal: MotionSignal = match serde_json::from_str(line) {
            Ok(signal) => signal,
            Err(e) => {
                eprintln!("{}:{}: bad signal: {}", path, lineno + 1, e);
                std::process::exit(1);
            }
        };

        let output = engine.on_signal(&settings, &signal);
        match output.action {
            motionlab::types::TransitionAction::StartRecording => starts += 1,
            motionlab::types::TransitionAction::StopRecording => stops += 1,
            motionlab::types::TransitionAction::None => {}
        }

        if args.verbose || !output.action.is_none() {
            print_output(&output, &settings, args);
        }
    }

    if !args.json {
        println!();
        println!(
            "Replayed {} signals: {} start(s), {} stop(s), final state {}",
            engine.signal_count(),
            starts,
            stops,
            engine.state()
        );
    }
}

/// Parse an interactive line into a signal at the given clock time
fn parse_signal_line(line: &str, clock_ms: i64) -> Option<MotionSignal> {
    let mut parts = line.split_whitespace();
    let score: f64 = parts.next()?.parse().ok()?;
    let person = matches!(
        parts.next().map(|p| p.to_ascii_lowercase()).as_deref(),
        Some("person") | Some("p") | Some("1") | Some("true")
    );
    Some(MotionSignal::new(clock_ms, score, person))
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  Motion Lab v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  Motion Lab v{} - {}\x1b[0m", VERSION, mode);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}

/// Format interactive prompt from current state
fn format_prompt(engine: &MotionEngine, no_color: bool) -> String {
    let state = engine.state();
    if no_color {
        format!("[{}] > ", state)
    } else {
        format!(
            "{}{} [{}]{} > ",
            state.color_code(),
            state.emoji(),
            state,
            SessionState::color_reset()
        )
    }
}

/// Print one output record in the selected format
fn print_output(output: &SignalOutput, settings: &MotionSettings, args: &Args) {
    if args.json {
        println!("{}", serde_json::to_string(output).unwrap_or_default());
    } else if args.verbose {
        print_verbose(output, settings, args.no_color);
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }
}

/// Print verbose threshold breakdown
fn print_verbose(output: &SignalOutput, settings: &MotionSettings, no_color: bool) {
    let policy = MotionPolicy::new();
    let color = if no_color { "" } else { output.state.color_code() };
    let reset = if no_color { "" } else { SessionState::color_reset() };

    println!("{}+---------------------------------------+{}", color, reset);
    println!(
        "{}| t={}ms score={:.4} triggered={}{}",
        color, output.signal_ts_ms, output.score, output.triggered, reset
    );
    println!(
        "{}| thresholds: start={:.3} stop={:.3} (sensitivity {}){}",
        color,
        policy.start_threshold(settings.sensitivity),
        policy.stop_threshold(settings.sensitivity),
        settings.sensitivity,
        reset
    );
    println!(
        "{}| state={} action={}{}",
        color, output.state, output.action, reset
    );
    println!("{}| reason: {}{}", color, output.reason, reset);
    println!("{}+---------------------------------------+{}", color, reset);
}

/// Print orchestrator-facing action messages
fn print_action_message(output: &SignalOutput, no_color: bool) {
    match output.action {
        motionlab::types::TransitionAction::StartRecording => {
            if no_color {
                println!("  >> START_RECORDING");
            } else {
                println!("\x1b[31m  >> START_RECORDING\x1b[0m");
            }
        }
        motionlab::types::TransitionAction::StopRecording => {
            if no_color {
                println!("  >> STOP_RECORDING (cooldown active)");
            } else {
                println!("\x1b[32m  >> STOP_RECORDING (cooldown active)\x1b[0m");
            }
        }
        motionlab::types::TransitionAction::None => {}
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args) {
    println!();
    println!("Motion Lab API Server v{}", VERSION);
    println!();

    if let Err(e) = run_server(&args.addr).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
