//! HTTP + WebSocket API for Motion Lab
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/signal - Feed one signal, get the decision
//! - POST /session/{id}/settings - Replace the settings snapshot
//! - POST /session/{id}/reset - Force the session back to IDLE
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::core::{EngineTuning, MotionEngine, MotionPolicy};
use crate::types::{MotionSettings, MotionSignal};

/// Session state
///
/// All signal delivery goes through the sessions map's write lock, which
/// serializes calls into the engine and satisfies its single-writer
/// contract.
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub engine: MotionEngine,
    pub settings: MotionSettings,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub signal_ts_ms: i64,
    pub score: f64,
    pub state: String,
    pub action: String,
    pub reason: String,
    pub signal_count: u64,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

/// Create new session request
#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub settings: Option<MotionSettings>,
    pub min_clip_ms: Option<i64>,
    pub cooldown_ms: Option<i64>,
    pub pending_grace_ms: Option<i64>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub settings: MotionSettings,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub state: String,
    pub enabled: bool,
    pub last_score: f64,
    pub signal_count: u64,
    pub start_threshold: f64,
    pub stop_threshold: f64,
    pub settings: MotionSettings,
}

/// Signal response
#[derive(Debug, Serialize)]
pub struct SignalResponse {
    pub state: String,
    pub action: String,
    pub reason: String,
    pub triggered: bool,
    pub signal_count: u64,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/signal", post(post_signal))
        .route("/session/:id/settings", post(update_settings))
        .route("/session/:id/reset", post(reset_session))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let session_id = generate_session_id();
    let settings = req.settings.unwrap_or_default();
    let default_tuning = EngineTuning::default();
    let tuning = EngineTuning {
        min_clip_ms: req.min_clip_ms.unwrap_or(default_tuning.min_clip_ms),
        cooldown_ms: req.cooldown_ms.unwrap_or(default_tuning.cooldown_ms),
        pending_grace_ms: req
            .pending_grace_ms
            .unwrap_or(default_tuning.pending_grace_ms),
    };
    let (tx, _) = broadcast::channel(100);

    let session = Session {
        id: session_id.clone(),
        engine: MotionEngine::with_tuning(tuning),
        settings,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        settings,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;

    let policy = MotionPolicy::new();
    let output = session.engine.current_output();

    Ok(Json(SessionStatusResponse {
        session_id: id,
        state: output.state.to_string(),
        enabled: session.settings.enabled,
        last_score: session.engine.last_score(),
        signal_count: session.engine.signal_count(),
        start_threshold: policy.start_threshold(session.settings.sensitivity),
        stop_threshold: policy.stop_threshold(session.settings.sensitivity),
        settings: session.settings,
    }))
}

/// Feed one signal into a session
async fn post_signal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(signal): Json<MotionSignal>,
) -> Result<Json<SignalResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    // Detection disabled: the engine never sees the signal
    if !session.settings.enabled {
        return Err(StatusCode::CONFLICT);
    }

    let settings = session.settings;
    let output = session.engine.on_signal(&settings, &signal);

    let update = SessionUpdate {
        signal_ts_ms: output.signal_ts_ms,
        score: output.score,
        state: output.state.to_string(),
        action: output.action.to_string(),
        reason: output.reason.code().to_string(),
        signal_count: session.engine.signal_count(),
    };
    let _ = session.update_tx.send(update);

    Ok(Json(SignalResponse {
        state: output.state.to_string(),
        action: output.action.to_string(),
        reason: output.reason.code().to_string(),
        triggered: output.triggered,
        signal_count: session.engine.signal_count(),
    }))
}

/// Replace a session's settings snapshot
///
/// Takes effect starting with the next signal, never retroactively.
async fn update_settings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(settings): Json<MotionSettings>,
) -> Result<Json<MotionSettings>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.settings = settings;
    Ok(Json(session.settings))
}

/// Force a session back to IDLE (manual stop)
async fn reset_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SignalResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.engine.reset_to_idle();
    let output = session.engine.current_output();

    Ok(Json(SignalResponse {
        state: output.state.to_string(),
        action: output.action.to_string(),
        reason: output.reason.code().to_string(),
        triggered: false,
        signal_count: session.engine.signal_count(),
    }))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    while let Ok(update) = rx.recv().await {
        let json = serde_json::to_string(&update).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Motion Lab API running on {}", addr);
    println!("  POST /session/new          - Create session");
    println!("  GET  /session/:id          - Get status");
    println!("  POST /session/:id/signal   - Feed signal");
    println!("  POST /session/:id/settings - Update settings");
    println!("  POST /session/:id/reset    - Reset to IDLE");
    println!("  WS   /ws/:id               - Live updates");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
