//! REST boundary for the tender chat service.

use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use tia_agent::TenderAgent;

use crate::session::{HistoryEntry, Role, SessionStore};
use crate::types::*;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<TenderAgent>,
    pub store: Arc<SessionStore>,
}

pub fn create_router(agent: Arc<TenderAgent>, store: Arc<SessionStore>) -> Router {
    let state = AppState { agent, store };

    Router::new()
        // Health check endpoints
        .route("/health", get(health_check))
        .route("/readiness", get(readiness_check))
        // API endpoints
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/:id/messages", post(send_message))
        .route("/api/v1/sessions/:id/history", get(session_history))
        .route("/api/v1/sessions/:id", delete(delete_session))
        // Middleware layers (applied in reverse order)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness endpoint - returns OK if the service is running
async fn health_check() -> impl IntoResponse {
    tracing::debug!("Health check requested");
    (StatusCode::OK, "OK")
}

/// Readiness endpoint - reports whether a retrieval backend is wired
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    tracing::debug!("Readiness check requested");
    Json(ReadinessResponse {
        status: "READY",
        retrieval_ready: state.agent.retrieval_ready(),
    })
}

async fn create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let requested = body.and_then(|Json(req)| req.session_id);
    let session = state
        .store
        .create(requested)
        .ok_or_else(|| AppError::Conflict("session id already in use".to_string()))?;

    tracing::info!(session_id = %session.id(), "session created");
    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id().to_string(),
            created_at: session.created_at(),
        }),
    ))
}

async fn send_message(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let text = req.text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::BadRequest("text must not be empty".to_string()));
    }

    let session = state
        .store
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("no session {session_id}")))?;

    // The lock is held across the whole exchange; messages within one
    // session are answered strictly in order.
    let mut session_state = session.state().lock().await;
    session_state.history.push(HistoryEntry {
        role: Role::User,
        text: text.clone(),
    });
    let answer = state.agent.respond(&mut session_state.memory, &text).await;
    session_state.history.push(HistoryEntry {
        role: Role::Bot,
        text: answer.clone(),
    });

    Ok(Json(SendMessageResponse { session_id, answer }))
}

async fn session_history(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, AppError> {
    let session = state
        .store
        .get(&session_id)
        .ok_or_else(|| AppError::NotFound(format!("no session {session_id}")))?;

    let entries = session.state().lock().await.history.clone();
    Ok(Json(HistoryResponse {
        session_id,
        entries,
    }))
}

async fn delete_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(&session_id) {
        tracing::info!(session_id = %session_id, "session removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("no session {session_id}")))
    }
}

// Error handling
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Conflict(message) => (StatusCode::CONFLICT, message),
        };
        let json = serde_json::json!({
            "error": message
        });
        (status, Json(json)).into_response()
    }
}
