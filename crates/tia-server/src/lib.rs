//! # TIA Server
//!
//! REST chat boundary for the Tender Intelligence Agent.
//!
//! ## Overview
//!
//! Exposes the agent over HTTP: callers create a session, post Hebrew
//! utterances to it, and read back the append-only transcript. Each session
//! owns its own conversation memory and answers its messages strictly in
//! order; separate sessions run concurrently without sharing anything.
//!
//! ## Endpoints
//!
//! - `GET /health` - liveness
//! - `GET /readiness` - readiness, including the retrieval flag
//! - `POST /api/v1/sessions` - create a session
//! - `POST /api/v1/sessions/:id/messages` - submit an utterance, get the answer
//! - `GET /api/v1/sessions/:id/history` - full transcript
//! - `DELETE /api/v1/sessions/:id` - destroy a session

pub mod rest;
pub mod session;
pub mod types;

/// Service title, logged at startup.
pub const APP_TITLE: &str = "Tender Intelligence";

/// Hebrew strapline for the service, logged at startup.
pub const APP_SUBTITLE: &str =
    "סוכן מודיעים מכרזים חכם - מקור הידע שלך למידע, תובנות והזדמנויות עסקיות בזמן אמת";

// Re-exports
pub use rest::{create_router, AppState};
pub use session::{ChatSession, HistoryEntry, Role, SessionState, SessionStore};
