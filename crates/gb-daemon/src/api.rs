// api.rs — Route table and request handlers.
//
// The same goal routes are registered under every base path in GOAL_BASES,
// with and without a trailing slash, so `/goals`, `/goals/` and
// `/api/goals` share handlers and see the same store. Anything no route
// claims falls through to the static front-end directory.
//
// Path ids are taken as raw strings. An id that isn't a goal id can't
// name a stored goal: update answers 404 and delete is a no-op, the same
// as for any other id with no match.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use gb_goal::{
    Goal, GoalError, GoalId, GoalPatch, GoalStore, LogSink, NewGoal, NotificationSink, TracingSink,
};

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Base paths the goal routes are mounted at.
pub const GOAL_BASES: [&str; 2] = ["/goals", "/api/goals"];

/// Reply body for delete and greet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<GoalStore>,
    pub greeting: Arc<str>,
}

impl AppState {
    pub fn new(store: GoalStore, greeting: impl Into<Arc<str>>) -> Self {
        Self {
            store: Arc::new(store),
            greeting: greeting.into(),
        }
    }

    /// Build the store (seed + event sinks) described by `config`.
    ///
    /// Fails when the `events_log` file can't be opened.
    pub fn from_config(config: &ServerConfig) -> Result<Self, GoalError> {
        let log = match &config.events_log {
            Some(path) => {
                tracing::info!("Writing goal events to {}", path.display());
                Some(LogSink::open(path)?)
            }
            None => None,
        };

        let sinks = std::iter::once(Box::new(TracingSink) as Box<dyn NotificationSink>)
            .chain(log.map(|sink| Box::new(sink) as Box<dyn NotificationSink>));
        let store = GoalStore::with_goals(config.seed.clone()).with_events(sinks.collect());
        Ok(Self::new(store, config.greeting.as_str()))
    }
}

/// The full application: API routes, static front-end, middleware.
pub fn router(state: AppState, static_dir: &FsPath) -> Router {
    let index = ServeFile::new(static_dir.join("index.html"));

    api_router()
        .route_service("/", index)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes only, without static files or middleware.
pub fn api_router() -> Router<AppState> {
    GOAL_BASES
        .iter()
        .fold(Router::new().route("/api/greet", get(greet)), |app, base| {
            app.merge(goal_routes(base))
        })
}

fn goal_routes(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list_goals).post(create_goal))
        .route(&format!("{base}/"), get(list_goals).post(create_goal))
        .route(
            &format!("{base}/{{id}}"),
            put(update_goal).delete(delete_goal),
        )
}

fn parse_id(raw: &str) -> Option<GoalId> {
    raw.parse().ok()
}

async fn greet(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse::new(state.greeting.as_ref()))
}

async fn list_goals(State(state): State<AppState>) -> Json<Vec<Goal>> {
    Json(state.store.list())
}

async fn create_goal(
    State(state): State<AppState>,
    Json(new): Json<NewGoal>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    let goal = state.store.create(new)?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn update_goal(
    State(state): State<AppState>,
    Path(raw): Path<String>,
    Json(patch): Json<GoalPatch>,
) -> Result<Json<Goal>, ApiError> {
    let id = parse_id(&raw).ok_or(ApiError::NotFound)?;
    let goal = state.store.update(id, patch)?;
    Ok(Json(goal))
}

async fn delete_goal(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Json<MessageResponse> {
    match parse_id(&raw) {
        Some(id) => {
            if !state.store.delete(id) {
                tracing::debug!(goal_id = id, "delete matched no goal");
            }
        }
        None => tracing::debug!(id = %raw, "delete with unparsable id"),
    }
    Json(MessageResponse::new("Deleted successfully"))
}
