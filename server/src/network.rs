//! HTTP transport layer
//!
//! Thin axum wrapper over the game registry. Each route corresponds to
//! one externally-triggered transition: create, join, guess, status.
//! Request bodies are form-encoded, responses JSON; field names are part
//! of the wire contract shared with the console client.
//!
//! The handlers own all caller-side validation the core leaves to them:
//! clamping the player count, rejecting malformed guesses before the
//! scoring path, and forwarding exactly one terminal result per game to
//! the result log — after every game lock has been released.

use crate::game::Player;
use crate::registry::GameRegistry;
use crate::result_log::ResultLog;
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use log::{error, info};
use serde::Deserialize;
use shared::{
    CreateGameResponse, ErrorResponse, GameStatusResponse, GuessResponse, JoinGameResponse,
};
use std::sync::Arc;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<GameRegistry>,
    pub results: Arc<ResultLog>,
}

/// Handler-level rejection carrying the HTTP status to surface.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Game not found")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Builds the application router over the given state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/create", post(create_game))
        .route("/join", post(join_game))
        .route("/guess", post(make_guess))
        .route("/game/{id}/status", get(game_status))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateGameForm {
    max_players: Option<usize>,
    creator_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JoinGameForm {
    game_id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct GuessForm {
    game_id: String,
    player_id: String,
    guess: String,
}

/// Clamps the requested player count into the supported window,
/// defaulting when absent or out of range.
fn clamp_max_players(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if (shared::MIN_PLAYERS..=shared::MAX_PLAYERS).contains(&n) => n,
        _ => shared::MIN_PLAYERS,
    }
}

async fn create_game(
    State(state): State<AppState>,
    Form(form): Form<CreateGameForm>,
) -> Json<CreateGameResponse> {
    let max_players = clamp_max_players(form.max_players);
    let creator_name = match form.creator_name {
        Some(name) if !name.is_empty() => name,
        _ => "Creator".to_string(),
    };

    let handle = state.registry.create_game(max_players).await;
    let creator = Player::new(creator_name);
    let player_id = creator.id.clone();

    let game_id = {
        let mut game = handle.lock().await;
        game.add_player(creator);
        game.id().to_string()
    };

    Json(CreateGameResponse { game_id, player_id })
}

async fn join_game(
    State(state): State<AppState>,
    Form(form): Form<JoinGameForm>,
) -> Result<Json<JoinGameResponse>, ApiError> {
    let handle = state
        .registry
        .get_game(&form.game_id)
        .await
        .ok_or_else(ApiError::not_found)?;

    if !handle.lock().await.is_joinable() {
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            "Game is already finished or full",
        ));
    }

    let player = Player::new(form.name);
    let player_id = player.id.clone();

    // Admission re-validates under the game lock; the joinability check
    // above only exists to give unjoinable games their own message.
    if !state.registry.add_player(&form.game_id, player).await {
        return Err(ApiError::new(StatusCode::FORBIDDEN, "Failed to join game"));
    }

    let started = {
        let mut game = handle.lock().await;
        game.start_if_ready();
        game.started()
    };

    Ok(Json(JoinGameResponse { player_id, started }))
}

async fn make_guess(
    State(state): State<AppState>,
    Form(form): Form<GuessForm>,
) -> Result<Json<GuessResponse>, ApiError> {
    let handle = state
        .registry
        .get_game(&form.game_id)
        .await
        .ok_or_else(ApiError::not_found)?;

    // The core assumes this held; reject malformed guesses here.
    if !shared::is_valid_guess(&form.guess) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "Guess must be 4 digits",
        ));
    }

    let outcome = {
        let mut game = handle.lock().await;
        game.check_guess(&form.player_id, &form.guess)
            .map_err(|e| ApiError::new(StatusCode::FORBIDDEN, e.to_string()))?
    };

    // The game lock is released; sink latency cannot block gameplay.
    // Only the call that performed the finishing transition carries a
    // result, so the log receives exactly one record per game.
    if let Some(result) = &outcome.result {
        info!("Game {} finished, saving result", form.game_id);
        if let Err(e) = state.results.append(result).await {
            error!("Failed to save result for game {}: {}", form.game_id, e);
        }
    }

    Ok(Json(GuessResponse {
        black: outcome.black,
        white: outcome.white,
        is_winner: outcome.is_winner,
        game_over: outcome.game_over,
    }))
}

async fn game_status(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStatusResponse>, ApiError> {
    let handle = state
        .registry
        .get_game(&game_id)
        .await
        .ok_or_else(ApiError::not_found)?;

    let game = handle.lock().await;
    Ok(Json(GameStatusResponse {
        started: game.started(),
        finished: game.finished(),
        players: game.player_count(),
        max_players: game.max_players(),
    }))
}
