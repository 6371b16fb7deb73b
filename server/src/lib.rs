//! # Codebreaker Game Server Library
//!
//! This library implements the server side of a multiplayer turn-taking
//! code-breaking game. Players submit 4-digit guesses against a secret
//! code; the server scores each guess with black/white pegs and tracks
//! per-player attempt counts until a win or attempt exhaustion ends the
//! game.
//!
//! ## Core Responsibilities
//!
//! ### Game Lifecycle Authority
//! The server owns the canonical state of every game: the secret code,
//! the roster, attempt counts, and the lifecycle flags. A game moves
//! through creation → joinable → started → finished, and the finished
//! transition happens exactly once no matter how many requests race it.
//!
//! ### Concurrent Access
//! Many HTTP request handlers operate on the same games simultaneously.
//! The registry serializes structural changes to the id→game map behind
//! a read-write lock, while each game carries its own mutex so guesses
//! and admissions on one game never interleave mid-transition.
//!
//! ### Durable Results
//! When a game finishes, its terminal snapshot (secret, winner, per-player
//! attempts, timestamps) is appended to a JSON-lines result log. The log
//! is the durable record of a finished game; in-memory games are never
//! explicitly destroyed.
//!
//! ## Module Organization
//!
//! ### Scoring Module (`scoring`)
//! Pure black/white peg computation with consumption marking so repeated
//! digits are never double-counted.
//!
//! ### Game Module (`game`)
//! The game aggregate: players, attempts, turn pointer, and the started
//! and finished transitions, plus the terminal [`game::GameResult`]
//! projection.
//!
//! ### Registry Module (`registry`)
//! The concurrency-safe collection of live games and the single point of
//! mutation for creation and admission.
//!
//! ### Result Log Module (`result_log`)
//! The append-only structured-record sink for finished games.
//!
//! ### Network Module (`network`)
//! The axum HTTP layer mapping the four external operations (create,
//! join, guess, status) onto the core and translating rejections into
//! status codes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::network::{self, AppState};
//! use server::registry::GameRegistry;
//! use server::result_log::ResultLog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState {
//!         registry: Arc::new(GameRegistry::new()),
//!         results: Arc::new(ResultLog::new("game_results.jsonl")),
//!     };
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, network::app(state)).await?;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod network;
pub mod registry;
pub mod result_log;
pub mod scoring;
