//! Concurrent game registry
//!
//! This module is the single point of mutation for game creation and
//! player admission. It maps game identifiers to shared game handles and
//! enforces the locking discipline the rest of the server relies on:
//! - The identifier map sits behind an `RwLock`, so lookups from
//!   concurrent requests proceed in parallel while insertions are
//!   exclusive.
//! - Every game sits behind its own `Mutex`; `add_player`,
//!   `start_if_ready`, and `check_guess` on the same game are serialized
//!   through it no matter how many request handlers hold the handle.
//! - The map lock is never held across a game critical section, and no
//!   lock is held across result-sink I/O.

use crate::game::{Game, Player};
use log::info;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared handle to a single game. Cloning is cheap; mutation goes
/// through the lock.
pub type GameHandle = Arc<Mutex<Game>>;

/// Concurrency-safe collection of all live games, keyed by game id.
/// Games are never removed; the result log is the durable record of a
/// finished game, not this map.
#[derive(Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<String, GameHandle>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a game and inserts it under its fresh identifier.
    pub async fn create_game(&self, max_players: usize) -> GameHandle {
        let game = Game::new(max_players);
        info!("Created game {} for {} players", game.id(), max_players);
        self.insert(game).await
    }

    /// Inserts an already-constructed game (used by tests that pin the
    /// secret via [`Game::with_secret`]).
    pub async fn insert(&self, game: Game) -> GameHandle {
        let id = game.id().to_string();
        let handle = Arc::new(Mutex::new(game));
        self.games.write().await.insert(id, Arc::clone(&handle));
        handle
    }

    /// Read-only lookup. Concurrent callers are not serialized.
    pub async fn get_game(&self, game_id: &str) -> Option<GameHandle> {
        self.games.read().await.get(game_id).cloned()
    }

    /// Looks up a game and admits the player under the game's own lock.
    /// Returns false when the game does not exist, is full, or finished.
    pub async fn add_player(&self, game_id: &str, player: Player) -> bool {
        match self.get_game(game_id).await {
            Some(handle) => handle.lock().await.add_player(player),
            None => false,
        }
    }

    /// Number of games currently tracked.
    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.games.read().await.is_empty()
    }
}
