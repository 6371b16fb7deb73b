//! Game lifecycle and state management
//!
//! This module owns a single game's mutable state and enforces its
//! lifecycle transitions:
//! - Creation with a fresh identifier and secret code
//! - Player admission while the game is joinable
//! - The one-time started transition once the table is full
//! - Guess scoring, per-player attempt tracking, and the one-time
//!   finishing transition (win or attempt exhaustion)
//!
//! A `Game` performs no synchronization of its own; callers hold the
//! per-game lock handed out by the registry around every mutating call.

use crate::scoring;
use chrono::{DateTime, Utc};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Identifier alphabet for games: uppercase without easily-confused
/// characters (no I, O, 0, 1), so ids survive being read aloud.
const GAME_ID_CHARS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const GAME_ID_LEN: usize = 6;

/// Identifier alphabet for players (no 'l' for the same reason).
const PLAYER_ID_CHARS: &[u8] = b"abcdefghijkmnopqrstuvwxyz0123456789";
const PLAYER_ID_LEN: usize = 8;

/// A participant in a game. Immutable after creation; owned by exactly
/// one game once admitted.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    /// Creates a player with a fresh generated identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: random_id(PLAYER_ID_CHARS, PLAYER_ID_LEN),
            name: name.into(),
        }
    }
}

/// Why a guess was rejected without touching game state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GuessError {
    /// The game already finished; no further guesses are accepted.
    #[error("game is already finished")]
    Finished,
    /// The player was never admitted to this game.
    #[error("player is not part of this game")]
    UnknownPlayer,
}

/// Everything a caller learns from one scored guess.
///
/// `result` is populated only by the single call that performed the
/// finishing transition, so whoever holds it owns the one handoff to the
/// result sink.
#[derive(Debug)]
pub struct GuessOutcome {
    pub black: u8,
    pub white: u8,
    pub is_winner: bool,
    pub game_over: bool,
    pub result: Option<GameResult>,
}

/// Terminal snapshot of a finished game, as appended to the result log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    pub game_id: String,
    pub secret_code: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
    pub players: Vec<PlayerResult>,
}

/// Per-player slice of a [`GameResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerResult {
    pub id: String,
    pub name: String,
    pub attempts: u32,
}

/// One code-breaking game: secret, roster, attempt counts, and lifecycle
/// flags. Created joinable; becomes started when full; becomes finished
/// exactly once, after which all mutation is rejected.
#[derive(Debug, Clone)]
pub struct Game {
    id: String,
    secret_code: String,
    players: Vec<Player>,
    max_players: usize,
    /// Informational turn pointer, advanced on every guess. Out-of-turn
    /// guesses are not rejected.
    current: usize,
    attempts: HashMap<String, u32>,
    max_attempts: u32,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
    winner: Option<String>,
    started: bool,
    finished: bool,
}

impl Game {
    /// Creates a game with a fresh identifier and random secret code.
    ///
    /// `max_players` is expected to be within [`shared::MIN_PLAYERS`] and
    /// [`shared::MAX_PLAYERS`]; the HTTP layer clamps it before calling.
    pub fn new(max_players: usize) -> Self {
        Self::with_secret(random_code(), max_players)
    }

    /// Creates a game with a caller-fixed secret code. Deterministic
    /// variant of [`Game::new`] for tests and scripted matches.
    pub fn with_secret(secret_code: impl Into<String>, max_players: usize) -> Self {
        Self {
            id: random_id(GAME_ID_CHARS, GAME_ID_LEN),
            secret_code: secret_code.into(),
            players: Vec::new(),
            max_players,
            current: 0,
            attempts: HashMap::new(),
            max_attempts: shared::MAX_ATTEMPTS,
            started_at: Utc::now(),
            finished_at: None,
            winner: None,
            started: false,
            finished: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// True while the game accepts new players: not finished and not yet
    /// at capacity.
    pub fn is_joinable(&self) -> bool {
        !self.finished && self.players.len() < self.max_players
    }

    /// Admits a player. Returns false without mutating anything when the
    /// game is full or finished. Identities are not deduplicated; every
    /// admission carries a freshly generated player id.
    pub fn add_player(&mut self, player: Player) -> bool {
        if !self.is_joinable() {
            return false;
        }

        info!("Game {}: player {} ({}) joined", self.id, player.name, player.id);
        self.attempts.insert(player.id.clone(), 0);
        self.players.push(player);
        true
    }

    /// Performs the started transition if the table is full. Returns true
    /// exactly once per game, on the call that observes the transition;
    /// redundant calls are no-ops.
    pub fn start_if_ready(&mut self) -> bool {
        if self.players.len() == self.max_players && !self.started {
            self.started = true;
            info!("Game {}: started with {} players", self.id, self.players.len());
            return true;
        }
        false
    }

    /// Scores a guess for an admitted player and applies its consequences:
    /// the player's attempt count increments, the turn pointer advances,
    /// and — when the guess wins or exhausts the player's attempts — the
    /// one-time finishing transition runs.
    ///
    /// The guess must already satisfy the 4-digit shape check
    /// ([`shared::is_valid_guess`]); the HTTP layer rejects malformed
    /// guesses before this point.
    pub fn check_guess(&mut self, player_id: &str, guess: &str) -> Result<GuessOutcome, GuessError> {
        if self.finished {
            return Err(GuessError::Finished);
        }

        let attempts = self
            .attempts
            .get_mut(player_id)
            .ok_or(GuessError::UnknownPlayer)?;

        let (black, white, is_winner) = scoring::score(&self.secret_code, guess);
        *attempts += 1;
        let attempts_used = *attempts;

        self.current = (self.current + 1) % self.players.len();

        let game_over = is_winner || attempts_used >= self.max_attempts;

        let result = if game_over {
            self.finished = true;
            self.finished_at = Some(Utc::now());
            if is_winner {
                self.winner = Some(player_id.to_string());
            }
            info!(
                "Game {}: finished, winner: {}",
                self.id,
                self.winner.as_deref().unwrap_or("none")
            );
            Some(self.to_result())
        } else {
            None
        };

        Ok(GuessOutcome {
            black,
            white,
            is_winner,
            game_over,
            result,
        })
    }

    /// Snapshots the game for the result log. Pure projection; meaningful
    /// once the game is finished.
    pub fn to_result(&self) -> GameResult {
        GameResult {
            game_id: self.id.clone(),
            secret_code: self.secret_code.clone(),
            started_at: self.started_at,
            finished_at: self.finished_at,
            winner: self.winner.clone(),
            players: self
                .players
                .iter()
                .map(|player| PlayerResult {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    attempts: *self.attempts.get(&player.id).unwrap_or(&0),
                })
                .collect(),
        }
    }
}

fn random_id(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

fn random_code() -> String {
    let mut rng = rand::thread_rng();
    (0..shared::CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_game(secret: &str) -> (Game, Player, Player) {
        let mut game = Game::with_secret(secret, 2);
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        assert!(game.add_player(alice.clone()));
        assert!(game.add_player(bob.clone()));
        (game, alice, bob)
    }

    #[test]
    fn test_new_game_initial_state() {
        let game = Game::new(3);

        assert_eq!(game.id().len(), 6);
        assert_eq!(game.secret_code.len(), shared::CODE_LENGTH);
        assert!(game.secret_code.bytes().all(|b| b.is_ascii_digit()));
        assert_eq!(game.max_players(), 3);
        assert_eq!(game.player_count(), 0);
        assert!(!game.started());
        assert!(!game.finished());
        assert!(game.is_joinable());
        assert!(game.winner.is_none());
        assert!(game.finished_at.is_none());
    }

    #[test]
    fn test_game_id_alphabet() {
        for _ in 0..50 {
            let game = Game::new(2);
            assert!(game
                .id()
                .bytes()
                .all(|b| GAME_ID_CHARS.contains(&b)));
        }
    }

    #[test]
    fn test_player_id_alphabet() {
        for _ in 0..50 {
            let player = Player::new("x");
            assert_eq!(player.id.len(), 8);
            assert!(player.id.bytes().all(|b| PLAYER_ID_CHARS.contains(&b)));
        }
    }

    #[test]
    fn test_admission_bounded_by_max_players() {
        let mut game = Game::with_secret("1234", 2);

        assert!(game.add_player(Player::new("Alice")));
        assert!(game.add_player(Player::new("Bob")));
        assert!(!game.add_player(Player::new("Carol")));
        assert_eq!(game.player_count(), 2);
    }

    #[test]
    fn test_start_transition_observed_exactly_once() {
        let mut game = Game::with_secret("1234", 2);

        game.add_player(Player::new("Alice"));
        assert!(!game.start_if_ready());

        game.add_player(Player::new("Bob"));
        assert!(game.start_if_ready());
        assert!(game.started());

        // Redundant calls are safe no-ops
        assert!(!game.start_if_ready());
        assert!(!game.start_if_ready());
        assert!(game.started());
    }

    #[test]
    fn test_joinable_window() {
        let mut game = Game::with_secret("1234", 2);
        assert!(game.is_joinable());

        game.add_player(Player::new("Alice"));
        assert!(game.is_joinable());

        game.add_player(Player::new("Bob"));
        assert!(!game.is_joinable());
    }

    #[test]
    fn test_winning_guess_finishes_game() {
        let (mut game, alice, _) = full_game("7777");
        game.start_if_ready();

        let outcome = game.check_guess(&alice.id, "7777").unwrap();

        assert_eq!(outcome.black, 4);
        assert_eq!(outcome.white, 0);
        assert!(outcome.is_winner);
        assert!(outcome.game_over);
        assert!(game.finished());
        assert_eq!(game.winner.as_deref(), Some(alice.id.as_str()));
        assert!(game.finished_at.is_some());

        let result = outcome.result.expect("finishing call carries the result");
        assert_eq!(result.winner.as_deref(), Some(alice.id.as_str()));
        assert_eq!(result.secret_code, "7777");
    }

    #[test]
    fn test_attempt_exhaustion_without_win() {
        let (mut game, alice, _) = full_game("1234");
        game.start_if_ready();

        for attempt in 1..shared::MAX_ATTEMPTS {
            let outcome = game.check_guess(&alice.id, "9999").unwrap();
            assert!(!outcome.game_over, "attempt {} ended the game early", attempt);
            assert!(outcome.result.is_none());
        }

        let last = game.check_guess(&alice.id, "9999").unwrap();
        assert!(last.game_over);
        assert!(!last.is_winner);
        assert!(game.finished());
        assert!(game.winner.is_none());
        assert!(last.result.is_some());
    }

    #[test]
    fn test_attempts_tracked_per_player() {
        let (mut game, alice, bob) = full_game("1234");
        game.start_if_ready();

        game.check_guess(&alice.id, "9999").unwrap();
        game.check_guess(&alice.id, "9999").unwrap();
        game.check_guess(&bob.id, "9999").unwrap();

        assert_eq!(game.attempts[&alice.id], 2);
        assert_eq!(game.attempts[&bob.id], 1);
    }

    #[test]
    fn test_turn_pointer_advances_without_enforcement() {
        let (mut game, alice, _) = full_game("1234");
        game.start_if_ready();

        assert_eq!(game.current, 0);
        // Alice guesses twice in a row; both are accepted.
        game.check_guess(&alice.id, "9999").unwrap();
        assert_eq!(game.current, 1);
        game.check_guess(&alice.id, "9999").unwrap();
        assert_eq!(game.current, 0);
    }

    #[test]
    fn test_guess_rejected_after_finish() {
        let (mut game, alice, bob) = full_game("7777");
        game.start_if_ready();

        game.check_guess(&alice.id, "7777").unwrap();
        let err = game.check_guess(&bob.id, "1234").unwrap_err();

        assert_eq!(err, GuessError::Finished);
        assert_eq!(game.attempts[&bob.id], 0);
    }

    #[test]
    fn test_guess_rejected_for_unknown_player() {
        let (mut game, _, _) = full_game("1234");
        game.start_if_ready();

        let err = game.check_guess("not-a-player", "1234").unwrap_err();
        assert_eq!(err, GuessError::UnknownPlayer);
        assert!(!game.finished());
    }

    #[test]
    fn test_admission_rejected_after_finish() {
        let mut game = Game::with_secret("7777", 2);
        let alice = Player::new("Alice");
        game.add_player(alice.clone());
        game.add_player(Player::new("Bob"));
        game.start_if_ready();
        game.check_guess(&alice.id, "7777").unwrap();

        assert!(!game.is_joinable());
        assert!(!game.add_player(Player::new("Carol")));
        assert_eq!(game.player_count(), 2);
    }

    #[test]
    fn test_finishing_transition_happens_once() {
        let (mut game, alice, _) = full_game("7777");
        game.start_if_ready();

        let first = game.check_guess(&alice.id, "7777").unwrap();
        let finished_at = game.finished_at;
        assert!(first.result.is_some());

        // Further guesses cannot re-run the transition or move finished_at
        assert_eq!(
            game.check_guess(&alice.id, "7777").unwrap_err(),
            GuessError::Finished
        );
        assert_eq!(game.finished_at, finished_at);
    }

    #[test]
    fn test_to_result_projection() {
        let (mut game, alice, bob) = full_game("4071");
        game.start_if_ready();
        game.check_guess(&alice.id, "9999").unwrap();
        game.check_guess(&bob.id, "4071").unwrap();

        let result = game.to_result();

        assert_eq!(result.game_id, game.id());
        assert_eq!(result.secret_code, "4071");
        assert_eq!(result.winner.as_deref(), Some(bob.id.as_str()));
        assert!(result.finished_at.is_some());
        assert_eq!(result.players.len(), 2);
        assert_eq!(result.players[0].name, "Alice");
        assert_eq!(result.players[0].attempts, 1);
        assert_eq!(result.players[1].name, "Bob");
        assert_eq!(result.players[1].attempts, 1);
    }

    #[test]
    fn test_result_serialization_omits_missing_winner() {
        let (mut game, alice, _) = full_game("1234");
        game.start_if_ready();
        for _ in 0..shared::MAX_ATTEMPTS {
            let _ = game.check_guess(&alice.id, "9999");
        }

        let json = serde_json::to_string(&game.to_result()).unwrap();
        assert!(!json.contains("\"winner\""));
        assert!(json.contains("\"secret_code\":\"1234\""));
    }
}
