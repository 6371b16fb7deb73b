use serde::{Deserialize, Serialize};

pub const CODE_LENGTH: usize = 4;
pub const MAX_ATTEMPTS: u32 = 5;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Checks that a guess has the shape the server accepts: exactly four
/// ASCII digits. Both the client (before sending) and the HTTP layer
/// (before touching the game) run this; the scoring code assumes it held.
pub fn is_valid_guess(guess: &str) -> bool {
    guess.len() == CODE_LENGTH && guess.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateGameResponse {
    pub game_id: String,
    pub player_id: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinGameResponse {
    pub player_id: String,
    pub started: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GameStatusResponse {
    pub started: bool,
    pub finished: bool,
    pub players: usize,
    pub max_players: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GuessResponse {
    pub black: u8,
    pub white: u8,
    #[serde(rename = "isWinner")]
    pub is_winner: bool,
    #[serde(rename = "gameOver")]
    pub game_over: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_guess_shapes() {
        assert!(is_valid_guess("0000"));
        assert!(is_valid_guess("1234"));
        assert!(is_valid_guess("9999"));
    }

    #[test]
    fn test_invalid_guess_shapes() {
        assert!(!is_valid_guess(""));
        assert!(!is_valid_guess("123"));
        assert!(!is_valid_guess("12345"));
        assert!(!is_valid_guess("12a4"));
        assert!(!is_valid_guess("12 4"));
        assert!(!is_valid_guess("١٢٣٤")); // non-ASCII digits are rejected
    }

    #[test]
    fn test_guess_response_wire_names() {
        let response = GuessResponse {
            black: 2,
            white: 1,
            is_winner: false,
            game_over: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"isWinner\":false"));
        assert!(json.contains("\"gameOver\":true"));
        assert!(json.contains("\"black\":2"));
        assert!(json.contains("\"white\":1"));
    }

    #[test]
    fn test_status_response_roundtrip() {
        let status = GameStatusResponse {
            started: true,
            finished: false,
            players: 2,
            max_players: 4,
        };

        let json = serde_json::to_string(&status).unwrap();
        let parsed: GameStatusResponse = serde_json::from_str(&json).unwrap();

        assert!(parsed.started);
        assert!(!parsed.finished);
        assert_eq!(parsed.players, 2);
        assert_eq!(parsed.max_players, 4);
    }

    #[test]
    fn test_error_response_shape() {
        let json = "{\"error\":\"Game not found\"}";
        let parsed: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error, "Game not found");
    }
}
