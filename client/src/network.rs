//! HTTP client for the game server API
//!
//! Wraps the four server endpoints behind typed methods. Server-side
//! rejections (unknown game, full game, malformed guess) surface as
//! [`ClientError::Server`] carrying the server's error message, so the
//! console layer can print them verbatim.

use serde::de::DeserializeOwned;
use shared::{
    CreateGameResponse, ErrorResponse, GameStatusResponse, GuessResponse, JoinGameResponse,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server rejected the request and explained why.
    #[error("{0}")]
    Server(String),
    /// Transport-level failure (connection refused, timeout, bad JSON).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Typed access to the game server's HTTP API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for a server base URL such as
    /// `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_game(
        &self,
        max_players: usize,
        creator_name: &str,
    ) -> Result<CreateGameResponse, ClientError> {
        let form = [
            ("max_players", max_players.to_string()),
            ("creator_name", creator_name.to_string()),
        ];
        self.post_form("/create", &form).await
    }

    pub async fn join_game(
        &self,
        game_id: &str,
        name: &str,
    ) -> Result<JoinGameResponse, ClientError> {
        let form = [
            ("game_id", game_id.to_string()),
            ("name", name.to_string()),
        ];
        self.post_form("/join", &form).await
    }

    pub async fn make_guess(
        &self,
        game_id: &str,
        player_id: &str,
        guess: &str,
    ) -> Result<GuessResponse, ClientError> {
        let form = [
            ("game_id", game_id.to_string()),
            ("player_id", player_id.to_string()),
            ("guess", guess.to_string()),
        ];
        self.post_form("/guess", &form).await
    }

    pub async fn game_status(&self, game_id: &str) -> Result<GameStatusResponse, ClientError> {
        let url = format!("{}/game/{}/status", self.base_url, game_id);
        let response = self.http.get(&url).send().await?;
        Self::parse(response).await
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).form(form).send().await?;
        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            return Ok(response.json::<T>().await?);
        }

        let status = response.status();
        match response.json::<ErrorResponse>().await {
            Ok(body) => Err(ClientError::Server(body.error)),
            Err(_) => Err(ClientError::Server(format!(
                "request failed with status {}",
                status
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_stored_verbatim() {
        let api = ApiClient::new("http://127.0.0.1:9000");
        assert_eq!(api.base_url(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_server_error_display() {
        let err = ClientError::Server("Game not found".to_string());
        assert_eq!(err.to_string(), "Game not found");
    }
}
