//! Line-oriented interactive console
//!
//! Menu loop mirroring the server's game flow: create or join a game,
//! wait for the table to fill, then submit guesses until the game ends.
//! Guess shape is validated locally before any request leaves the
//! process; server rejections are printed verbatim.

use crate::network::{ApiClient, ClientError};
use log::debug;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::sleep;

/// How often the lobby polls the status endpoint while waiting for
/// players.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct Console {
    api: ApiClient,
    input: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Runs the top-level menu until the user exits or stdin closes.
    pub async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            println!("\n1. Create game");
            println!("2. Join game");
            println!("3. Exit");
            print!("Choose option: ");
            flush_stdout();

            let option = match self.read_line().await? {
                Some(line) => line,
                None => return Ok(()),
            };

            let outcome = match option.as_str() {
                "1" => self.create_game().await,
                "2" => self.join_game().await,
                "3" => return Ok(()),
                _ => {
                    println!("Invalid option");
                    continue;
                }
            };

            if let Err(e) = outcome {
                println!("Error: {}", e);
            }
        }
    }

    async fn create_game(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        print!(
            "Enter number of players ({}-{}): ",
            shared::MIN_PLAYERS,
            shared::MAX_PLAYERS
        );
        flush_stdout();
        let max_players = self.read_player_count().await?;

        print!("Enter your name: ");
        flush_stdout();
        let name = match self.read_line().await? {
            Some(name) => name,
            None => return Ok(()),
        };

        let created = self.api.create_game(max_players, &name).await?;
        println!("\nGame created! ID: {}", created.game_id);
        println!("Waiting for other players to join...");

        self.wait_for_start(&created.game_id).await?;
        self.player_menu(&created.game_id, &created.player_id).await
    }

    async fn join_game(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        print!("Enter game ID: ");
        flush_stdout();
        let game_id = match self.read_line().await? {
            Some(id) => id,
            None => return Ok(()),
        };

        print!("Enter your name: ");
        flush_stdout();
        let name = match self.read_line().await? {
            Some(name) => name,
            None => return Ok(()),
        };

        let joined = self.api.join_game(&game_id, &name).await?;

        if !joined.started {
            println!("\nWaiting for other players...");
            self.wait_for_start(&game_id).await?;
        } else {
            println!("\nGame started!");
        }

        self.player_menu(&game_id, &joined.player_id).await
    }

    /// Polls the status endpoint until the game reports started.
    async fn wait_for_start(&self, game_id: &str) -> Result<(), ClientError> {
        loop {
            let status = self.api.game_status(game_id).await?;
            debug!(
                "Game {}: {}/{} players, started: {}",
                game_id, status.players, status.max_players, status.started
            );

            if status.started {
                println!("\nGame started!");
                return Ok(());
            }

            print!("\rPlayers: {}/{}", status.players, status.max_players);
            flush_stdout();
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn player_menu(
        &mut self,
        game_id: &str,
        player_id: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            println!("\n1. Make guess");
            println!("2. Exit game");
            print!("Choose option: ");
            flush_stdout();

            let option = match self.read_line().await? {
                Some(line) => line,
                None => return Ok(()),
            };

            match option.as_str() {
                "1" => {
                    print!("Enter your guess ({} digits): ", shared::CODE_LENGTH);
                    flush_stdout();
                    let guess = match self.read_line().await? {
                        Some(guess) => guess,
                        None => return Ok(()),
                    };

                    if !shared::is_valid_guess(&guess) {
                        println!("Guess must be {} digits", shared::CODE_LENGTH);
                        continue;
                    }

                    let result = self.api.make_guess(game_id, player_id, &guess).await?;
                    println!("Black markers: {} (correct digit and position)", result.black);
                    println!("White markers: {} (correct digit, wrong position)", result.white);

                    if result.game_over {
                        if result.is_winner {
                            println!("Congratulations! You won!");
                        } else {
                            println!("Game over! You didn't guess the code.");
                        }
                        return Ok(());
                    }
                }
                "2" => return Ok(()),
                _ => println!("Invalid option"),
            }
        }
    }

    async fn read_player_count(&mut self) -> Result<usize, Box<dyn std::error::Error>> {
        match self.read_line().await? {
            Some(line) => Ok(parse_player_count(&line).unwrap_or_else(|| {
                println!(
                    "Please enter a number between {} and {}; using {}",
                    shared::MIN_PLAYERS,
                    shared::MAX_PLAYERS,
                    shared::MIN_PLAYERS
                );
                shared::MIN_PLAYERS
            })),
            None => Ok(shared::MIN_PLAYERS),
        }
    }

    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self
            .input
            .next_line()
            .await?
            .map(|line| line.trim().to_string()))
    }
}

/// Parses a player count, accepting only the supported window.
fn parse_player_count(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|n| (shared::MIN_PLAYERS..=shared::MAX_PLAYERS).contains(n))
}

fn flush_stdout() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player_count_accepts_window() {
        assert_eq!(parse_player_count("2"), Some(2));
        assert_eq!(parse_player_count("3"), Some(3));
        assert_eq!(parse_player_count("4"), Some(4));
        assert_eq!(parse_player_count(" 3 "), Some(3));
    }

    #[test]
    fn test_parse_player_count_rejects_out_of_range() {
        assert_eq!(parse_player_count("1"), None);
        assert_eq!(parse_player_count("5"), None);
        assert_eq!(parse_player_count("0"), None);
        assert_eq!(parse_player_count("-2"), None);
        assert_eq!(parse_player_count("abc"), None);
        assert_eq!(parse_player_count(""), None);
    }
}
