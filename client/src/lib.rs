//! # Codebreaker Console Client Library
//!
//! Interactive client for the codebreaker game server. The client speaks
//! the server's HTTP API and drives the whole game flow from a terminal:
//! creating or joining a game, waiting in the lobby until the table is
//! full, then submitting guesses and printing the black/white peg
//! feedback until the game ends.
//!
//! ## Module Organization
//!
//! ### Network Module (`network`)
//! Typed HTTP access ([`network::ApiClient`]) to the four server
//! endpoints, with server rejections surfaced as printable errors.
//!
//! ### Console Module (`console`)
//! The line-oriented menu loop over stdin, including local guess-shape
//! validation and the 2-second lobby polling loop.

pub mod console;
pub mod network;
