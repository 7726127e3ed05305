//! Tournament Runner for Isola engines
//!
//! This crate provides infrastructure for:
//! - Playing headless matches between engines on a configurable board
//! - Tracking Elo ratings across engine versions and settings
//! - Saving match results as JSON reports
//!
//! # Usage
//!
//! ```bash
//! # Alpha-beta at depth 4 against the random baseline
//! cargo run -p tournament -- match alphabeta:4 random --games 20
//!
//! # One challenger against every built-in opponent
//! cargo run -p tournament -- gauntlet alphabeta --games 10 --time 500
//! ```

mod elo;
mod error;
mod match_runner;
mod results;

pub use elo::*;
pub use error::TournamentError;
pub use match_runner::*;
pub use results::*;
