//! Match engine: board state machine and scoring.
//!
//! - `MatchEngine`: cards, selection, turn order, per-player scores
//! - `GameStatus`: Configuring / Loading / Playing / Finished
//! - `scoring`: streak bonus, accuracy multiplier, winner resolution
//!
//! The engine never waits and never detects its own completion; the
//! [`crate::flow`] layer drives both.

pub mod board;
pub mod scoring;

pub use board::{GameStatus, MatchEngine, SelectOutcome};
pub use scoring::{accuracy_multiplier, determine_winner, match_points, streak_bonus, PlayerStats};
