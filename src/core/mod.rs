//! Core types: seats and players, RNG, configuration, errors.
//!
//! Everything here is independent of board and session state.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{MatchConfig, PairCount, Tuning};
pub use error::{CatalogError, MatchError, MatchResult, PersistenceError, ValidationError};
pub use player::{Player, PlayerPair, PlayerSlot};
pub use rng::{GameRng, GameRngState};
