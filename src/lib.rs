//! # memory-match
//!
//! A two-player memory-matching game engine over a creature catalog.
//!
//! ## Design Principles
//!
//! 1. **Engine Never Waits**: `MatchEngine` is a plain state machine. Timed
//!    behavior (how long a pair stays face up) lives in `flow`.
//!
//! 2. **Injected Edges**: The creature source and the session store are
//!    traits, so the table runs the same against a remote catalog, an
//!    in-memory one, a file or nothing at all.
//!
//! 3. **Deterministic When Seeded**: Every shuffle and creature draw goes
//!    through `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Seats, players, RNG, configuration, errors
//! - `cards`: Creature records, cards, deck builder
//! - `engine`: Board state machine and scoring
//! - `flow`: Timed pair resolution and the `GameTable` orchestrator
//! - `session`: Game results, cross-game ledger, persistence gateway
//! - `catalog`: Creature data sources with retry and cache

pub mod core;
pub mod cards;
pub mod engine;
pub mod flow;
pub mod session;
pub mod catalog;

// Re-export commonly used types
pub use crate::core::{
    PlayerSlot, PlayerPair, Player,
    GameRng, GameRngState,
    PairCount, Tuning, MatchConfig,
    ValidationError, CatalogError, PersistenceError, MatchError, MatchResult,
};

pub use crate::cards::{Card, CardId, PairHalf, Visibility, CreatureRecord, build_deck};

pub use crate::engine::{GameStatus, MatchEngine, SelectOutcome, PlayerStats};

pub use crate::flow::{FlowCoordinator, Resolution, SharedEngine, GameTable, DealTicket};

pub use crate::session::{
    GameResult, Winner,
    SessionLedger, SessionTracker, WinTally,
    SessionStore, FileSessionStore, MemorySessionStore, SESSION_STORAGE_KEY,
};

pub use crate::catalog::{
    CreatureSource, fetch_many, CATALOG_IDS,
    CatalogTransport, RawCreature, TransportError, RetryingSource, StaticCatalog,
};
