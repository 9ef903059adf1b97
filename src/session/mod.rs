//! Session ledger: history, win tallies and names across games.
//!
//! ## Key Types
//!
//! - `GameResult` / `Winner`: one immutable record per finished game
//! - `SessionLedger`: the persisted cross-game record
//! - `SessionTracker`: holds the active ledger and applies mutations
//! - `SessionStore`: persistence gateway (`FileSessionStore`,
//!   `MemorySessionStore`)

pub mod ledger;
pub mod result;
pub mod store;

pub use ledger::{SessionLedger, SessionTracker, WinTally};
pub use result::{GameResult, Winner};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore, SESSION_STORAGE_KEY};
