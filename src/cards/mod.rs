//! Cards, creature records, and the deck builder.
//!
//! ## Key Types
//!
//! - `CreatureRecord`: catalog data for one creature
//! - `CardId`: unique id of a card instance (`"<creature>-a"` / `"-b"`)
//! - `Visibility`: Hidden / Revealed / Matched
//! - `Card`: one tile on the board
//! - `build_deck`: pairs every creature and shuffles the result

pub mod card;
pub mod creature;
pub mod deck;

pub use card::{Card, CardId, PairHalf, Visibility};
pub use creature::CreatureRecord;
pub use deck::build_deck;
