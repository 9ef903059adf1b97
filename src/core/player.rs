//! Player identification and per-player data storage.
//!
//! ## PlayerSlot
//!
//! The board always seats exactly two players. `PlayerSlot` names the seat
//! instead of indexing by number or by field name.
//!
//! ## PlayerPair
//!
//! Fixed two-entry storage indexed by `PlayerSlot`, used for the in-game
//! `Player` records and anything else kept per seat.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    /// First player; always opens a new game.
    One,
    /// Second player.
    Two,
}

impl PlayerSlot {
    /// Both slots in seating order.
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// 1-based seat number, as shown to players.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            PlayerSlot::One => 1,
            PlayerSlot::Two => 2,
        }
    }

    /// The opposing seat.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Parse a 1-based seat number.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use memory_match::core::{PlayerPair, PlayerSlot};
///
/// let mut misses: PlayerPair<u32> = PlayerPair::with_value(0);
/// misses[PlayerSlot::Two] += 1;
///
/// assert_eq!(misses[PlayerSlot::One], 0);
/// assert_eq!(misses[PlayerSlot::Two], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair with values from a factory function.
    pub fn new(factory: impl Fn(PlayerSlot) -> T) -> Self {
        Self {
            data: [factory(PlayerSlot::One), factory(PlayerSlot::Two)],
        }
    }

    /// Create a pair with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, slot: PlayerSlot) -> &T {
        &self.data[slot.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, slot: PlayerSlot) -> &mut T {
        &mut self.data[slot.index()]
    }

    /// Iterate over (PlayerSlot, &T) pairs in seating order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerSlot, &T)> {
        PlayerSlot::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerSlot, &mut T) pairs in seating order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerSlot, &mut T)> {
        PlayerSlot::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerSlot> for PlayerPair<T> {
    type Output = T;

    fn index(&self, slot: PlayerSlot) -> &Self::Output {
        self.get(slot)
    }
}

impl<T> IndexMut<PlayerSlot> for PlayerPair<T> {
    fn index_mut(&mut self, slot: PlayerSlot) -> &mut Self::Output {
        self.get_mut(slot)
    }
}

/// In-game record for one seat.
///
/// Scratch state owned by the match engine; only `display_name` survives a
/// new game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat this record belongs to.
    pub slot: PlayerSlot,

    /// Name shown on the board.
    pub display_name: String,

    /// Accumulated points.
    pub score: u32,

    /// Pairs claimed this game.
    pub pairs_found: u32,

    /// Consecutive matches without an intervening miss.
    pub current_streak: u32,

    /// Mismatched attempts this game.
    pub missed_attempts: u32,
}

impl Player {
    /// Create a zeroed record.
    pub fn new(slot: PlayerSlot, display_name: impl Into<String>) -> Self {
        Self {
            slot,
            display_name: display_name.into(),
            score: 0,
            pairs_found: 0,
            current_streak: 0,
            missed_attempts: 0,
        }
    }

    /// Zero all counters, keeping the name.
    pub fn reset_counters(&mut self) {
        self.score = 0;
        self.pairs_found = 0;
        self.current_streak = 0;
        self.missed_attempts = 0;
    }

    /// Total resolved attempts (matches plus misses).
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.pairs_found + self.missed_attempts
    }

    /// Fraction of attempts that were matches, `None` before any attempt.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        match self.attempts() {
            0 => None,
            total => Some(f64::from(self.pairs_found) / f64::from(total)),
        }
    }
}
