//! Scoring rules.
//!
//! A match is worth `base_points` plus a streak bonus. Accuracy is tracked
//! for reporting and never changes the score.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerPair, PlayerSlot, Tuning};
use crate::session::Winner;

/// Flat part of every non-zero streak bonus.
const STREAK_BONUS_FLOOR: u32 = 10;

/// Bonus for the `streak`-th consecutive match.
///
/// 1st: 0, 2nd: 20, 3rd: 30, 4th: 40 with the default increment.
#[must_use]
pub fn streak_bonus(streak: u32, increment: u32) -> u32 {
    if streak <= 1 {
        0
    } else {
        (streak - 1).saturating_mul(increment).saturating_add(STREAK_BONUS_FLOOR)
    }
}

/// Points awarded for a match that brings the streak to `streak`.
///
/// Saturates at `u32::MAX` for extreme tuning values.
#[must_use]
pub fn match_points(tuning: &Tuning, streak: u32) -> u32 {
    tuning
        .base_points
        .saturating_add(streak_bonus(streak, tuning.streak_bonus_increment))
}

/// Multiplier earned by accuracy: 2.0 at 100%, 1.5 from 80%, 1.25 from 60%.
///
/// Players with no pairs yet get 1.0.
#[must_use]
pub fn accuracy_multiplier(pairs_found: u32, missed_attempts: u32) -> f64 {
    if pairs_found == 0 {
        return 1.0;
    }

    let accuracy = f64::from(pairs_found) / f64::from(pairs_found + missed_attempts);
    if missed_attempts == 0 {
        2.0
    } else if accuracy >= 0.8 {
        1.5
    } else if accuracy >= 0.6 {
        1.25
    } else {
        1.0
    }
}

/// Higher score wins; equal scores tie.
#[must_use]
pub fn determine_winner(players: &PlayerPair<Player>) -> Winner {
    let one = players[PlayerSlot::One].score;
    let two = players[PlayerSlot::Two].score;
    match one.cmp(&two) {
        std::cmp::Ordering::Greater => Winner::Player1,
        std::cmp::Ordering::Less => Winner::Player2,
        std::cmp::Ordering::Equal => Winner::Tie,
    }
}

/// Per-player summary for score panels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    /// Seat.
    pub slot: PlayerSlot,
    /// Display name.
    pub name: String,
    /// Points.
    pub score: u32,
    /// Pairs claimed.
    pub pairs_found: u32,
    /// Misses.
    pub missed_attempts: u32,
    /// Current streak.
    pub current_streak: u32,
    /// Matches over attempts, if any attempt was made.
    pub accuracy: Option<f64>,
    /// See [`accuracy_multiplier`].
    pub accuracy_multiplier: f64,
}

impl From<&Player> for PlayerStats {
    fn from(player: &Player) -> Self {
        Self {
            slot: player.slot,
            name: player.display_name.clone(),
            score: player.score,
            pairs_found: player.pairs_found,
            missed_attempts: player.missed_attempts,
            current_streak: player.current_streak,
            accuracy: player.accuracy(),
            accuracy_multiplier: accuracy_multiplier(player.pairs_found, player.missed_attempts),
        }
    }
}
