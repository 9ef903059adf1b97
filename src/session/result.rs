//! Completed-game records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cards::CreatureRecord;
use crate::core::PlayerSlot;
use crate::engine::MatchEngine;

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Seat 1 scored higher.
    Player1,
    /// Seat 2 scored higher.
    Player2,
    /// Equal scores.
    Tie,
}

impl Winner {
    /// The winning seat, `None` on a tie.
    #[must_use]
    pub fn slot(self) -> Option<PlayerSlot> {
        match self {
            Winner::Player1 => Some(PlayerSlot::One),
            Winner::Player2 => Some(PlayerSlot::Two),
            Winner::Tie => None,
        }
    }
}

impl From<PlayerSlot> for Winner {
    fn from(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => Winner::Player1,
            PlayerSlot::Two => Winner::Player2,
        }
    }
}

/// Immutable record of one completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// Unique id.
    pub id: Uuid,

    /// When the game was recorded.
    pub timestamp: DateTime<Utc>,

    /// Pairs on the board.
    pub pair_count: usize,

    /// Seat 1 name at completion.
    pub player1_name: String,

    /// Seat 1 final score.
    pub player1_score: u32,

    /// Seat 2 name at completion.
    pub player2_name: String,

    /// Seat 2 final score.
    pub player2_score: u32,

    /// Strict score comparison.
    pub winner: Winner,

    /// Whole seconds played.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,

    /// Distinct creatures on the board, first-seen order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creatures_used: Option<Vec<CreatureRecord>>,
}

impl GameResult {
    /// Snapshot a board's final scores.
    #[must_use]
    pub fn from_engine(engine: &MatchEngine) -> Self {
        let one = engine.player(PlayerSlot::One);
        let two = engine.player(PlayerSlot::Two);
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            pair_count: engine.pair_count().get(),
            player1_name: one.display_name.clone(),
            player1_score: one.score,
            player2_name: two.display_name.clone(),
            player2_score: two.score,
            winner: engine.winner(),
            duration_seconds: Some(engine.duration_seconds()),
            creatures_used: Some(engine.creatures_used()),
        }
    }

    /// Name of the winner, `None` on a tie.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            Winner::Player1 => Some(&self.player1_name),
            Winner::Player2 => Some(&self.player2_name),
            Winner::Tie => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_slot() {
        assert_eq!(Winner::Player1.slot(), Some(PlayerSlot::One));
        assert_eq!(Winner::Player2.slot(), Some(PlayerSlot::Two));
        assert_eq!(Winner::Tie.slot(), None);
        assert_eq!(Winner::from(PlayerSlot::Two), Winner::Player2);
    }

    #[test]
    fn test_winner_serde() {
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"tie\"");
        assert_eq!(serde_json::from_str::<Winner>("\"player2\"").unwrap(), Winner::Player2);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let result = GameResult {
            id: Uuid::nil(),
            timestamp: Utc::now(),
            pair_count: 6,
            player1_name: "Ash".into(),
            player1_score: 300,
            player2_name: "Misty".into(),
            player2_score: 220,
            winner: Winner::Player1,
            duration_seconds: None,
            creatures_used: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("durationSeconds").is_none());
        assert!(json.get("creaturesUsed").is_none());
        assert_eq!(json["player1Score"], 300);
        assert_eq!(result.winner_name(), Some("Ash"));
    }
}
