//! Cross-game session ledger.
//!
//! `SessionLedger` is the persisted record: history, win tallies and the
//! player names. `SessionTracker` holds the active ledger (if any) and
//! applies the mutating operations, refreshing `last_updated` on each.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::result::{GameResult, Winner};
use crate::core::{PlayerSlot, Tuning};

/// Running win/tie counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinTally {
    /// Games won by seat 1.
    pub player1_wins: u32,
    /// Games won by seat 2.
    pub player2_wins: u32,
    /// Tied games.
    pub ties: u32,
}

impl WinTally {
    /// Bump exactly one counter.
    pub fn record(&mut self, winner: Winner) {
        match winner {
            Winner::Player1 => self.player1_wins += 1,
            Winner::Player2 => self.player2_wins += 1,
            Winner::Tie => self.ties += 1,
        }
    }

    /// Counter for one outcome.
    #[must_use]
    pub fn for_winner(&self, winner: Winner) -> u32 {
        match winner {
            Winner::Player1 => self.player1_wins,
            Winner::Player2 => self.player2_wins,
            Winner::Tie => self.ties,
        }
    }

    /// Games counted so far.
    #[must_use]
    pub fn games(&self) -> u32 {
        self.player1_wins + self.player2_wins + self.ties
    }
}

/// Persisted cross-game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLedger {
    /// Session id.
    pub id: Uuid,

    /// When the session was created.
    pub started_at: DateTime<Utc>,

    /// Last mutation.
    pub last_updated: DateTime<Utc>,

    /// Completed games, oldest first.
    pub history: Vector<GameResult>,

    /// Win/tie counters. Not reset by clearing history.
    pub wins: WinTally,

    /// Seat 1 name.
    pub player1_name: String,

    /// Seat 2 name.
    pub player2_name: String,
}

impl SessionLedger {
    /// Create an empty ledger.
    pub fn new(player1_name: impl Into<String>, player2_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            started_at: now,
            last_updated: now,
            history: Vector::new(),
            wins: WinTally::default(),
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
        }
    }

    /// Name for a seat.
    #[must_use]
    pub fn player_name(&self, slot: PlayerSlot) -> &str {
        match slot {
            PlayerSlot::One => &self.player1_name,
            PlayerSlot::Two => &self.player2_name,
        }
    }

    fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// Holder of the active ledger.
///
/// Mutations on an empty tracker are no-ops and return `false`.
#[derive(Clone, Debug, Default)]
pub struct SessionTracker {
    ledger: Option<SessionLedger>,
    default_names: [String; 2],
}

impl SessionTracker {
    /// Create a tracker with no active ledger.
    #[must_use]
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            ledger: None,
            default_names: tuning.default_names.clone(),
        }
    }

    /// The active ledger.
    #[must_use]
    pub fn current(&self) -> Option<&SessionLedger> {
        self.ledger.as_ref()
    }

    /// Start a fresh ledger. Missing or empty names fall back to defaults.
    pub fn start_session(&mut self, player1_name: Option<&str>, player2_name: Option<&str>) {
        let pick = |name: Option<&str>, slot: PlayerSlot| match name {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => self.default_names[slot.index()].clone(),
        };
        let ledger = SessionLedger::new(pick(player1_name, PlayerSlot::One), pick(player2_name, PlayerSlot::Two));
        info!(session = %ledger.id, "session started");
        self.ledger = Some(ledger);
    }

    /// Replace the active ledger wholesale.
    pub fn load_session(&mut self, ledger: SessionLedger) {
        info!(session = %ledger.id, games = ledger.history.len(), "session restored");
        self.ledger = Some(ledger);
    }

    /// Drop the active ledger.
    pub fn end_session(&mut self) {
        self.ledger = None;
    }

    /// Append a completed game.
    pub fn add_game_to_history(&mut self, result: GameResult) -> bool {
        self.mutate(|ledger| ledger.history.push_back(result))
    }

    /// Bump the tally for `winner`.
    pub fn increment_wins(&mut self, winner: Winner) -> bool {
        self.mutate(|ledger| ledger.wins.record(winner))
    }

    /// Overwrite both names.
    pub fn update_player_names(&mut self, player1_name: impl Into<String>, player2_name: impl Into<String>) -> bool {
        let (one, two) = (player1_name.into(), player2_name.into());
        self.mutate(|ledger| {
            ledger.player1_name = one;
            ledger.player2_name = two;
        })
    }

    /// Empty the history. Tallies are kept.
    pub fn clear_history(&mut self) -> bool {
        self.mutate(|ledger| ledger.history.clear())
    }

    /// Names from the ledger, or the defaults with no active ledger.
    #[must_use]
    pub fn player_names(&self) -> [String; 2] {
        match &self.ledger {
            Some(ledger) => [ledger.player1_name.clone(), ledger.player2_name.clone()],
            None => self.default_names.clone(),
        }
    }

    /// Tallies, zero with no active ledger.
    #[must_use]
    pub fn wins(&self) -> WinTally {
        self.ledger.as_ref().map(|l| l.wins).unwrap_or_default()
    }

    fn mutate(&mut self, apply: impl FnOnce(&mut SessionLedger)) -> bool {
        match self.ledger.as_mut() {
            Some(ledger) => {
                apply(ledger);
                ledger.touch();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(winner: Winner) -> GameResult {
        GameResult {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            pair_count: 8,
            player1_name: "Ash".into(),
            player1_score: 150,
            player2_name: "Misty".into(),
            player2_score: 150,
            winner,
            duration_seconds: Some(42),
            creatures_used: None,
        }
    }

    fn tracker() -> SessionTracker {
        let mut tracker = SessionTracker::new(&Tuning::default());
        tracker.start_session(None, None);
        tracker
    }

    #[test]
    fn test_start_session_defaults() {
        let tracker = tracker();
        let ledger = tracker.current().unwrap();
        assert_eq!(ledger.player1_name, "Jugador 1");
        assert_eq!(ledger.player2_name, "Jugador 2");
        assert!(ledger.history.is_empty());
        assert_eq!(ledger.wins, WinTally::default());
    }

    #[test]
    fn test_start_session_with_names() {
        let mut tracker = SessionTracker::new(&Tuning::default());
        tracker.start_session(Some("Ash"), Some(""));
        assert_eq!(tracker.player_names(), ["Ash".to_string(), "Jugador 2".to_string()]);
    }

    #[test]
    fn test_mutations_without_ledger_are_noops() {
        let mut tracker = SessionTracker::new(&Tuning::default());
        assert!(!tracker.add_game_to_history(result(Winner::Tie)));
        assert!(!tracker.increment_wins(Winner::Tie));
        assert!(!tracker.clear_history());
        assert!(tracker.current().is_none());
        assert_eq!(tracker.wins(), WinTally::default());
    }

    #[test]
    fn test_increment_tie_only_touches_ties() {
        let mut tracker = tracker();
        tracker.increment_wins(Winner::Tie);
        let wins = tracker.wins();
        assert_eq!(wins.ties, 1);
        assert_eq!(wins.player1_wins, 0);
        assert_eq!(wins.player2_wins, 0);
    }

    #[test]
    fn test_mutation_refreshes_last_updated() {
        let mut tracker = tracker();
        let before = tracker.current().unwrap().last_updated;
        tracker.update_player_names("Ash", "Misty");
        let ledger = tracker.current().unwrap();
        assert!(ledger.last_updated >= before);
        assert_eq!(ledger.player_name(PlayerSlot::Two), "Misty");
    }

    #[test]
    fn test_clear_history_keeps_tallies() {
        let mut tracker = tracker();
        tracker.add_game_to_history(result(Winner::Player1));
        tracker.increment_wins(Winner::Player1);

        tracker.clear_history();

        let ledger = tracker.current().unwrap();
        assert!(ledger.history.is_empty());
        assert_eq!(ledger.wins.player1_wins, 1);
    }

    #[test]
    fn test_end_session() {
        let mut tracker = tracker();
        tracker.end_session();
        assert!(tracker.current().is_none());
    }

    #[test]
    fn test_tally_helpers() {
        let mut tally = WinTally::default();
        tally.record(Winner::Player2);
        tally.record(Winner::Player2);
        tally.record(Winner::Tie);
        assert_eq!(tally.games(), 3);
        assert_eq!(tally.for_winner(Winner::Player2), 2);
        assert_eq!(tally.for_winner(Winner::Player1), 0);
    }
}
