//! Board state machine.
//!
//! `MatchEngine` owns the cards, the two-card selection, turn order and both
//! in-game player records.
//!
//! ## Status transitions
//!
//! ```text
//! Configuring ──begin_loading──▶ Loading ──start_playing──▶ Playing ──finish──▶ Finished
//!      ▲                            │                                              │
//!      └────────abort_loading───────┘◀─────────────begin_loading───────────────────┘
//! ```
//!
//! ## Selection invariants
//!
//! - At most two cards are selected, in selection order
//! - A selected card is `Revealed` (or `Matched` during the short window
//!   after a match, before the selection is cleared)
//! - `matched_pairs * 2` equals the number of `Matched` cards
//!
//! Timing (how long a resolved pair stays visible) is not handled here;
//! see [`crate::flow::FlowCoordinator`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::scoring::{self, PlayerStats};
use crate::cards::{Card, CardId, CreatureRecord, Visibility};
use crate::core::{MatchConfig, MatchError, MatchResult, PairCount, Player, PlayerPair, PlayerSlot, Tuning};
use crate::session::Winner;

/// Lifecycle of one board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// No game yet, or the last deck failed to load.
    #[default]
    Configuring,
    /// Waiting for a deck.
    Loading,
    /// Accepting selections.
    Playing,
    /// Every pair claimed; result recorded.
    Finished,
}

/// What a call to [`MatchEngine::select_card`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing changed.
    Ignored,
    /// First card of the turn revealed.
    Revealed,
    /// Second card revealed; the pair is ready to resolve.
    PairReady,
}

/// Board, turn and per-player score state.
#[derive(Clone, Debug)]
pub struct MatchEngine {
    tuning: Tuning,
    status: GameStatus,
    pair_count: PairCount,
    cards: Vec<Card>,
    selected: SmallVec<[CardId; 2]>,
    current: PlayerSlot,
    players: PlayerPair<Player>,
    matched_pairs: usize,
    processing: bool,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    deal: u64,
}

impl MatchEngine {
    /// Create an empty board in `Configuring` with default player names.
    #[must_use]
    pub fn new(config: &MatchConfig) -> Self {
        let tuning = config.tuning.clone();
        let players = PlayerPair::new(|slot| Player::new(slot, tuning.default_name(slot)));
        Self {
            tuning,
            status: GameStatus::Configuring,
            pair_count: config.pair_count,
            cards: Vec::new(),
            selected: SmallVec::new(),
            current: PlayerSlot::One,
            players,
            matched_pairs: 0,
            processing: false,
            started_at: None,
            ended_at: None,
            deal: 0,
        }
    }

    // === Queries ===

    /// Current status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Pairs needed to finish this board.
    #[must_use]
    pub fn pair_count(&self) -> PairCount {
        self.pair_count
    }

    /// Scoring and timing constants.
    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Look up a card.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|c| &c.id == id)
    }

    /// Selected card ids, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerSlot {
        self.current
    }

    /// A seat's record.
    #[must_use]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot]
    }

    /// Both records.
    #[must_use]
    pub fn players(&self) -> &PlayerPair<Player> {
        &self.players
    }

    /// Summary for a seat.
    #[must_use]
    pub fn stats(&self, slot: PlayerSlot) -> PlayerStats {
        PlayerStats::from(&self.players[slot])
    }

    /// Pairs claimed so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// True while a two-card resolution is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// When the current game started.
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// When the current game finished.
    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    /// Counter bumped whenever the board is replaced or reset.
    ///
    /// Delayed continuations compare it to detect a stale board.
    #[must_use]
    pub fn deal(&self) -> u64 {
        self.deal
    }

    /// True once every pair is claimed while still `Playing`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == GameStatus::Playing && self.matched_pairs == self.pair_count.get()
    }

    /// Whole seconds between start and end (or now, if still running).
    #[must_use]
    pub fn duration_seconds(&self) -> u64 {
        let Some(start) = self.started_at else {
            return 0;
        };
        let end = self.ended_at.unwrap_or_else(Utc::now);
        u64::try_from((end - start).num_seconds()).unwrap_or(0)
    }

    /// Winner by current scores.
    #[must_use]
    pub fn winner(&self) -> Winner {
        scoring::determine_winner(&self.players)
    }

    /// Distinct creatures on the board, in first-seen order.
    #[must_use]
    pub fn creatures_used(&self) -> Vec<CreatureRecord> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.cards
            .iter()
            .filter(|card| seen.insert(card.pair_key))
            .map(Card::creature)
            .collect()
    }

    // === Lifecycle ===

    /// Start waiting for a deck of `pair_count` pairs.
    ///
    /// Allowed from any status; a pending resolution on the old board is
    /// abandoned.
    pub fn begin_loading(&mut self, pair_count: PairCount) {
        self.pair_count = pair_count;
        self.status = GameStatus::Loading;
        self.selected.clear();
        self.processing = false;
        self.deal += 1;
        debug!(pairs = pair_count.get(), "loading deck");
    }

    /// Put a delivered deck on the board and start play.
    ///
    /// Scores, streaks, pairs and misses are zeroed for both seats; names
    /// are kept. Player 1 opens.
    pub fn start_playing(&mut self, cards: Vec<Card>) -> MatchResult<()> {
        self.expect_status(GameStatus::Loading, "start playing")?;

        for (_, player) in self.players.iter_mut() {
            player.reset_counters();
        }
        self.cards = cards;
        self.status = GameStatus::Playing;
        self.current = PlayerSlot::One;
        self.selected.clear();
        self.matched_pairs = 0;
        self.processing = false;
        self.started_at = Some(Utc::now());
        self.ended_at = None;
        self.deal += 1;

        info!(cards = self.cards.len(), pairs = self.pair_count.get(), "game started");
        Ok(())
    }

    /// Deck failed to load: go back to `Configuring`.
    pub fn abort_loading(&mut self) -> MatchResult<()> {
        self.expect_status(GameStatus::Loading, "abort loading")?;
        self.status = GameStatus::Configuring;
        self.processing = false;
        self.selected.clear();
        Ok(())
    }

    /// Mark the game finished and stamp the end time.
    pub fn finish(&mut self) -> MatchResult<()> {
        self.expect_status(GameStatus::Playing, "finish")?;
        self.status = GameStatus::Finished;
        self.ended_at = Some(Utc::now());
        Ok(())
    }

    /// Back to an empty `Configuring` board with default names.
    pub fn reset(&mut self) {
        let config = MatchConfig::new(self.pair_count).with_tuning(self.tuning.clone());
        let deal = self.deal + 1;
        *self = Self::new(&config);
        self.deal = deal;
    }

    // === Turn operations ===

    /// Reveal a card for the current player.
    ///
    /// Silently ignored while a resolution is in flight, when two cards are
    /// already selected, when the card is already selected, matched or
    /// unknown, or when the board is not `Playing`.
    pub fn select_card(&mut self, id: &CardId) -> SelectOutcome {
        if self.status != GameStatus::Playing
            || self.processing
            || self.selected.len() >= 2
            || self.selected.contains(id)
        {
            return SelectOutcome::Ignored;
        }

        let Some(card) = self.cards.iter_mut().find(|c| &c.id == id) else {
            return SelectOutcome::Ignored;
        };
        if card.is_matched() {
            return SelectOutcome::Ignored;
        }

        card.visibility = Visibility::Revealed;
        self.selected.push(id.clone());
        debug!(card = %id, player = %self.current, "card revealed");

        if self.selected.len() == 2 {
            SelectOutcome::PairReady
        } else {
            SelectOutcome::Revealed
        }
    }

    /// Claim a pair for the current player and return the points awarded.
    ///
    /// The selection is left in place.
    pub fn match_cards(&mut self, ids: &[CardId]) -> u32 {
        for card in self.cards.iter_mut().filter(|c| ids.contains(&c.id)) {
            card.visibility = Visibility::Matched;
        }
        self.matched_pairs += 1;

        let player = &mut self.players[self.current];
        let streak = player.current_streak + 1;
        let points = scoring::match_points(&self.tuning, streak);
        player.score = player.score.saturating_add(points);
        player.pairs_found += 1;
        player.current_streak = streak;

        debug!(player = %self.current, streak, points, "pair matched");
        points
    }

    /// Flip the selected cards face down and clear the selection.
    pub fn unmatch_cards(&mut self) {
        let selected = std::mem::take(&mut self.selected);
        for card in self.cards.iter_mut().filter(|c| selected.contains(&c.id)) {
            card.visibility = Visibility::Hidden;
        }
    }

    /// Count a miss against the current player and end their streak.
    pub fn record_miss(&mut self) {
        let player = &mut self.players[self.current];
        player.missed_attempts += 1;
        player.current_streak = 0;
    }

    /// Pass the turn to the other seat.
    pub fn switch_turn(&mut self) {
        self.current = self.current.other();
    }

    /// Drop the selection without touching visibility.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Gate or release selections.
    pub fn set_processing(&mut self, processing: bool) {
        self.processing = processing;
    }

    /// Overwrite a seat's display name.
    pub fn set_player_name(&mut self, slot: PlayerSlot, name: impl Into<String>) {
        self.players[slot].display_name = name.into();
    }

    fn expect_status(&self, expected: GameStatus, action: &'static str) -> MatchResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(MatchError::InvalidTransition {
                from: self.status,
                action,
            })
        }
    }
}
