//! The table: one board, one session, one data source.
//!
//! `GameTable` wires the engine, the pair coordinator, the session tracker
//! and the persistence gateway together. It owns the operations a front
//! end calls: start a game, pick cards, rename players, clear history,
//! reset.
//!
//! ## Deck delivery
//!
//! Starting a game is split in two so a caller can fetch on its own
//! schedule:
//!
//! 1. [`GameTable::request_deal`] validates the size, moves the board to
//!    `Loading` and hands out a [`DealTicket`]
//! 2. [`GameTable::deliver_deal`] takes the ticket and the fetch outcome
//!
//! A ticket is only honored if no later request was made, so a slow fetch
//! can never overwrite a newer board. [`GameTable::start_game`] does both
//! steps with the table's own source.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{error, info, warn};

use super::coordinator::{FlowCoordinator, SharedEngine};
use crate::cards::{build_deck, CardId, CreatureRecord};
use crate::catalog::{fetch_many, CreatureSource};
use crate::core::{
    CatalogError, GameRng, MatchConfig, MatchResult, PairCount, PlayerPair, PlayerSlot, ValidationError,
};
use crate::engine::{GameStatus, MatchEngine, PlayerStats, SelectOutcome};
use crate::session::{GameResult, SessionLedger, SessionStore, SessionTracker, WinTally};

/// Claim on a pending deck, issued by [`GameTable::request_deal`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DealTicket {
    generation: u64,
    pair_count: PairCount,
}

impl DealTicket {
    /// Pairs the deck must hold.
    #[must_use]
    pub fn pair_count(&self) -> PairCount {
        self.pair_count
    }
}

/// Orchestrates one two-player table.
pub struct GameTable<S, P> {
    config: MatchConfig,
    engine: SharedEngine,
    flow: FlowCoordinator,
    session: SessionTracker,
    store: P,
    source: S,
    rng: GameRng,
    generation: u64,
}

impl<S, P> GameTable<S, P>
where
    S: CreatureSource,
    P: SessionStore,
{
    /// Open a table, restoring the persisted session or starting a new one.
    ///
    /// Names from the session are applied to the board.
    pub fn open(config: MatchConfig, source: S, store: P, rng: GameRng) -> Self {
        let engine = Arc::new(Mutex::new(MatchEngine::new(&config)));
        let flow = FlowCoordinator::new(Arc::clone(&engine));
        let mut session = SessionTracker::new(&config.tuning);

        match store.load() {
            Some(ledger) => session.load_session(ledger),
            None => {
                session.start_session(None, None);
                if let Some(ledger) = session.current() {
                    store.save(ledger);
                }
            }
        }

        let table = Self {
            config,
            engine,
            flow,
            session,
            store,
            source,
            rng,
            generation: 0,
        };
        table.sync_names();
        table
    }

    // === Queries ===

    /// Active configuration. The pair count follows the last deal.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Shared board handle.
    #[must_use]
    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// Copy of the board as it is right now.
    #[must_use]
    pub fn snapshot(&self) -> MatchEngine {
        self.engine.lock().clone()
    }

    /// Current board status.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.engine.lock().status()
    }

    /// Per-seat summaries for the current board.
    #[must_use]
    pub fn player_stats(&self) -> PlayerPair<PlayerStats> {
        let engine = self.engine.lock();
        PlayerPair::new(|slot| engine.stats(slot))
    }

    /// The active session ledger.
    #[must_use]
    pub fn ledger(&self) -> Option<&SessionLedger> {
        self.session.current()
    }

    /// Session win tallies.
    #[must_use]
    pub fn wins(&self) -> WinTally {
        self.session.wins()
    }

    /// The persistence gateway.
    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }

    /// The creature source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// True while a pair is waiting out its delay.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.flow.is_resolving()
    }

    // === Deck lifecycle ===

    /// Validate the size and move the board to `Loading`.
    ///
    /// `None` reuses the last pair count. Any pending resolution on the old
    /// board is dropped and every earlier ticket goes stale.
    pub fn request_deal(&mut self, pair_count: Option<usize>) -> MatchResult<DealTicket> {
        let pair_count = match pair_count {
            Some(count) => PairCount::new(count)?,
            None => self.config.pair_count,
        };

        self.config.pair_count = pair_count;
        self.generation += 1;
        self.flow.cancel();
        self.engine.lock().begin_loading(pair_count);

        Ok(DealTicket {
            generation: self.generation,
            pair_count,
        })
    }

    /// Hand over the outcome of a fetch.
    ///
    /// Returns `Ok(false)` if the ticket is stale and the deck was dropped.
    /// A failed fetch, or a list that does not hold exactly one record per
    /// pair with distinct ids, puts the board back in `Configuring` and is
    /// returned as `DataSource`.
    pub fn deliver_deal(
        &mut self,
        ticket: DealTicket,
        creatures: Result<Vec<CreatureRecord>, CatalogError>,
    ) -> MatchResult<bool> {
        if ticket.generation != self.generation {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding deck for a superseded request"
            );
            return Ok(false);
        }

        match creatures.and_then(|records| check_deal(records, ticket.pair_count)) {
            Ok(creatures) => {
                let deck = build_deck(&creatures, &mut self.rng);
                self.engine.lock().start_playing(deck)?;
                Ok(true)
            }
            Err(err) => {
                error!(%err, "failed to load creatures");
                self.engine.lock().abort_loading()?;
                Err(err.into())
            }
        }
    }

    /// Fetch a fresh deck from the table's source and start play.
    pub async fn start_game(&mut self, pair_count: Option<usize>) -> MatchResult<()> {
        let ticket = self.request_deal(pair_count)?;
        let creatures = fetch_many(&self.source, ticket.pair_count.get(), &mut self.rng).await;
        self.deliver_deal(ticket, creatures).map(|_| ())
    }

    // === Play ===

    /// Select a card for the current player.
    ///
    /// Completes the game if this selection claimed the last pair.
    pub fn select_card(&mut self, id: &CardId) -> SelectOutcome {
        let outcome = self.flow.select_card(id);
        self.check_completion();
        outcome
    }

    /// Wait until the pending pair resolution has run.
    pub async fn settle(&mut self) {
        self.flow.settle().await;
    }

    /// Finish the game if every pair is claimed.
    ///
    /// Records the result, bumps the tally and saves the session. Returns
    /// the result the first time only.
    pub fn check_completion(&mut self) -> Option<GameResult> {
        let result = {
            let mut engine = self.engine.lock();
            if !engine.is_complete() {
                return None;
            }
            engine.finish().ok()?;
            GameResult::from_engine(&engine)
        };

        info!(
            winner = ?result.winner,
            p1 = result.player1_score,
            p2 = result.player2_score,
            "game finished"
        );
        self.session.add_game_to_history(result.clone());
        self.session.increment_wins(result.winner);
        self.persist();
        Some(result)
    }

    // === Session ===

    /// Rename one seat on the board and in the session.
    pub fn rename_player(&mut self, slot: PlayerSlot, name: &str) -> MatchResult<()> {
        let name = self.config.tuning.validate_name(name)?;

        let [mut player1, mut player2] = self.session.player_names();
        match slot {
            PlayerSlot::One => player1 = name.clone(),
            PlayerSlot::Two => player2 = name.clone(),
        }
        self.session.update_player_names(player1, player2);
        self.engine.lock().set_player_name(slot, name);
        self.persist();
        Ok(())
    }

    /// Empty the session history. Win tallies are kept.
    pub fn clear_history(&mut self) {
        if self.session.clear_history() {
            self.persist();
        }
    }

    /// Back to an empty board with default names, in the session too.
    pub fn reset_board(&mut self) {
        self.generation += 1;
        self.flow.cancel();
        self.engine.lock().reset();

        let [player1, player2] = self.config.tuning.default_names.clone();
        if self.session.update_player_names(player1, player2) {
            self.persist();
        }
    }

    /// Start a fresh session, replacing the active one.
    pub fn new_session(&mut self, player1_name: Option<&str>, player2_name: Option<&str>) {
        self.session.start_session(player1_name, player2_name);
        self.sync_names();
        self.persist();
    }

    /// Drop the active session and its persisted blob.
    ///
    /// Later games are not recorded until [`GameTable::new_session`].
    pub fn end_session(&mut self) {
        self.session.end_session();
        self.store.clear();
    }

    fn sync_names(&self) {
        let [player1, player2] = self.session.player_names();
        let mut engine = self.engine.lock();
        engine.set_player_name(PlayerSlot::One, player1);
        engine.set_player_name(PlayerSlot::Two, player2);
    }

    fn persist(&self) {
        if let Some(ledger) = self.session.current() {
            self.store.save(ledger);
        }
    }
}

/// A deck needs one record per pair, no creature twice.
fn check_deal(creatures: Vec<CreatureRecord>, pair_count: PairCount) -> Result<Vec<CreatureRecord>, CatalogError> {
    if creatures.len() != pair_count.get() {
        return Err(ValidationError::InvalidCount(creatures.len()).into());
    }
    let mut seen = FxHashSet::default();
    if let Some(dup) = creatures.iter().find(|c| !seen.insert(c.id)) {
        return Err(ValidationError::DuplicateCreature(dup.id).into());
    }
    Ok(creatures)
}

impl<S, P> std::fmt::Debug for GameTable<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameTable")
            .field("config", &self.config)
            .field("status", &self.engine.lock().status())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
