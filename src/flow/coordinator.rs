//! Timed resolution of a revealed pair.
//!
//! When a selection reaches two cards the coordinator resolves it at once
//! (score or miss) and schedules the visual follow-up after a fixed delay:
//!
//! - **Match**: after `match_delay`, clear the selection
//! - **Mismatch**: after `mismatch_delay`, flip both cards back and pass
//!   the turn
//!
//! `is_processing` stays set for the whole window, so the engine ignores
//! further selections until the continuation runs. Only one continuation
//! is ever pending; it is aborted on [`FlowCoordinator::cancel`] or drop and
//! skips itself if the board was replaced in the meantime. Without a Tokio
//! runtime the follow-up runs immediately.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::cards::CardId;
use crate::engine::{MatchEngine, SelectOutcome};

/// Board shared between the table and pending continuations.
pub type SharedEngine = Arc<Mutex<MatchEngine>>;

/// How a two-card selection resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Same pair; the current player scored `points`.
    Match {
        /// Points credited.
        points: u32,
    },
    /// Different pairs; the current player missed.
    Mismatch,
}

/// Drives pair resolution and its delayed continuation.
#[derive(Debug)]
pub struct FlowCoordinator {
    engine: SharedEngine,
    match_delay: Duration,
    mismatch_delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl FlowCoordinator {
    /// Create a coordinator using the engine's tuning for delays.
    pub fn new(engine: SharedEngine) -> Self {
        let (match_delay, mismatch_delay) = {
            let guard = engine.lock();
            (guard.tuning().match_delay(), guard.tuning().mismatch_delay())
        };
        Self {
            engine,
            match_delay,
            mismatch_delay,
            pending: None,
        }
    }

    /// The shared board.
    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    /// True while a continuation is scheduled and has not run.
    pub fn is_resolving(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Select a card and resolve the pair if it completes one.
    pub fn select_card(&mut self, id: &CardId) -> SelectOutcome {
        let outcome = self.engine.lock().select_card(id);
        if outcome == SelectOutcome::PairReady {
            self.resolve_pair();
        }
        outcome
    }

    /// Resolve the current two-card selection, if there is one and no
    /// resolution is in flight.
    ///
    /// The follow-up runs after the configured delay on the current Tokio
    /// runtime. Outside a runtime it runs immediately.
    pub fn resolve_pair(&mut self) -> Option<Resolution> {
        let mut engine = self.engine.lock();
        if engine.is_processing() || engine.selected().len() != 2 {
            return None;
        }

        let first = engine.selected()[0].clone();
        let second = engine.selected()[1].clone();
        let is_pair = match (engine.card(&first), engine.card(&second)) {
            (Some(a), Some(b)) => a.pairs_with(b),
            _ => return None,
        };
        engine.set_processing(true);

        let deal = engine.deal();
        let (resolution, delay) = if is_pair {
            let points = engine.match_cards(&[first, second]);
            (Resolution::Match { points }, self.match_delay)
        } else {
            engine.record_miss();
            (Resolution::Mismatch, self.mismatch_delay)
        };
        drop(engine);

        // Processing was clear, so any earlier continuation has done its work.
        self.cancel();

        debug!(?resolution, ?delay, "pair resolved");
        match Handle::try_current() {
            Ok(runtime) => {
                let shared = Arc::clone(&self.engine);
                self.pending = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    complete(&mut shared.lock(), deal, resolution);
                }));
            }
            Err(_) => {
                debug!("no runtime, completing without delay");
                complete(&mut self.engine.lock(), deal, resolution);
            }
        }

        Some(resolution)
    }

    /// Wait for the pending continuation, if any, to run.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.pending.take() {
            // Only fails if the task was aborted, which leaves nothing to wait for.
            let _ = handle.await;
        }
    }

    /// Abort the pending continuation without touching the board.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

/// Delayed half of a resolution: clear the selection after a match, flip
/// back and pass the turn after a miss.
fn complete(engine: &mut MatchEngine, deal: u64, resolution: Resolution) {
    if engine.deal() != deal {
        debug!("board replaced, skipping continuation");
        return;
    }
    match resolution {
        Resolution::Match { .. } => engine.clear_selection(),
        Resolution::Mismatch => {
            engine.unmatch_cards();
            engine.switch_turn();
        }
    }
    engine.set_processing(false);
}

impl Drop for FlowCoordinator {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{build_deck, CreatureRecord};
    use crate::core::{GameRng, MatchConfig, PairCount, PlayerSlot, Tuning};

    fn coordinator(tuning: Tuning) -> FlowCoordinator {
        let config = MatchConfig::new(PairCount::default()).with_tuning(tuning);
        let creatures: Vec<_> = (1..=8)
            .map(|id| CreatureRecord::new(id, format!("c{id}"), format!("u{id}")))
            .collect();
        let mut engine = MatchEngine::new(&config);
        engine.begin_loading(config.pair_count);
        engine
            .start_playing(build_deck(&creatures, &mut GameRng::new(1)))
            .unwrap();
        FlowCoordinator::new(Arc::new(Mutex::new(engine)))
    }

    #[test]
    fn test_resolve_without_pair_is_noop() {
        let mut flow = coordinator(Tuning::default());
        assert_eq!(flow.resolve_pair(), None);
        assert!(!flow.engine().lock().is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_uses_configured_delays() {
        let tuning = Tuning {
            mismatch_delay_ms: 50,
            ..Tuning::default()
        };
        let mut flow = coordinator(tuning);

        flow.select_card(&CardId::new("1-a"));
        flow.select_card(&CardId::new("2-a"));

        let start = tokio::time::Instant::now();
        flow.settle().await;
        assert!(start.elapsed() < Duration::from_millis(100));
        assert_eq!(flow.engine().lock().current_player(), PlayerSlot::Two);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_continuation_is_skipped() {
        let mut flow = coordinator(Tuning::default());

        flow.select_card(&CardId::new("1-a"));
        assert_eq!(flow.engine().lock().selected().len(), 1);
        flow.select_card(&CardId::new("2-a"));
        flow.engine().lock().begin_loading(PairCount::default());

        flow.settle().await;
        let engine = flow.engine().lock();
        assert_eq!(engine.current_player(), PlayerSlot::One);
        assert!(!engine.is_processing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_match_resolution_reports_points() {
        let mut flow = coordinator(Tuning::default());

        flow.engine().lock().select_card(&CardId::new("3-a"));
        flow.engine().lock().select_card(&CardId::new("3-b"));

        assert_eq!(flow.resolve_pair(), Some(Resolution::Match { points: 100 }));
        assert_eq!(flow.resolve_pair(), None);
        flow.settle().await;
        assert!(flow.engine().lock().selected().is_empty());
    }

    #[test]
    fn test_without_runtime_completes_immediately() {
        let mut flow = coordinator(Tuning::default());

        flow.select_card(&CardId::new("1-a"));
        assert_eq!(flow.select_card(&CardId::new("2-a")), SelectOutcome::PairReady);

        let engine = flow.engine().lock();
        assert!(!engine.is_processing());
        assert!(engine.selected().is_empty());
        assert_eq!(engine.current_player(), PlayerSlot::Two);
        assert!(!flow.is_resolving());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unfinished_handle_does_not_block_next_pair() {
        let mut flow = coordinator(Tuning::default());

        flow.select_card(&CardId::new("4-a"));
        flow.select_card(&CardId::new("4-b"));
        assert!(flow.is_resolving());

        // Board released while the old task has not been marked finished.
        {
            let mut engine = flow.engine().lock();
            engine.clear_selection();
            engine.set_processing(false);
        }

        flow.select_card(&CardId::new("5-a"));
        assert_eq!(flow.select_card(&CardId::new("5-b")), SelectOutcome::PairReady);
        assert_eq!(flow.engine().lock().player(PlayerSlot::One).score, 220);

        flow.settle().await;
        let engine = flow.engine().lock();
        assert!(!engine.is_processing());
        assert!(engine.selected().is_empty());
        assert_eq!(engine.matched_pairs(), 2);
    }
}
