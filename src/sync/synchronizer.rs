//! Drives the display from authoritative snapshots.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::domain::{GameState, PlayerId};
use crate::view::display::TableDisplay;
use crate::view::projection::TableView;

const LOG_TARGET: &str = "sync::synchronizer";

/// Stateless renderer loop: each snapshot is projected from scratch and
/// fully repainted, so re-delivering the same snapshot leaves the visible
/// table unchanged. State never crosses concurrent contexts; everything
/// happens on sequential event callbacks.
pub struct TableSynchronizer<D> {
    local_id: PlayerId,
    display: D,
}

impl<D: TableDisplay> TableSynchronizer<D> {
    pub fn new(local_id: PlayerId, display: D) -> Self {
        Self { local_id, display }
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Projects and paints one snapshot. Synchronous and run-to-completion;
    /// the render path never suspends.
    pub fn apply_snapshot(&mut self, state: &GameState) {
        let view = TableView::project(state, &self.local_id);
        self.display.apply(&view);
    }

    /// Consumes pushed snapshots until the channel closes or `cancel`
    /// fires. Events are totally ordered by arrival; the last-delivered
    /// snapshot wins. A lagged receiver skips straight to the newest.
    pub async fn run(mut self, mut rx: broadcast::Receiver<GameState>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!(target = LOG_TARGET, "shutdown signal received");
                    break;
                }
                next = rx.recv() => match next {
                    Ok(state) => self.apply_snapshot(&state),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(
                            target = LOG_TARGET,
                            skipped,
                            "lagged behind state broadcasts, resuming at newest"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!(target = LOG_TARGET, "state channel closed");
                        break;
                    }
                },
            }
        }
        info!(target = LOG_TARGET, "table synchronizer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Card, Player, Rank, Suit};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingDisplay {
        views: Arc<Mutex<Vec<TableView>>>,
    }

    impl TableDisplay for RecordingDisplay {
        fn apply(&mut self, view: &TableView) {
            self.views.lock().unwrap().push(view.clone());
        }
    }

    fn sample_state() -> GameState {
        GameState {
            players: vec![Player {
                id: "p1".to_string(),
                nickname: "alice".to_string(),
                chip_stack: 500,
                folded: false,
                hole_cards: vec![Card::new(Rank::Ace, Suit::Hearts)],
            }],
            active_players_this_hand: vec!["p1".to_string()],
            community_cards: vec![],
            pot: 20,
            action_index: Some(0),
        }
    }

    #[test]
    fn re_applying_a_snapshot_repaints_identically() {
        let display = RecordingDisplay::default();
        let mut sync = TableSynchronizer::new("p1".to_string(), display.clone());

        let state = sample_state();
        sync.apply_snapshot(&state);
        sync.apply_snapshot(&state);

        let views = display.views.lock().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0], views[1]);
    }

    #[tokio::test]
    async fn run_paints_each_pushed_snapshot_and_stops_on_close() {
        let display = RecordingDisplay::default();
        let sync = TableSynchronizer::new("p1".to_string(), display.clone());
        let (tx, rx) = broadcast::channel(8);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(sync.run(rx, cancel));

        let mut state = sample_state();
        tx.send(state.clone()).unwrap();
        state.pot = 60;
        tx.send(state).unwrap();
        drop(tx);

        task.await.unwrap();

        let views = display.views.lock().unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].pot, 20);
        assert_eq!(views[1].pot, 60);
    }

    #[tokio::test]
    async fn run_exits_on_cancellation() {
        let display = RecordingDisplay::default();
        let sync = TableSynchronizer::new("p1".to_string(), display.clone());
        let (_tx, rx) = broadcast::channel::<GameState>(8);
        let cancel = CancellationToken::new();

        let task = tokio::spawn(sync.run(rx, cancel.clone()));
        cancel.cancel();
        task.await.unwrap();

        assert!(display.views.lock().unwrap().is_empty());
    }
}
