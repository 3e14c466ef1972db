//! Derives the transient per-seat render facts from a snapshot.

use tracing::debug;

use crate::domain::{Card, GameState, PlayerId};

use super::seat_map::{compute_seat_layout, SeatLayout, SEAT_COUNT};

const LOG_TARGET: &str = "view::projection";

/// Render facts for one occupied seat. Rebuilt on every snapshot and
/// discarded after the paint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatView {
    pub label: String,
    pub show_hole_cards: bool,
    pub cards: Vec<Card>,
    pub is_acting: bool,
}

/// Complete picture of the table for one snapshot. Owned solely by the
/// render step; displays repaint from it in full, never diffing against a
/// previous view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub seats: [Option<SeatView>; SEAT_COUNT],
    pub pot: i64,
    pub community_cards: Vec<Card>,
}

impl TableView {
    /// Projects a snapshot for the viewer identified by `local_id`,
    /// computing the seat layout from the snapshot's turn order.
    pub fn project(state: &GameState, local_id: &PlayerId) -> Self {
        let layout = compute_seat_layout(&state.active_players_this_hand);
        Self::project_with_layout(&layout, state, local_id)
    }

    /// Projects a snapshot onto an already-computed layout.
    ///
    /// Hole cards are surfaced only for the seat holding `local_id`; the
    /// payload carries every player's cards, so this is the enforcement
    /// point for that visibility rule. `action_index` addresses the seat
    /// layout directly and marks at most one seat as acting.
    pub fn project_with_layout(
        layout: &SeatLayout,
        state: &GameState,
        local_id: &PlayerId,
    ) -> Self {
        let mut seats: [Option<SeatView>; SEAT_COUNT] = Default::default();

        for (index, occupant) in layout.iter().enumerate() {
            let Some(pid) = occupant else {
                continue;
            };
            let Some(player) = state.player(pid) else {
                debug!(
                    target = LOG_TARGET,
                    player = %pid,
                    seat = index,
                    "seated id missing from snapshot players, leaving seat cleared"
                );
                continue;
            };

            let mut label = format!("{} | {} chips", player.nickname, player.chip_stack);
            if player.folded {
                label.push_str(" (FOLDED)");
            }

            let show_hole_cards = pid == local_id;
            let cards = if show_hole_cards {
                player.hole_cards.clone()
            } else {
                Vec::new()
            };

            seats[index] = Some(SeatView {
                label,
                show_hole_cards,
                cards,
                is_acting: state.action_index == Some(index),
            });
        }

        Self {
            seats,
            pot: state.pot,
            community_cards: state.community_cards.clone(),
        }
    }

    /// Index of the seat currently marked acting, if any.
    pub fn acting_seat(&self) -> Option<usize> {
        self.seats
            .iter()
            .position(|seat| seat.as_ref().is_some_and(|s| s.is_acting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, Rank, Suit};

    fn player(id: &str, nickname: &str, cards: &[Card]) -> Player {
        Player {
            id: id.to_string(),
            nickname: nickname.to_string(),
            chip_stack: 1000,
            folded: false,
            hole_cards: cards.to_vec(),
        }
    }

    fn two_player_state() -> GameState {
        let hole = [
            Card::new(Rank::Ace, Suit::Spades),
            Card::new(Rank::King, Suit::Spades),
        ];
        GameState {
            players: vec![
                player("p1", "alice", &hole),
                player("p2", "bob", &hole),
            ],
            active_players_this_hand: vec!["p1".to_string(), "p2".to_string()],
            community_cards: vec![Card::new(Rank::Two, Suit::Clubs)],
            pot: 40,
            action_index: Some(1),
        }
    }

    #[test]
    fn hole_cards_render_only_for_the_local_player() {
        let state = two_player_state();
        let view = TableView::project(&state, &"p1".to_string());

        let mine = view.seats[0].as_ref().unwrap();
        assert!(mine.show_hole_cards);
        assert_eq!(mine.cards.len(), 2);

        let theirs = view.seats[1].as_ref().unwrap();
        assert!(!theirs.show_hole_cards);
        assert!(theirs.cards.is_empty());
    }

    #[test]
    fn projection_is_idempotent() {
        let state = two_player_state();
        let local = "p1".to_string();
        assert_eq!(
            TableView::project(&state, &local),
            TableView::project(&state, &local)
        );
    }

    #[test]
    fn exactly_one_seat_is_acting_when_index_in_range() {
        let state = two_player_state();
        let view = TableView::project(&state, &"p1".to_string());
        let acting: Vec<usize> = view
            .seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().filter(|s| s.is_acting).map(|_| i))
            .collect();
        assert_eq!(acting, vec![1]);
        assert_eq!(view.acting_seat(), Some(1));
    }

    #[test]
    fn no_seat_is_acting_for_missing_or_out_of_range_index() {
        let mut state = two_player_state();

        state.action_index = None;
        let view = TableView::project(&state, &"p1".to_string());
        assert_eq!(view.acting_seat(), None);

        state.action_index = Some(SEAT_COUNT + 1);
        let view = TableView::project(&state, &"p1".to_string());
        assert_eq!(view.acting_seat(), None);
    }

    #[test]
    fn folded_player_gets_the_folded_marker() {
        let mut state = two_player_state();
        state.players[1].folded = true;
        let view = TableView::project(&state, &"p1".to_string());
        assert_eq!(
            view.seats[1].as_ref().unwrap().label,
            "bob | 1000 chips (FOLDED)"
        );
    }

    #[test]
    fn seated_id_without_player_record_stays_cleared() {
        let mut state = two_player_state();
        state.active_players_this_hand.push("ghost".to_string());
        let view = TableView::project(&state, &"p1".to_string());
        assert!(view.seats[2].is_none());
    }

    #[test]
    fn pot_and_community_cards_pass_through_unconditionally() {
        let state = two_player_state();
        let view = TableView::project(&state, &"p9".to_string());
        assert_eq!(view.pot, 40);
        assert_eq!(view.community_cards.len(), 1);
    }

    #[test]
    fn empty_snapshot_projects_an_empty_table() {
        let view = TableView::project(&GameState::default(), &"p1".to_string());
        assert!(view.seats.iter().all(Option::is_none));
        assert_eq!(view.pot, 0);
        assert!(view.community_cards.is_empty());
    }
}
