//! Display seam and the terminal backend.

use crate::domain::{card_code, Card};

use super::projection::TableView;
use super::seat_map::SEAT_COUNT;

/// Applies a freshly projected view to a display surface.
///
/// Every call is a full repaint: implementations must clear whatever they
/// showed before and draw only from `view`, never diffing against prior
/// state. That trades redundant work for immunity to stale-UI bugs, which
/// is the right trade at turn-based update rates.
pub trait TableDisplay {
    fn apply(&mut self, view: &TableView);
}

/// Renders the table as plain text, one line per seat plus pot and board.
///
/// Cards print in the same two-letter code the asset host keys images by,
/// so unknown server data shows up as `XX` rather than breaking the paint.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    fn format_cards(cards: &[Card]) -> String {
        cards
            .iter()
            .map(card_code)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TableDisplay for TerminalDisplay {
    fn apply(&mut self, view: &TableView) {
        println!();
        println!("pot: {}", view.pot);
        println!("board: [{}]", Self::format_cards(&view.community_cards));
        for index in 0..SEAT_COUNT {
            match &view.seats[index] {
                Some(seat) => {
                    let marker = if seat.is_acting { "  << to act" } else { "" };
                    if seat.show_hole_cards {
                        println!(
                            "seat {index}: {} [{}]{marker}",
                            seat.label,
                            Self::format_cards(&seat.cards)
                        );
                    } else {
                        println!("seat {index}: {}{marker}", seat.label);
                    }
                }
                None => println!("seat {index}: -"),
            }
        }
    }
}
