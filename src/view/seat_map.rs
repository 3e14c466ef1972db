//! Maps the server's turn-order sequence onto the fixed seat slots.

use tracing::warn;

use crate::domain::PlayerId;

const LOG_TARGET: &str = "view::seat_map";

/// Physical seat capacity of the table.
pub const SEAT_COUNT: usize = 6;

/// Fixed mapping from table position to occupying player.
///
/// Recomputed from scratch on every snapshot rather than patched, and a
/// pure function of the turn order, so the same player keeps the same seat
/// for as long as the server lists them in the same position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatLayout {
    slots: [Option<PlayerId>; SEAT_COUNT],
}

impl SeatLayout {
    /// Occupant of seat `index`, if any. Out-of-range indexes read as
    /// empty.
    pub fn seat(&self, index: usize) -> Option<&PlayerId> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&PlayerId>> {
        self.slots.iter().map(|slot| slot.as_ref())
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Seats players in the order given: slot `i` takes `active_ids[i]`.
///
/// Pure and stateless, which makes re-delivery of the same snapshot a
/// visible no-op. Two server-side data faults are absorbed rather than
/// raised: more ids than seats truncates at the table's capacity, and a
/// duplicated id keeps its first seat while the later claim is dropped.
pub fn compute_seat_layout(active_ids: &[PlayerId]) -> SeatLayout {
    let mut layout = SeatLayout::default();

    if active_ids.len() > SEAT_COUNT {
        warn!(
            target = LOG_TARGET,
            count = active_ids.len(),
            capacity = SEAT_COUNT,
            "more active players than seats, truncating"
        );
    }

    let mut next = 0;
    for id in active_ids {
        if next == SEAT_COUNT {
            break;
        }
        let already_seated = layout.slots[..next]
            .iter()
            .any(|slot| slot.as_deref() == Some(id.as_str()));
        if already_seated {
            warn!(
                target = LOG_TARGET,
                player = %id,
                "duplicate id in turn order, keeping first seat"
            );
            continue;
        }
        layout.slots[next] = Some(id.clone());
        next += 1;
    }

    layout
}
