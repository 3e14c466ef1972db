//! Seat mapping and per-snapshot view projection.

pub mod display;
pub mod projection;
pub mod seat_map;

pub use display::{TableDisplay, TerminalDisplay};
pub use projection::{SeatView, TableView};
pub use seat_map::{compute_seat_layout, SeatLayout, SEAT_COUNT};
