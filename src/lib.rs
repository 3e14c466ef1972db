//! Client-side presentation layer for a multiplayer hold'em table.
//!
//! The server owns the game rules and pushes authoritative [`GameState`]
//! snapshots over a pub/sub channel; this crate maps each snapshot onto a
//! stable six-seat layout and derives the per-seat render facts (label,
//! hole-card visibility, turn highlight) for a display backend.

pub mod domain;
pub mod error;
pub mod sync;
pub mod view;

pub use domain::GameState;
pub use error::ClientError;
