//! Wire-facing domain types for the table client.
//!
//! Every type here mirrors the JSON shapes the server broadcasts. A
//! snapshot is complete and self-contained, never a delta; the client
//! replaces its picture of the table wholesale on each delivery.

use serde::{Deserialize, Deserializer, Serialize};

pub mod assets;

pub use assets::{asset_filename, card_code};

/// Opaque server-assigned player identifier, stable for a session.
pub type PlayerId = String;

/// Card rank as transmitted by the server. Values outside the known set
/// deserialize to [`Rank::Unknown`] so malformed data degrades at render
/// time instead of failing the whole snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
    #[serde(other)]
    Unknown,
}

/// Card suit, with the same lenient decoding as [`Rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

/// Public player record as carried in every snapshot.
///
/// `hole_cards` is present for all players on the wire; visibility is
/// enforced at projection time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub nickname: String,
    #[serde(default)]
    pub chip_stack: i64,
    #[serde(default)]
    pub folded: bool,
    #[serde(default, deserialize_with = "null_to_default")]
    pub hole_cards: Vec<Card>,
}

/// Authoritative game-state snapshot. Immutable once decoded; the client
/// never patches it, only replaces it with the next delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    #[serde(default, deserialize_with = "null_to_default")]
    pub players: Vec<Player>,
    /// Turn order for the current hand; doubles as the authoritative
    /// seating order.
    #[serde(default, deserialize_with = "null_to_default")]
    pub active_players_this_hand: Vec<PlayerId>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub community_cards: Vec<Card>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub pot: i64,
    /// Index into the seat layout (not into `active_players_this_hand`)
    /// identifying whose turn it is.
    #[serde(default)]
    pub action_index: Option<usize>,
}

impl GameState {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Player action verbs accepted by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Fold,
    Call,
    Raise,
    Check,
}

/// Outbound action publish. `amount` is ignored by the server except for
/// [`ActionType::Raise`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub player_id: PlayerId,
    pub action_type: ActionType,
    pub amount: i64,
}

/// The server serializes absent fields as explicit `null`; decode those to
/// the type's default instead of rejecting the snapshot.
fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
