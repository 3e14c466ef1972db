//! Card-to-asset filename mapping.
//!
//! The asset host serves one image per `(rank, suit)` pair under a
//! two-letter scheme, e.g. ace of spades -> `AS.png`. The mapping is pure
//! and total over the enum product; unknown values degrade to the `X`
//! sentinel code, producing an intentionally unresolvable filename (a
//! broken image) rather than a crash.

use super::{Card, Rank, Suit};

/// Code substituted for a rank or suit the client does not recognize.
pub const SENTINEL_CODE: &str = "X";

pub fn rank_code(rank: Rank) -> &'static str {
    match rank {
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Eight => "8",
        Rank::Nine => "9",
        Rank::Ten => "10",
        Rank::Jack => "J",
        Rank::Queen => "Q",
        Rank::King => "K",
        Rank::Ace => "A",
        Rank::Unknown => SENTINEL_CODE,
    }
}

pub fn suit_code(suit: Suit) -> &'static str {
    match suit {
        Suit::Hearts => "H",
        Suit::Diamonds => "D",
        Suit::Clubs => "C",
        Suit::Spades => "S",
        Suit::Unknown => SENTINEL_CODE,
    }
}

/// Short textual form of a card, e.g. `"AS"`, `"10H"`, or `"XX"` for
/// fully unknown data.
pub fn card_code(card: &Card) -> String {
    format!("{}{}", rank_code(card.rank), suit_code(card.suit))
}

/// Hosted image filename for a card, e.g. `"AS.png"`.
pub fn asset_filename(card: &Card) -> String {
    format!("{}.png", card_code(card))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const RANKS: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    const SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    #[test]
    fn every_valid_pair_maps_to_a_unique_filename() {
        let mut seen = HashSet::new();
        for rank in RANKS {
            for suit in SUITS {
                let filename = asset_filename(&Card::new(rank, suit));
                assert!(filename.ends_with(".png"), "malformed: {filename}");
                assert!(
                    seen.insert(filename.clone()),
                    "collision on {filename}"
                );
            }
        }
        assert_eq!(seen.len(), 52);
        assert!(!seen.contains("XX.png"));
    }

    #[test]
    fn known_pairs_use_the_two_letter_scheme() {
        assert_eq!(
            asset_filename(&Card::new(Rank::Ace, Suit::Spades)),
            "AS.png"
        );
        assert_eq!(
            asset_filename(&Card::new(Rank::Ten, Suit::Hearts)),
            "10H.png"
        );
    }

    #[test]
    fn unknown_values_fall_back_to_the_sentinel() {
        assert_eq!(
            asset_filename(&Card::new(Rank::Unknown, Suit::Unknown)),
            "XX.png"
        );
        assert_eq!(
            asset_filename(&Card::new(Rank::Unknown, Suit::Clubs)),
            "XC.png"
        );
        assert_eq!(card_code(&Card::new(Rank::Queen, Suit::Unknown)), "QX");
    }
}
