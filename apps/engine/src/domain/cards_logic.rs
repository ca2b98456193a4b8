//! Card game logic: led card, follow-suit legality, trick winner, hand order

use super::cards_types::{Card, CardFace, Color, Trump};
use super::state::{Seat, TablePlay};

/// The led card of a trick: the earliest play that is not a Fool.
pub fn led_card(table: &[TablePlay]) -> Option<&TablePlay> {
    table.iter().find(|p| !p.card.is_fool())
}

/// Color the remaining players must follow, if any.
///
/// A Wizard lead (or a table of only Fools) sets no color.
pub fn led_color(table: &[TablePlay]) -> Option<Color> {
    led_card(table).and_then(|p| p.card.color())
}

pub fn hand_has_color(hand: &[Card], color: Color) -> bool {
    hand.iter().any(|c| c.color() == Some(color))
}

/// Whether `card` may be played from `hand` onto `table`.
pub fn is_card_allowed(card: &Card, hand: &[Card], table: &[TablePlay]) -> bool {
    let CardFace::Number { color, .. } = card.face else {
        return true;
    };
    let Some(lead) = led_color(table) else {
        return true;
    };
    if color == lead {
        return true;
    }
    !hand
        .iter()
        .any(|other| other.id != card.id && other.color() == Some(lead))
}

/// Cards from `hand` that may legally be played onto `table`, in hand order.
pub fn legal_cards(hand: &[Card], table: &[TablePlay]) -> Vec<Card> {
    hand.iter()
        .copied()
        .filter(|c| is_card_allowed(c, hand, table))
        .collect()
}

/// Resolve the winner of a (complete or partial) trick.
///
/// Returns `None` only for an empty table.
pub fn trick_winner(table: &[TablePlay], trump: Trump) -> Option<Seat> {
    let first = table.first()?;
    let Some(led) = led_card(table) else {
        // Only Fools were played.
        return Some(first.seat);
    };

    let trump_color = trump.color();
    let mut best = led;
    for play in table {
        match play.card.face {
            CardFace::Wizard => return Some(play.seat),
            CardFace::Fool => {}
            CardFace::Number { color, rank } => {
                let CardFace::Number {
                    color: best_color,
                    rank: best_rank,
                } = best.card.face
                else {
                    continue;
                };
                let higher_same_color = color == best_color && rank > best_rank;
                let trumps_best = trump_color == Some(color) && trump_color != Some(best_color);
                if higher_same_color || trumps_best {
                    best = play;
                }
            }
        }
    }
    Some(best.seat)
}

/// Sort key for canonical hand order: Fools, non-trump colors ascending,
/// trump color ascending, Wizards.
fn display_key(card: &Card, trump: Option<Color>) -> (u8, u8, u8) {
    match card.face {
        CardFace::Fool => (0, 0, 0),
        CardFace::Number { color, rank } if Some(color) == trump => (2, 0, rank),
        CardFace::Number { color, rank } => (1, color as u8, rank),
        CardFace::Wizard => (3, 0, 0),
    }
}

pub fn sort_hand(hand: &mut [Card], trump: Option<Color>) {
    hand.sort_by_key(|c| (display_key(c, trump), c.id));
}
