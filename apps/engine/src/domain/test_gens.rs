// Proptest generators for domain types.
// Cards carry unique ids so generated tables and hands never share a card.

use proptest::prelude::*;

use crate::domain::state::TablePlay;
use crate::domain::{Card, CardFace, Color, Trump};

/// Colors of the four-suit deck.
pub fn color() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Red),
        Just(Color::Blue),
        Just(Color::Green),
        Just(Color::Yellow),
    ]
}

/// Any trump, including no trump.
pub fn trump() -> impl Strategy<Value = Trump> {
    prop_oneof![
        4 => color().prop_map(Trump::Color),
        1 => Just(Trump::NoTrump),
    ]
}

/// A card face, weighted toward number cards like a real deck.
pub fn face() -> impl Strategy<Value = CardFace> {
    prop_oneof![
        13 => (color(), 1u8..=13).prop_map(|(color, rank)| CardFace::Number { color, rank }),
        1 => Just(CardFace::Wizard),
        1 => Just(CardFace::Fool),
    ]
}

/// `n` cards with sequential ids starting at `first_id`.
pub fn cards(n: usize, first_id: u16) -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(face(), n).prop_map(move |faces| {
        faces
            .into_iter()
            .enumerate()
            .map(|(i, face)| Card {
                id: first_id + i as u16,
                face,
            })
            .collect()
    })
}

/// A complete trick of 3..=6 plays by seats 0..n in order.
pub fn complete_trick() -> impl Strategy<Value = Vec<TablePlay>> {
    (3usize..=6).prop_flat_map(|n| {
        cards(n, 0).prop_map(|cards| {
            cards
                .into_iter()
                .enumerate()
                .map(|(seat, card)| TablePlay { seat, card })
                .collect()
        })
    })
}

/// A partial trick (0..=4 plays by seats 1..) plus a hand of 1..=8 cards.
pub fn table_and_hand() -> impl Strategy<Value = (Vec<TablePlay>, Vec<Card>)> {
    (0usize..=4, 1usize..=8).prop_flat_map(|(t, h)| {
        (cards(t, 0), cards(h, 100)).prop_map(|(table_cards, hand)| {
            let table = table_cards
                .into_iter()
                .enumerate()
                .map(|(i, card)| TablePlay { seat: i + 1, card })
                .collect();
            (table, hand)
        })
    })
}
