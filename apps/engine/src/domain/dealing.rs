//! Deck construction and deterministic random draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards_logic::sort_hand;
use crate::domain::cards_types::{Card, CardId, Color, Trump, MAX_RANK, MIN_RANK};
use crate::domain::rules::deck_size;

/// Build the full deck for `suit_count` suits in a stable order.
///
/// Per suit: number cards 1..=13, then one Wizard and one Fool. Ids are
/// assigned sequentially and are unique within the deck.
pub fn full_deck(suit_count: u8) -> Vec<Card> {
    let mut deck = Vec::with_capacity(deck_size(suit_count));
    let mut next_id: CardId = 0;
    let mut take_id = || {
        let id = next_id;
        next_id += 1;
        id
    };
    for &color in Color::for_suit_count(suit_count) {
        for rank in MIN_RANK..=MAX_RANK {
            deck.push(Card::number(take_id(), color, rank));
        }
        deck.push(Card::wizard(take_id()));
        deck.push(Card::fool(take_id()));
    }
    deck
}

/// Uniform random draws without replacement from a round's stack.
pub struct DeckRng {
    rng: ChaCha8Rng,
}

impl DeckRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Remove one uniformly chosen card from `stack`.
    pub fn draw(&mut self, stack: &mut Vec<Card>) -> Option<Card> {
        if stack.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..stack.len());
        Some(stack.swap_remove(idx))
    }

    /// Remove `count` uniformly chosen cards from `stack`.
    pub fn draw_many(&mut self, stack: &mut Vec<Card>, count: usize) -> Vec<Card> {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw(stack) {
                Some(card) => out.push(card),
                None => break,
            }
        }
        out
    }
}

/// What the turned-up trump card means for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpDraw {
    /// No card turned up (deck exhausted by the deal).
    Nothing,
    Settled(Trump),
    /// A Wizard: someone must choose a color.
    NeedsChoice,
}

pub fn classify_trump_card(card: Option<&Card>) -> TrumpDraw {
    match card {
        None => TrumpDraw::Nothing,
        Some(c) if c.is_wizard() => TrumpDraw::NeedsChoice,
        Some(c) => match c.color() {
            Some(color) => TrumpDraw::Settled(Trump::Color(color)),
            None => TrumpDraw::Settled(Trump::NoTrump),
        },
    }
}

/// Deal `hand_size` cards to each of `players` hands, sorted for display.
pub fn deal_hands(
    rng: &mut DeckRng,
    stack: &mut Vec<Card>,
    players: usize,
    hand_size: u8,
    trump: Option<Color>,
) -> Vec<Vec<Card>> {
    (0..players)
        .map(|_| {
            let mut hand = rng.draw_many(stack, hand_size as usize);
            sort_hand(&mut hand, trump);
            hand
        })
        .collect()
}
