//! Bot strategies driving simulated seats.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wizard_engine::domain::cards_logic::trick_winner;
use wizard_engine::domain::cards_types::{Card, CardFace, Color, Trump};
use wizard_engine::domain::state::TablePlay;

/// What a bot can see when asked to act.
pub struct Seen<'a> {
    pub hand: &'a [Card],
    pub table: &'a [TablePlay],
    pub round_no: u8,
    pub trump: Option<Trump>,
    pub announced: Option<u8>,
    pub tricks_won: u8,
}

pub trait Bot {
    fn name(&self) -> &'static str;

    /// Preferred bid; the simulator falls back to the nearest accepted one.
    fn bid(&mut self, seen: &Seen<'_>) -> u8;

    /// Pick one of `legal`; `None` only when `legal` is empty.
    fn play(&mut self, seen: &Seen<'_>, legal: &[Card]) -> Option<Card>;

    fn choose_trump(&mut self, seen: &Seen<'_>, colors: &[Color]) -> Color;
}

pub struct RandomBot {
    rng: ChaCha8Rng,
}

impl RandomBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Bot for RandomBot {
    fn name(&self) -> &'static str {
        "random"
    }

    fn bid(&mut self, seen: &Seen<'_>) -> u8 {
        self.rng.random_range(0..=seen.round_no)
    }

    fn play(&mut self, _seen: &Seen<'_>, legal: &[Card]) -> Option<Card> {
        legal.choose(&mut self.rng).copied()
    }

    fn choose_trump(&mut self, _seen: &Seen<'_>, colors: &[Color]) -> Color {
        colors.choose(&mut self.rng).copied().unwrap_or(Color::Red)
    }
}

/// Bids the cards it expects to win and plays to hit the bid exactly.
#[derive(Default)]
pub struct CountingBot;

fn strength(card: &Card, trump: Option<Color>) -> u16 {
    match card.face {
        CardFace::Fool => 0,
        CardFace::Number { color, rank } if Some(color) == trump => 100 + rank as u16,
        CardFace::Number { rank, .. } => rank as u16,
        CardFace::Wizard => 200,
    }
}

fn would_win(seen: &Seen<'_>, card: &Card, seat: usize) -> bool {
    let mut table = seen.table.to_vec();
    table.push(TablePlay { seat, card: *card });
    trick_winner(&table, seen.trump.unwrap_or(Trump::NoTrump)) == Some(seat)
}

impl Bot for CountingBot {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn bid(&mut self, seen: &Seen<'_>) -> u8 {
        let trump = seen.trump.and_then(|t| t.color());
        let sure = seen
            .hand
            .iter()
            .filter(|c| {
                strength(c, trump) >= 110 || matches!(c.face, CardFace::Number { rank: 13, .. })
            })
            .count();
        u8::try_from(sure).unwrap_or(u8::MAX).min(seen.round_no)
    }

    fn play(&mut self, seen: &Seen<'_>, legal: &[Card]) -> Option<Card> {
        let trump = seen.trump.and_then(|t| t.color());
        let wants_tricks = seen.announced.unwrap_or(0) > seen.tricks_won;
        // Seat numbers only matter relative to the table; pick one nobody uses.
        let me = usize::MAX;

        let mut ordered = legal.to_vec();
        ordered.sort_by_key(|c| strength(c, trump));
        let pick = if wants_tricks {
            // Cheapest card that takes the trick, else dump the weakest.
            ordered
                .iter()
                .find(|c| would_win(seen, c, me))
                .or_else(|| ordered.first())
        } else {
            // Strongest card that still loses, else the weakest overall.
            ordered
                .iter()
                .rev()
                .find(|c| !would_win(seen, c, me))
                .or_else(|| ordered.first())
        };
        pick.copied()
    }

    fn choose_trump(&mut self, seen: &Seen<'_>, colors: &[Color]) -> Color {
        colors
            .iter()
            .copied()
            .max_by_key(|&color| seen.hand.iter().filter(|c| c.color() == Some(color)).count())
            .unwrap_or(Color::Red)
    }
}
