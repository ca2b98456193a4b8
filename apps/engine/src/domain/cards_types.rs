//! Core card-related types: Card, CardFace, Color, Trump

use crate::errors::domain::{DomainError, ValidationKind};

/// Suit colors in canonical display order. `Orange` only exists in the
/// five-suit deck used for large tables.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Orange,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Orange,
    ];

    /// Colors present in a deck with `suit_count` suits.
    pub fn for_suit_count(suit_count: u8) -> &'static [Color] {
        let n = (suit_count as usize).min(Self::ALL.len());
        &Self::ALL[..n]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Orange => "orange",
        }
    }
}

impl TryFrom<&str> for Color {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "orange" => Ok(Color::Orange),
            _ => Err(DomainError::validation(
                ValidationKind::InvalidColor,
                format!("Unknown color: {value}"),
            )),
        }
    }
}

/// Number card rank, 1..=13.
pub type Rank = u8;

pub const MIN_RANK: Rank = 1;
pub const MAX_RANK: Rank = 13;

/// Per-round unique card identity.
pub type CardId = u16;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardFace {
    Number { color: Color, rank: Rank },
    Wizard,
    Fool,
}

impl CardFace {
    pub fn color(&self) -> Option<Color> {
        match self {
            CardFace::Number { color, .. } => Some(*color),
            CardFace::Wizard | CardFace::Fool => None,
        }
    }
}

/// A physical card from one round's deck.
///
/// Equality is by `id` only; two cards with the same face from different
/// decks are different cards.
#[derive(Debug, Copy, Clone)]
pub struct Card {
    pub id: CardId,
    pub face: CardFace,
}

impl Card {
    pub fn number(id: CardId, color: Color, rank: Rank) -> Self {
        Self {
            id,
            face: CardFace::Number { color, rank },
        }
    }

    pub fn wizard(id: CardId) -> Self {
        Self {
            id,
            face: CardFace::Wizard,
        }
    }

    pub fn fool(id: CardId) -> Self {
        Self {
            id,
            face: CardFace::Fool,
        }
    }

    pub fn color(&self) -> Option<Color> {
        self.face.color()
    }

    pub fn is_wizard(&self) -> bool {
        matches!(self.face, CardFace::Wizard)
    }

    pub fn is_fool(&self) -> bool {
        matches!(self.face, CardFace::Fool)
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Card {}

impl std::hash::Hash for Card {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Trump for a round once it is settled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Trump {
    Color(Color),
    NoTrump,
}

impl Trump {
    pub fn color(&self) -> Option<Color> {
        match self {
            Trump::Color(c) => Some(*c),
            Trump::NoTrump => None,
        }
    }
}

impl From<Color> for Trump {
    fn from(color: Color) -> Self {
        Trump::Color(color)
    }
}
