//! Card descriptors: how clients name a card, and short text tokens
//! ("R7", "B13", "W", "F") used by fixtures and the simulator.

use std::str::FromStr;

use serde::Deserialize;

use super::cards_types::{Card, CardFace, CardId, Color, MAX_RANK, MIN_RANK};
use crate::errors::domain::{DomainError, ValidationKind};

/// A client's reference to a card in their hand.
///
/// `id` wins when present; otherwise the face is matched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CardDescriptor {
    #[serde(rename = "type")]
    pub kind: CardKind,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub number: Option<u8>,
    #[serde(default)]
    pub id: Option<CardId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Number,
    Wizard,
    Fool,
}

impl CardDescriptor {
    pub fn for_card(card: &Card) -> Self {
        let (kind, color, number) = match card.face {
            CardFace::Number { color, rank } => {
                (CardKind::Number, Some(color.as_str().to_string()), Some(rank))
            }
            CardFace::Wizard => (CardKind::Wizard, None, None),
            CardFace::Fool => (CardKind::Fool, None, None),
        };
        Self {
            kind,
            color,
            number,
            id: Some(card.id),
        }
    }

    /// The face this descriptor names.
    pub fn face(&self) -> Result<CardFace, DomainError> {
        match self.kind {
            CardKind::Wizard => Ok(CardFace::Wizard),
            CardKind::Fool => Ok(CardFace::Fool),
            CardKind::Number => {
                let color_str = self.color.as_deref().ok_or_else(|| {
                    DomainError::validation(ValidationKind::ParseCard, "Number card needs a color")
                })?;
                let color = Color::try_from(color_str)?;
                let rank = self.number.ok_or_else(|| {
                    DomainError::validation(ValidationKind::ParseCard, "Number card needs a number")
                })?;
                if !(MIN_RANK..=MAX_RANK).contains(&rank) {
                    return Err(DomainError::validation(
                        ValidationKind::ParseCard,
                        format!("Card number must be {MIN_RANK}..={MAX_RANK}, got {rank}"),
                    ));
                }
                Ok(CardFace::Number { color, rank })
            }
        }
    }

    /// Position of the described card in `hand`, if held.
    pub fn find_in(&self, hand: &[Card]) -> Result<Option<usize>, DomainError> {
        if let Some(id) = self.id {
            return Ok(hand.iter().position(|c| c.id == id));
        }
        let face = self.face()?;
        Ok(hand.iter().position(|c| c.face == face))
    }
}

impl FromStr for CardFace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"));
        let mut chars = s.chars();
        let head = chars.next().ok_or_else(parse_err)?;
        let rest = chars.as_str();
        let color = match head {
            'W' if rest.is_empty() => return Ok(CardFace::Wizard),
            'F' if rest.is_empty() => return Ok(CardFace::Fool),
            'R' => Color::Red,
            'B' => Color::Blue,
            'G' => Color::Green,
            'Y' => Color::Yellow,
            'O' => Color::Orange,
            _ => return Err(parse_err()),
        };
        let rank: u8 = rest.parse().map_err(|_| parse_err())?;
        if !(MIN_RANK..=MAX_RANK).contains(&rank) {
            return Err(parse_err());
        }
        Ok(CardFace::Number { color, rank })
    }
}

/// Non-panicking helper to turn tokens into cards with sequential ids
/// starting at `first_id`.
pub fn try_parse_cards<I, S>(tokens: I, first_id: CardId) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .enumerate()
        .map(|(i, s)| {
            let face = s.as_ref().parse::<CardFace>()?;
            Ok(Card {
                id: first_id + i as CardId,
                face,
            })
        })
        .collect()
}
