use crate::domain::cards_logic::{is_card_allowed, trick_winner};
use crate::domain::cards_parsing::CardDescriptor;
use crate::domain::cards_types::{Card, Trump};
use crate::domain::state::{Seat, TablePlay};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// The card that left the hand.
    pub card: Card,
    /// Whether every active player has now played to the trick.
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
}

/// Locate the described card in `hand` and check it may be played.
///
/// Returns the hand index of the card. Does not mutate anything.
pub fn validate_play(
    hand: &[Card],
    table: &[TablePlay],
    descriptor: &CardDescriptor,
) -> Result<usize, DomainError> {
    let Some(pos) = descriptor.find_in(hand)? else {
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            "Card not in hand",
        ));
    };
    if !is_card_allowed(&hand[pos], hand, table) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            "Must follow the led color",
        ));
    }
    Ok(pos)
}

/// Resolve the current trick winner, treating an unset trump as no trump.
pub fn resolve_current_trick(table: &[TablePlay], trump: Option<Trump>) -> Option<Seat> {
    trick_winner(table, trump.unwrap_or(Trump::NoTrump))
}
