//! Error codes sent to clients alongside rejection messages.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in `error` messages.

use core::fmt;

use serde::{Serialize, Serializer};

use super::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Turn and phase
    /// Action not valid in the current phase
    PhaseMismatch,
    /// Another player is expected to act
    OutOfTurn,

    // Bids
    /// Announcement is not an integer
    NotANumber,
    /// Bid outside 0..=round
    InvalidBid,
    /// Closing bid would make the total equal the round
    BidSumEqualsRound,

    // Cards and trump
    /// Card not in hand
    CardNotInHand,
    /// Must follow the led color
    MustFollowSuit,
    /// Only the pending chooser may pick trump
    NotTrumpChooser,
    /// Unknown color name
    InvalidColor,
    /// Malformed card descriptor
    ParseCard,

    // Membership
    /// Too few active players to start
    NotEnoughPlayers,
    /// Name already seated and active
    NameTaken,
    /// New players cannot join a running match
    MatchInProgress,
    /// Unknown player
    PlayerNotFound,

    // Catch-all
    /// Malformed client message
    BadRequest,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::NotANumber => "NOT_A_NUMBER",
            Self::InvalidBid => "INVALID_BID",
            Self::BidSumEqualsRound => "BID_SUM_EQUALS_ROUND",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::NotTrumpChooser => "NOT_TRUMP_CHOOSER",
            Self::InvalidColor => "INVALID_COLOR",
            Self::ParseCard => "PARSE_CARD",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::NameTaken => "NAME_TAKEN",
            Self::MatchInProgress => "MATCH_IN_PROGRESS",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::BadRequest => "BAD_REQUEST",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::PhaseMismatch => Self::PhaseMismatch,
                ValidationKind::OutOfTurn => Self::OutOfTurn,
                ValidationKind::NotANumber => Self::NotANumber,
                ValidationKind::InvalidBid => Self::InvalidBid,
                ValidationKind::BidSumEqualsRound => Self::BidSumEqualsRound,
                ValidationKind::CardNotInHand => Self::CardNotInHand,
                ValidationKind::MustFollowSuit => Self::MustFollowSuit,
                ValidationKind::NotTrumpChooser => Self::NotTrumpChooser,
                ValidationKind::InvalidColor => Self::InvalidColor,
                ValidationKind::ParseCard => Self::ParseCard,
                ValidationKind::NotEnoughPlayers => Self::NotEnoughPlayers,
            },
            DomainError::Conflict(kind, _) => match kind {
                ConflictKind::NameTaken => Self::NameTaken,
                ConflictKind::MatchInProgress => Self::MatchInProgress,
            },
            DomainError::NotFound(NotFoundKind::Player, _) => Self::PlayerNotFound,
        }
    }
}
