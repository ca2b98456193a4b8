use serde_json::Value;

use crate::domain::rules::valid_bid_range;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Bid(pub u8);

impl Bid {
    /// Interpret a raw announcement payload. Only JSON integers are bids.
    pub fn from_json(value: &Value) -> Result<Self, DomainError> {
        let Some(n) = value.as_i64() else {
            return Err(DomainError::validation(
                ValidationKind::NotANumber,
                format!("Announcement must be an integer, got {value}"),
            ));
        };
        Self::from_i64(n)
    }

    pub fn from_i64(n: i64) -> Result<Self, DomainError> {
        u8::try_from(n).map(Bid).map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidBid,
                format!("Bid {n} is out of range"),
            )
        })
    }
}

/// Validate a bid against the round and, for the closing bid, the sum rule.
///
/// `others_sum` is the total already announced by the other active players;
/// `closes_bidding` is true when this is the last outstanding bid.
pub fn validate_bid(
    round_no: u8,
    bid: Bid,
    others_sum: u32,
    closes_bidding: bool,
) -> Result<(), DomainError> {
    let range = valid_bid_range(round_no);
    if !range.contains(&bid.0) {
        return Err(DomainError::validation(
            ValidationKind::InvalidBid,
            format!("Bid must be in range {range:?}"),
        ));
    }
    if closes_bidding {
        let total = others_sum + bid.0 as u32;
        if total == round_no as u32 {
            return Err(DomainError::validation(
                ValidationKind::BidSumEqualsRound,
                format!("Cannot bid {}: total would be {total} = round {round_no}", bid.0),
            ));
        }
    }
    Ok(())
}
