use std::ops::RangeInclusive;

use crate::domain::cards_types::{MAX_RANK, MIN_RANK};

pub const DEFAULT_MIN_PLAYERS: usize = 3;
pub const BASE_SUITS: u8 = 4;
pub const EXTENDED_SUITS: u8 = 5;
/// Above this many active players the orange suit is added.
pub const EXTENDED_SUIT_THRESHOLD: usize = 6;
/// One Wizard and one Fool per suit.
pub const SPECIALS_PER_SUIT: usize = 2;
pub const RANKS_PER_SUIT: usize = (MAX_RANK - MIN_RANK + 1) as usize;

pub fn suit_count_for(active_players: usize) -> u8 {
    if active_players > EXTENDED_SUIT_THRESHOLD {
        EXTENDED_SUITS
    } else {
        BASE_SUITS
    }
}

pub fn number_card_count(suit_count: u8) -> usize {
    suit_count as usize * RANKS_PER_SUIT
}

pub fn deck_size(suit_count: u8) -> usize {
    suit_count as usize * (RANKS_PER_SUIT + SPECIALS_PER_SUIT)
}

/// The match ends before dealing a round that the deck cannot cover.
pub fn is_match_over(round_no: u8, active_players: usize, deck_size: usize) -> bool {
    round_no as usize * active_players > deck_size
}

/// A trump card is only turned up when cards remain after the deal.
pub fn draws_trump(round_no: u8, active_players: usize, deck_size: usize) -> bool {
    (round_no as usize * active_players) < deck_size
}

pub fn valid_bid_range(round_no: u8) -> RangeInclusive<u8> {
    0..=round_no
}

/// Number of rounds a match lasts for a fixed active player count.
pub fn rounds_for(active_players: usize) -> u8 {
    if active_players == 0 {
        return 0;
    }
    let size = deck_size(suit_count_for(active_players));
    (size / active_players).min(u8::MAX as usize) as u8
}
