use serde::Serialize;

use crate::domain::cards_types::{Card, Trump};
use crate::domain::roster::Roster;

/// Index into the persisted seating order.
pub type Seat = usize;

/// A card on the table, tagged with the seat that played it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TablePlay {
    pub seat: Seat,
    pub card: Card,
}

/// Overall match progression phases.
///
/// The phase alone decides which actions are accepted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Phase {
    /// Players gather; no match running.
    Lobby,
    /// A Wizard was turned up; `chooser` must name the trump color.
    ChoosingTrump { chooser: Seat },
    /// Players announce bids in seating order.
    Announcing,
    /// Playing tricks within the round; `trick_no` is 1-based.
    Playing { trick_no: u8 },
    /// Trick complete, waiting for the settle continuation.
    TrickResolved { winner: Seat, round_over: bool },
    /// All rounds complete; winners are frozen.
    MatchOver,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        !matches!(self, Phase::Lobby | Phase::MatchOver)
    }
}

/// Per-round state that is relevant during trump selection, bidding and play.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Round number, also the number of cards dealt to each player.
    pub round_no: u8,
    /// Suits in this round's deck (4 or 5).
    pub suit_count: u8,
    /// Undealt remainder of the deck.
    pub stack: Vec<Card>,
    /// Plays of the trick in progress.
    pub table: Vec<TablePlay>,
    /// The card turned up for trump, if any was drawn.
    pub trump_card: Option<Card>,
    /// Trump for the round. `None` only while a chooser is pending.
    pub trump: Option<Trump>,
    /// Seat that opens bidding this round.
    pub first_player: Seat,
    /// Seat that led the current trick.
    pub leader: Seat,
    /// Tricks completed so far this round.
    pub tricks_played: u8,
    /// Player whose turn it is to act.
    /// - Some(seat) while bidding or playing
    /// - None otherwise
    pub turn: Option<Seat>,
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            round_no: 0,
            suit_count: 0,
            stack: Vec::new(),
            table: Vec::new(),
            trump_card: None,
            trump: None,
            first_player: 0,
            leader: 0,
            tricks_played: 0,
            turn: None,
        }
    }
}

// Seat / turn math over the active subset of the roster. Inactive seats are
// skipped in every rotation; seating order never changes while a match runs.

/// Previous active seat counter-clockwise from `from` (wrapping).
pub fn prev_active_seat(roster: &Roster, from: Seat) -> Option<Seat> {
    let n = roster.len();
    (1..=n)
        .map(|step| (from + n - step % n) % n)
        .find(|&s| roster.is_active(s))
}

/// First active seat strictly after `from` that satisfies `pending`.
/// `from` itself is never returned.
pub fn next_pending_seat<F>(roster: &Roster, from: Seat, pending: F) -> Option<Seat>
where
    F: Fn(Seat) -> bool,
{
    let n = roster.len();
    (1..n)
        .map(|step| (from + step) % n)
        .find(|&s| roster.is_active(s) && pending(s))
}

/// Round-start seat: the `(round_no - 1) mod active`-th active seat.
pub fn first_player_for_round(roster: &Roster, round_no: u8) -> Option<Seat> {
    debug_assert!(round_no >= 1, "round_no is 1-based and must be >= 1");
    let active = roster.active_seats();
    if active.is_empty() {
        return None;
    }
    let idx = (round_no.saturating_sub(1) as usize) % active.len();
    Some(active[idx])
}
