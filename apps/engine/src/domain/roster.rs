//! Players and their persisted seating order.

use crate::domain::cards_types::Card;
use crate::domain::state::Seat;

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub hand: Vec<Card>,
    /// Cumulative score across the match.
    pub score: i32,
    /// Bid for the current round; `None` until announced.
    pub announcement: Option<u8>,
    pub tricks_won: u8,
    pub active: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            score: 0,
            announcement: None,
            tricks_won: 0,
            active: true,
        }
    }

    /// Clear per-round bookkeeping ahead of a new deal.
    pub fn reset_round(&mut self) {
        self.hand.clear();
        self.announcement = None;
        self.tricks_won = 0;
    }
}

/// Seating order is assigned at join time and independent of names.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    seats: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Append a player at the next free seat.
    pub fn seat(&mut self, player: Player) -> Seat {
        self.seats.push(player);
        self.seats.len() - 1
    }

    pub fn seat_of(&self, name: &str) -> Option<Seat> {
        self.seats.iter().position(|p| p.name == name)
    }

    pub fn get(&self, seat: Seat) -> Option<&Player> {
        self.seats.get(seat)
    }

    pub fn get_mut(&mut self, seat: Seat) -> Option<&mut Player> {
        self.seats.get_mut(seat)
    }

    pub fn is_active(&self, seat: Seat) -> bool {
        self.seats.get(seat).is_some_and(|p| p.active)
    }

    pub fn active_seats(&self) -> Vec<Seat> {
        self.seats
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(s, _)| s)
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.seats.iter().filter(|p| p.active).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Seat, &Player)> {
        self.seats.iter().enumerate()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut Player)> {
        self.seats.iter_mut().enumerate()
    }

    /// Drop inactive players. Only valid between matches: it renumbers seats.
    pub fn prune_inactive(&mut self) {
        self.seats.retain(|p| p.active);
    }

    pub fn name(&self, seat: Seat) -> &str {
        self.seats.get(seat).map(|p| p.name.as_str()).unwrap_or("")
    }
}
