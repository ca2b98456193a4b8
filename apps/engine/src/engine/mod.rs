//! Match state machine - owns one table's roster, round and phase.
//!
//! The engine is synchronous and single-owner. Every operation either
//! succeeds and records notifications, or fails with a [`DomainError`] and
//! leaves the state untouched. Delayed work (clearing a resolved trick) is
//! delegated to a [`SettleScheduler`] and comes back through
//! [`GameEngine::settle`].

mod membership;
mod notify;
mod player_actions;
mod round_lifecycle;
pub mod scheduler;

use rand::Rng;
use tracing::debug;

pub use notify::Notifications;
pub use scheduler::{ManualScheduler, SettleScheduler, SettleTicket};

use crate::config::engine::EngineConfig;
use crate::domain::cards_logic::legal_cards;
use crate::domain::cards_types::{Card, Trump};
use crate::domain::player_view::{self, PlayerListView, StateView, ViewContext};
use crate::domain::roster::Roster;
use crate::domain::state::{next_pending_seat, Phase, RoundState, Seat, TablePlay};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

pub struct GameEngine {
    config: EngineConfig,
    roster: Roster,
    phase: Phase,
    round: RoundState,
    winners: Vec<Seat>,
    match_seed: u64,
    /// Matches started by this engine; 0 until the first `start`.
    match_no: u64,
    /// Bumped for every scheduled or cancelled settle.
    settle_generation: u64,
    pending_settle: Option<SettleTicket>,
    notifications: Notifications,
    scheduler: Box<dyn SettleScheduler>,
}

impl GameEngine {
    pub fn new(config: EngineConfig, scheduler: Box<dyn SettleScheduler>) -> Self {
        let match_seed = config.seed.unwrap_or_else(|| rand::rng().random());
        debug!(match_seed, "Engine created");
        Self {
            config,
            roster: Roster::new(),
            phase: Phase::Lobby,
            round: RoundState::empty(),
            winners: Vec::new(),
            match_seed,
            match_no: 0,
            settle_generation: 0,
            pending_settle: None,
            notifications: Notifications::default(),
            scheduler,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn round_no(&self) -> u8 {
        self.round.round_no
    }

    pub fn match_no(&self) -> u64 {
        self.match_no
    }

    pub fn trump(&self) -> Option<Trump> {
        self.round.trump
    }

    /// Seat expected to act next, if any.
    pub fn turn(&self) -> Option<Seat> {
        self.round.turn
    }

    pub fn table(&self) -> &[TablePlay] {
        &self.round.table
    }

    /// Undealt cards of the current round.
    pub fn stack(&self) -> &[Card] {
        &self.round.stack
    }

    pub fn trump_card(&self) -> Option<Card> {
        self.round.trump_card
    }

    /// Suits in the deck dealt for the current round.
    pub fn suit_count(&self) -> u8 {
        self.round.suit_count
    }

    pub fn pending_settle(&self) -> Option<SettleTicket> {
        self.pending_settle
    }

    pub fn winners(&self) -> Vec<&str> {
        self.winners.iter().map(|&s| self.roster.name(s)).collect()
    }

    pub fn hand_of(&self, name: &str) -> Option<&[Card]> {
        let seat = self.roster.seat_of(name)?;
        self.roster.get(seat).map(|p| p.hand.as_slice())
    }

    /// Cards `name` may legally play right now; empty when it is not their turn.
    pub fn legal_cards(&self, name: &str) -> Result<Vec<Card>, DomainError> {
        let seat = self.lookup(name)?;
        let (Phase::Playing { .. }, Some(turn)) = (self.phase, self.round.turn) else {
            return Ok(Vec::new());
        };
        if turn != seat {
            return Ok(Vec::new());
        }
        let hand = self.roster.get(seat).map(|p| p.hand.as_slice()).unwrap_or(&[]);
        Ok(legal_cards(hand, &self.round.table))
    }

    /// State view for `name`; unknown names get a spectator view.
    pub fn state_view(&self, name: &str) -> StateView {
        player_view::state_view(&self.view_context(), self.roster.seat_of(name))
    }

    pub fn player_list_view(&self) -> PlayerListView {
        player_view::player_list_view(&self.view_context())
    }

    /// Drain accumulated notifications.
    pub fn take_notifications(&mut self) -> Notifications {
        std::mem::take(&mut self.notifications)
    }

    /// Cancel any scheduled settle; the engine accepts no further continuation.
    pub fn shutdown(&mut self) {
        self.cancel_pending_settle();
        debug!(match_no = self.match_no, "Engine shut down");
    }

    fn view_context(&self) -> ViewContext<'_> {
        ViewContext {
            roster: &self.roster,
            phase: self.phase,
            round: &self.round,
            winners: &self.winners,
        }
    }

    fn lookup(&self, name: &str) -> Result<Seat, DomainError> {
        self.roster.seat_of(name).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("No player named '{name}'"))
        })
    }

    /// Resolve `name` and check it is their turn.
    fn require_actor(&self, name: &str) -> Result<Seat, DomainError> {
        let seat = self.lookup(name)?;
        if self.round.turn != Some(seat) {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "It is not your turn",
            ));
        }
        Ok(seat)
    }

    /// Players dealt out of the round (they were away at the deal) never bid.
    fn awaiting_bid(&self, seat: Seat) -> bool {
        self.roster
            .get(seat)
            .is_some_and(|p| p.active && !p.hand.is_empty() && p.announcement.is_none())
    }

    fn awaiting_play(&self, seat: Seat) -> bool {
        self.roster.get(seat).is_some_and(|p| {
            p.active && !p.hand.is_empty() && !self.round.table.iter().any(|t| t.seat == seat)
        })
    }

    /// Next seat after `from` that still has to act in the current phase.
    fn next_to_act(&self, from: Seat) -> Option<Seat> {
        match self.phase {
            Phase::Announcing => next_pending_seat(&self.roster, from, |s| self.awaiting_bid(s)),
            Phase::Playing { .. } => {
                next_pending_seat(&self.roster, from, |s| self.awaiting_play(s))
            }
            _ => None,
        }
    }

    /// Like [`Self::next_to_act`] but `start` itself is considered first.
    fn first_to_act_from(&self, start: Seat) -> Option<Seat> {
        let pending = match self.phase {
            Phase::Announcing => self.awaiting_bid(start),
            Phase::Playing { .. } => self.awaiting_play(start),
            _ => false,
        };
        if pending {
            Some(start)
        } else {
            self.next_to_act(start)
        }
    }

    fn cancel_pending_settle(&mut self) {
        if let Some(ticket) = self.pending_settle.take() {
            self.scheduler.cancel(ticket);
            self.settle_generation += 1;
            debug!(
                match_no = ticket.match_no,
                generation = ticket.generation,
                "Pending settle cancelled"
            );
        }
    }
}

#[cfg(test)]
mod tests_engine;
