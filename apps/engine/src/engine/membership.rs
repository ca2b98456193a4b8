use tracing::{info, warn};

use super::GameEngine;
use crate::domain::roster::Player;
use crate::domain::state::{prev_active_seat, Phase, Seat};
use crate::errors::domain::{ConflictKind, DomainError};

impl GameEngine {
    /// Seat a new player, or reactivate a returning one.
    ///
    /// New names are only accepted while no match is running.
    pub fn join(&mut self, name: &str) -> Result<Seat, DomainError> {
        if let Some(seat) = self.roster.seat_of(name) {
            return self.rejoin(name, seat);
        }

        if self.phase.is_running() {
            warn!(player = name, "Join rejected: match in progress");
            return Err(DomainError::conflict(
                ConflictKind::MatchInProgress,
                "A match is in progress",
            ));
        }

        let seat = self.roster.seat(Player::new(name));
        info!(player = name, seat, "Player joined");
        self.notifications.mark_all();
        Ok(seat)
    }

    fn rejoin(&mut self, name: &str, seat: Seat) -> Result<Seat, DomainError> {
        if self.roster.is_active(seat) {
            warn!(player = name, "Join rejected: name taken");
            return Err(DomainError::conflict(
                ConflictKind::NameTaken,
                format!("'{name}' is already playing"),
            ));
        }
        if let Some(player) = self.roster.get_mut(seat) {
            player.active = true;
        }
        info!(player = name, seat, "Player rejoined");
        self.resume_if_stalled(seat);
        self.notifications.mark_all();
        Ok(seat)
    }

    /// Mark a player inactive. Their seat and cards stay put; turn order
    /// and the trump chooser role move on to the remaining players.
    pub fn leave(&mut self, name: &str) -> Result<(), DomainError> {
        let seat = self.lookup(name)?;
        if !self.roster.is_active(seat) {
            return Ok(());
        }
        if let Some(player) = self.roster.get_mut(seat) {
            player.active = false;
        }
        info!(player = name, seat, "Player left");
        self.notifications.mark_all();

        match self.phase {
            Phase::ChoosingTrump { chooser } if chooser == seat => {
                let next = prev_active_seat(&self.roster, seat);
                if let Some(next) = next {
                    info!(from = seat, to = next, "Trump choice passed on");
                    self.phase = Phase::ChoosingTrump { chooser: next };
                }
                self.round.turn = next;
            }
            Phase::Announcing | Phase::Playing { .. } if self.round.turn == Some(seat) => {
                self.pass_turn_from(seat);
            }
            _ => {}
        }
        Ok(())
    }

    /// A returning player picks up a phase that nobody was left to drive.
    fn resume_if_stalled(&mut self, seat: Seat) {
        match self.phase {
            Phase::ChoosingTrump { chooser } if !self.roster.is_active(chooser) || chooser == seat => {
                self.phase = Phase::ChoosingTrump { chooser: seat };
                self.round.turn = Some(seat);
            }
            Phase::Announcing | Phase::Playing { .. } if self.round.turn.is_none() => {
                self.round.turn = self.first_to_act_from(seat);
            }
            _ => {}
        }
    }
}
