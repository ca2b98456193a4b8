use serde_json::Value;
use tracing::{debug, info, warn};

use super::GameEngine;
use crate::domain::bidding::{validate_bid, Bid};
use crate::domain::cards_parsing::CardDescriptor;
use crate::domain::cards_types::{Card, Color, Trump};
use crate::domain::state::{Phase, Seat, TablePlay};
use crate::domain::tricks::{validate_play, PlayCardResult};
use crate::errors::domain::{DomainError, ValidationKind};

fn phase_mismatch(detail: &str) -> DomainError {
    DomainError::validation(ValidationKind::PhaseMismatch, detail)
}

impl GameEngine {
    /// Record `name`'s announcement for the current round.
    ///
    /// `value` is the raw payload; anything but a JSON integer is rejected.
    pub fn announce(&mut self, name: &str, value: &Value) -> Result<Bid, DomainError> {
        if self.phase != Phase::Announcing {
            return Err(phase_mismatch("Announcements are not being taken"));
        }
        let seat = self.require_actor(name)?;
        let bid = Bid::from_json(value)?;

        let others_sum: u32 = self
            .roster
            .iter()
            .filter(|(s, p)| *s != seat && p.active)
            .filter_map(|(_, p)| p.announcement)
            .map(u32::from)
            .sum();
        let closes = self.next_to_act(seat).is_none();
        if let Err(err) = validate_bid(self.round.round_no, bid, others_sum, closes) {
            warn!(player = name, bid = bid.0, error = %err, "Bid rejected");
            return Err(err);
        }

        if let Some(player) = self.roster.get_mut(seat) {
            player.announcement = Some(bid.0);
        }
        info!(player = name, seat, bid_value = bid.0, "Bid recorded");
        self.notifications.mark_players();
        self.pass_turn_from(seat);
        Ok(bid)
    }

    /// Name the trump color after a Wizard was turned up.
    pub fn choose_trump(&mut self, name: &str, color: &str) -> Result<Color, DomainError> {
        let Phase::ChoosingTrump { chooser } = self.phase else {
            return Err(phase_mismatch("No trump choice is pending"));
        };
        let seat = self.lookup(name)?;
        if seat != chooser {
            return Err(DomainError::validation(
                ValidationKind::NotTrumpChooser,
                "Only the dealer's neighbour may choose trump",
            ));
        }
        let color = Color::try_from(color)?;
        if !Color::for_suit_count(self.round.suit_count).contains(&color) {
            return Err(DomainError::validation(
                ValidationKind::InvalidColor,
                format!("{} is not in this deck", color.as_str()),
            ));
        }

        self.round.trump = Some(Trump::Color(color));
        self.resort_hands();
        info!(player = name, trump = color.as_str(), "Trump chosen");

        self.phase = Phase::Announcing;
        self.round.turn = self.first_to_act_from(self.round.first_player);
        self.notifications.mark_all();
        if self.round.turn.is_none() {
            self.close_announcing();
        }
        Ok(color)
    }

    /// Play the described card from `name`'s hand onto the table.
    pub fn play_card(
        &mut self,
        name: &str,
        descriptor: &CardDescriptor,
    ) -> Result<PlayCardResult, DomainError> {
        if !matches!(self.phase, Phase::Playing { .. }) {
            return Err(phase_mismatch("Cards cannot be played right now"));
        }
        let seat = self.require_actor(name)?;
        let hand = self
            .roster
            .get(seat)
            .map(|p| p.hand.as_slice())
            .unwrap_or(&[]);
        let pos = match validate_play(hand, &self.round.table, descriptor) {
            Ok(pos) => pos,
            Err(err) => {
                warn!(player = name, error = %err, "Play rejected");
                return Err(err);
            }
        };

        let card = self.place_card(seat, pos).ok_or_else(|| {
            DomainError::validation(ValidationKind::CardNotInHand, "Card not in hand")
        })?;
        debug!(player = name, seat, card_id = card.id, "Card played");
        self.notifications.mark_all();

        let before = self.round.tricks_played;
        self.pass_turn_from(seat);
        let trick_completed = self.round.tricks_played != before;
        let trick_winner = match self.phase {
            Phase::TrickResolved { winner, .. } if trick_completed => Some(winner),
            _ => None,
        };
        Ok(PlayCardResult {
            card,
            trick_completed,
            trick_winner,
        })
    }

    /// Move a card from `seat`'s hand to the table.
    pub(super) fn place_card(&mut self, seat: Seat, pos: usize) -> Option<Card> {
        let hand = &mut self.roster.get_mut(seat)?.hand;
        if pos >= hand.len() {
            return None;
        }
        let card = hand.remove(pos);
        self.round.table.push(TablePlay { seat, card });
        self.debug_check_conservation();
        Some(card)
    }

    /// Hand the turn to the next seat that still has to act, closing the
    /// phase when nobody is left.
    pub(super) fn pass_turn_from(&mut self, seat: Seat) {
        if let Some(next) = self.next_to_act(seat) {
            self.round.turn = Some(next);
            return;
        }
        match self.phase {
            Phase::Announcing => self.close_announcing(),
            Phase::Playing { .. } if !self.round.table.is_empty() => self.finish_trick(),
            _ => self.round.turn = None,
        }
    }
}
