use std::collections::HashSet;

use tracing::{debug, info};

use super::{GameEngine, SettleTicket};
use crate::domain::cards_logic::sort_hand;
use crate::domain::cards_types::Trump;
use crate::domain::dealing::{classify_trump_card, deal_hands, full_deck, DeckRng, TrumpDraw};
use crate::domain::rules::{deck_size, draws_trump, is_match_over, suit_count_for};
use crate::domain::scoring::{apply_round_scoring, winners};
use crate::domain::seed_derivation::derive_dealing_seed;
use crate::domain::state::{first_player_for_round, prev_active_seat, Phase, RoundState};
use crate::domain::tricks::resolve_current_trick;
use crate::errors::domain::{DomainError, ValidationKind};

impl GameEngine {
    /// Begin a fresh match from the lobby or after a finished match.
    ///
    /// Inactive players are dropped, scores reset and round 1 is dealt.
    pub fn start(&mut self) -> Result<(), DomainError> {
        if self.phase.is_running() {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "A match is already running",
            ));
        }
        let active = self.roster.active_count();
        if active < self.config.min_players {
            return Err(DomainError::validation(
                ValidationKind::NotEnoughPlayers,
                format!(
                    "Need at least {} players, have {active}",
                    self.config.min_players
                ),
            ));
        }

        self.cancel_pending_settle();
        self.roster.prune_inactive();
        for (_, player) in self.roster.iter_mut() {
            player.score = 0;
        }
        self.winners.clear();
        self.match_no += 1;
        info!(match_no = self.match_no, players = active, "Match started");

        self.begin_round(1);
        self.notifications.mark_all();
        Ok(())
    }

    /// Deliver a settle continuation. Stale or unknown tickets are ignored.
    ///
    /// Returns whether the ticket was current and acted upon.
    pub fn settle(&mut self, ticket: SettleTicket) -> bool {
        if self.pending_settle != Some(ticket) {
            debug!(
                match_no = ticket.match_no,
                generation = ticket.generation,
                "Ignoring stale settle"
            );
            return false;
        }
        self.pending_settle = None;

        let Phase::TrickResolved { winner, round_over } = self.phase else {
            return false;
        };
        self.round.table.clear();
        self.notifications.mark_all();

        if !round_over {
            self.phase = Phase::Playing {
                trick_no: self.round.tricks_played + 1,
            };
            self.round.leader = winner;
            self.round.turn = self.first_to_act_from(winner);
            if self.round.turn.is_some() {
                debug!(leader = winner, "Next trick");
                return true;
            }
            // Nobody holding cards is left at the table.
            self.finish_round();
        }
        self.begin_round(self.round.round_no.saturating_add(1));
        true
    }

    /// Deal round `round_no`, or end the match when the deck cannot cover it.
    pub(super) fn begin_round(&mut self, round_no: u8) {
        let active = self.roster.active_count();
        let suit_count = suit_count_for(active);
        let size = deck_size(suit_count);
        if active == 0 || is_match_over(round_no, active, size) {
            self.finish_match();
            return;
        }

        for (_, player) in self.roster.iter_mut() {
            player.reset_round();
        }
        let mut round = RoundState::empty();
        round.round_no = round_no;
        round.suit_count = suit_count;
        round.stack = full_deck(suit_count);
        round.first_player = first_player_for_round(&self.roster, round_no).unwrap_or(0);
        round.leader = round.first_player;

        let seed = derive_dealing_seed(self.match_seed, self.match_no, round_no);
        let mut rng = DeckRng::from_seed(seed);

        let mut chooser = None;
        if draws_trump(round_no, active, size) {
            round.trump_card = rng.draw(&mut round.stack);
        }
        match classify_trump_card(round.trump_card.as_ref()) {
            TrumpDraw::Nothing => round.trump = Some(Trump::NoTrump),
            TrumpDraw::Settled(trump) => round.trump = Some(trump),
            TrumpDraw::NeedsChoice => {
                chooser = prev_active_seat(&self.roster, round.first_player);
            }
        }

        let seats = self.roster.active_seats();
        let trump_color = round.trump.and_then(|t| t.color());
        let hands = deal_hands(&mut rng, &mut round.stack, seats.len(), round_no, trump_color);
        for (seat, hand) in seats.into_iter().zip(hands) {
            if let Some(player) = self.roster.get_mut(seat) {
                player.hand = hand;
            }
        }
        self.round = round;

        match chooser {
            Some(chooser) => {
                self.phase = Phase::ChoosingTrump { chooser };
                self.round.turn = Some(chooser);
            }
            None => {
                self.phase = Phase::Announcing;
                self.round.turn = Some(self.round.first_player);
            }
        }
        info!(
            match_no = self.match_no,
            round_no,
            active,
            suit_count,
            first_player = self.round.first_player,
            trump = ?self.round.trump,
            "Round dealt"
        );
        self.notifications.mark_all();
        self.debug_check_conservation();
    }

    /// All bids are in: start the first trick.
    ///
    /// A departure can leave the active bids summing to the round; the most
    /// recent active bidder then has to announce again.
    pub(super) fn close_announcing(&mut self) {
        let total: u32 = self
            .roster
            .iter()
            .filter(|(_, p)| p.active)
            .filter_map(|(_, p)| p.announcement)
            .map(u32::from)
            .sum();
        if total == u32::from(self.round.round_no) && self.reopen_last_bid() {
            return;
        }
        self.notifications.message(format!(
            "{total} of {} tricks announced.",
            self.round.round_no
        ));
        self.notifications.mark_all();
        info!(round_no = self.round.round_no, total, "Announcing closed");

        self.phase = Phase::Playing { trick_no: 1 };
        self.round.leader = self.round.first_player;
        self.round.turn = self.first_to_act_from(self.round.first_player);

        if self.round.round_no == 1 {
            self.auto_play_single_cards();
        } else if self.round.turn.is_none() {
            self.round_without_players();
        }
    }

    /// Clear the announcement of the active player who bid last in seating
    /// order and hand them the turn. Returns false when nobody active has bid.
    fn reopen_last_bid(&mut self) -> bool {
        let n = self.roster.len();
        let first = self.round.first_player;
        let last_bidder = (1..=n).map(|step| (first + n - step) % n).find(|&s| {
            self.roster
                .get(s)
                .is_some_and(|p| p.active && p.announcement.is_some())
        });
        let Some(seat) = last_bidder else {
            return false;
        };
        if let Some(player) = self.roster.get_mut(seat) {
            player.announcement = None;
        }
        self.round.turn = Some(seat);
        info!(
            round_no = self.round.round_no,
            seat,
            player = self.roster.name(seat),
            "Bids sum to the round; announcement reopened"
        );
        self.notifications.mark_all();
        true
    }

    /// Round 1: nobody sees their own card, so every card is played for them
    /// in turn order.
    fn auto_play_single_cards(&mut self) {
        while let Some(seat) = self.round.turn {
            if self.place_card(seat, 0).is_none() {
                break;
            }
            self.round.turn = self.next_to_act(seat);
        }
        if self.round.table.is_empty() {
            self.round_without_players();
        } else {
            self.finish_trick();
        }
    }

    /// Nobody active holds cards: score what there is and move on.
    fn round_without_players(&mut self) {
        self.finish_round();
        self.begin_round(self.round.round_no.saturating_add(1));
    }

    /// Credit the trick winner and schedule the settle continuation.
    pub(super) fn finish_trick(&mut self) {
        let Some(winner) = resolve_current_trick(&self.round.table, self.round.trump) else {
            return;
        };
        self.round.tricks_played += 1;
        self.round.turn = None;
        let mut round_over = false;
        if let Some(player) = self.roster.get_mut(winner) {
            player.tricks_won += 1;
            round_over = player.hand.is_empty();
        }
        let name = self.roster.name(winner).to_string();
        info!(
            winner,
            player = name.as_str(),
            trick = self.round.tricks_played,
            round_over,
            "Trick resolved"
        );
        self.notifications.message(format!("{name} wins the trick."));
        if round_over {
            self.finish_round();
        }
        self.phase = Phase::TrickResolved { winner, round_over };
        self.notifications.mark_all();
        self.schedule_settle();
    }

    /// Score the round and announce every player's points.
    fn finish_round(&mut self) {
        let deltas = apply_round_scoring(&mut self.roster, self.config.inactive_scoring);
        for (seat, delta) in deltas {
            let name = self.roster.name(seat);
            info!(seat, player = name, delta, "Round scored");
            self.notifications
                .message(format!("{name} makes {delta} points."));
        }
        self.notifications.mark_players();
    }

    fn finish_match(&mut self) {
        self.phase = Phase::MatchOver;
        self.round.turn = None;
        self.round.table.clear();
        self.winners = winners(&self.roster);
        info!(
            match_no = self.match_no,
            winners = ?self.winners(),
            "Match over"
        );
        self.notifications.mark_all();
    }

    fn schedule_settle(&mut self) {
        self.cancel_pending_settle();
        self.settle_generation += 1;
        let ticket = SettleTicket {
            match_no: self.match_no,
            generation: self.settle_generation,
        };
        self.pending_settle = Some(ticket);
        self.scheduler.schedule(ticket, self.config.settle_delay);
        debug!(
            match_no = ticket.match_no,
            generation = ticket.generation,
            "Settle scheduled"
        );
    }

    /// Keep hands in display order for the current trump.
    pub(super) fn resort_hands(&mut self) {
        let trump = self.round.trump.and_then(|t| t.color());
        for (_, player) in self.roster.iter_mut() {
            sort_hand(&mut player.hand, trump);
        }
    }

    /// Every card of the round's deck is in exactly one place.
    pub(super) fn debug_check_conservation(&self) {
        if !cfg!(debug_assertions) || !self.phase.is_running() {
            return;
        }
        let mut seen = HashSet::new();
        let placed = self
            .round
            .stack
            .iter()
            .chain(self.round.trump_card.iter())
            .chain(self.round.table.iter().map(|p| &p.card))
            .chain(self.roster.iter().flat_map(|(_, p)| p.hand.iter()));
        for card in placed {
            debug_assert!(seen.insert(card.id), "card {} appears twice", card.id);
        }
        debug_assert_eq!(
            seen.len(),
            deck_size(self.round.suit_count),
            "cards went missing"
        );
    }
}
