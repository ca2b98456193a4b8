//! Player views of match state - what information is visible to a player.
//!
//! Both projections are recomputed from the authoritative state on demand.
//! A player never sees another player's hand, with one exception inherited
//! from the table rules: in round 1 everyone sees the other players' single
//! cards but not their own.

use serde::Serialize;

use crate::domain::cards_types::{Card, Trump};
use crate::domain::roster::Roster;
use crate::domain::state::{Phase, RoundState, Seat};

/// Borrowed match state needed to build views.
#[derive(Debug, Clone, Copy)]
pub struct ViewContext<'a> {
    pub roster: &'a Roster,
    pub phase: Phase,
    pub round: &'a RoundState,
    pub winners: &'a [Seat],
}

/// A card on the table as shown to players.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCardView {
    pub owner: String,
    #[serde(flatten)]
    pub card: Card,
}

/// Per-recipient state snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateView {
    pub round: u8,
    /// Trump color, `null` for no trump or while undecided.
    pub trump: Option<Trump>,
    /// The card turned up for trump, if one was drawn.
    pub trump_card: Option<Card>,
    pub announcing: bool,
    /// Name of the player who must pick trump, if pending.
    pub choosing_trump: Option<String>,
    pub game_over: bool,
    pub winners: Vec<String>,
    pub hand: Vec<Card>,
    pub table: Vec<TableCardView>,
}

/// One row of the broadcast player list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    pub name: String,
    /// Current bid, `-1` until announced.
    pub announcement: i32,
    pub score: i32,
    pub tricks: u8,
    pub turn: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerListView {
    pub players: Vec<PlayerSummary>,
}

fn round_one_reveal(ctx: &ViewContext<'_>) -> bool {
    ctx.round.round_no == 1 && ctx.round.table.is_empty() && ctx.phase.is_running()
}

/// Build the state view for `viewer`. Unknown viewers get a spectator view
/// with an empty hand.
pub fn state_view(ctx: &ViewContext<'_>, viewer: Option<Seat>) -> StateView {
    let round = ctx.round;
    let hidden_own_card = round.round_no <= 1;

    let hand = match viewer.and_then(|s| ctx.roster.get(s)) {
        Some(player) if !hidden_own_card => player.hand.clone(),
        _ => Vec::new(),
    };

    let table = if round_one_reveal(ctx) {
        // Everyone else's single card is visible before it is played.
        ctx.roster
            .iter()
            .filter(|(seat, p)| p.active && Some(*seat) != viewer)
            .flat_map(|(_, p)| {
                p.hand.iter().map(|card| TableCardView {
                    owner: p.name.clone(),
                    card: *card,
                })
            })
            .collect()
    } else {
        round
            .table
            .iter()
            .map(|play| TableCardView {
                owner: ctx.roster.name(play.seat).to_string(),
                card: play.card,
            })
            .collect()
    };

    let choosing_trump = match ctx.phase {
        Phase::ChoosingTrump { chooser } => Some(ctx.roster.name(chooser).to_string()),
        _ => None,
    };

    StateView {
        round: round.round_no,
        trump: round.trump,
        trump_card: round.trump_card,
        announcing: matches!(ctx.phase, Phase::Announcing | Phase::ChoosingTrump { .. }),
        choosing_trump,
        game_over: ctx.phase == Phase::MatchOver,
        winners: ctx
            .winners
            .iter()
            .map(|&s| ctx.roster.name(s).to_string())
            .collect(),
        hand,
        table,
    }
}

/// Build the broadcast player list (active players only, in seating order).
pub fn player_list_view(ctx: &ViewContext<'_>) -> PlayerListView {
    let players = ctx
        .roster
        .iter()
        .filter(|(_, p)| p.active)
        .map(|(seat, p)| PlayerSummary {
            name: p.name.clone(),
            announcement: p.announcement.map_or(-1, i32::from),
            score: p.score,
            tricks: p.tricks_won,
            turn: ctx.round.turn == Some(seat),
        })
        .collect();
    PlayerListView { players }
}
