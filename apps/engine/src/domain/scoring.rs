use serde::Deserialize;

use crate::domain::roster::Roster;
use crate::domain::state::Seat;

/// Whether disconnected players take part in end-of-round scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InactiveScoring {
    /// Inactive players' scores are frozen while they are away.
    #[default]
    Skip,
    /// Inactive players are scored on their bid like everyone else.
    Include,
}

/// Points for one player's round: exact bids earn `20 + 10 × tricks`, misses
/// lose `10` per trick of difference.
pub fn round_score(announcement: u8, tricks_won: u8) -> i32 {
    let diff = (announcement as i32 - tricks_won as i32).abs();
    if diff == 0 {
        20 + 10 * tricks_won as i32
    } else {
        -10 * diff
    }
}

/// Apply round scoring to the roster; returns `(seat, delta)` per scored player.
///
/// Players who never announced this round (joined the lobby only, or were
/// inactive for the whole deal) are not scored.
pub fn apply_round_scoring(roster: &mut Roster, policy: InactiveScoring) -> Vec<(Seat, i32)> {
    let mut deltas = Vec::new();
    for (seat, player) in roster.iter_mut() {
        if !player.active && policy == InactiveScoring::Skip {
            continue;
        }
        let Some(bid) = player.announcement else {
            continue;
        };
        let delta = round_score(bid, player.tricks_won);
        player.score += delta;
        deltas.push((seat, delta));
    }
    deltas
}

/// All seats tied for the highest score.
pub fn winners(roster: &Roster) -> Vec<Seat> {
    let Some(best) = roster.iter().map(|(_, p)| p.score).max() else {
        return Vec::new();
    };
    roster
        .iter()
        .filter(|(_, p)| p.score == best)
        .map(|(s, _)| s)
        .collect()
}
