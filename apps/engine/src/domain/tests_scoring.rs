use crate::domain::roster::{Player, Roster};
use crate::domain::scoring::{apply_round_scoring, round_score, winners, InactiveScoring};

fn roster_with(rows: &[(&str, Option<u8>, u8, bool)]) -> Roster {
    let mut roster = Roster::new();
    for &(name, bid, tricks, active) in rows {
        let mut p = Player::new(name);
        p.announcement = bid;
        p.tricks_won = tricks;
        p.active = active;
        roster.seat(p);
    }
    roster
}

#[test]
fn exact_bid_earns_bonus_plus_tricks() {
    assert_eq!(round_score(2, 2), 40);
    assert_eq!(round_score(0, 0), 20);
}

#[test]
fn missed_bid_costs_ten_per_trick() {
    assert_eq!(round_score(3, 1), -20);
    assert_eq!(round_score(0, 4), -40);
}

#[test]
fn inactive_players_are_skipped_by_default() {
    let mut roster = roster_with(&[
        ("ann", Some(1), 1, true),
        ("bob", Some(0), 1, false),
        ("cid", Some(2), 0, true),
    ]);
    let deltas = apply_round_scoring(&mut roster, InactiveScoring::default());
    assert_eq!(deltas, vec![(0, 30), (2, -20)]);
    assert_eq!(roster.get(1).unwrap().score, 0);
}

#[test]
fn include_policy_scores_inactive_players() {
    let mut roster = roster_with(&[("ann", Some(1), 1, true), ("bob", Some(0), 1, false)]);
    let deltas = apply_round_scoring(&mut roster, InactiveScoring::Include);
    assert_eq!(deltas, vec![(0, 30), (1, -10)]);
}

#[test]
fn players_without_a_bid_are_not_scored() {
    let mut roster = roster_with(&[("ann", None, 0, true), ("bob", Some(0), 0, true)]);
    let deltas = apply_round_scoring(&mut roster, InactiveScoring::Skip);
    assert_eq!(deltas, vec![(1, 20)]);
}

#[test]
fn ties_share_the_win() {
    let mut roster = roster_with(&[("ann", None, 0, true), ("bob", None, 0, true), ("cid", None, 0, true)]);
    roster.get_mut(0).unwrap().score = 50;
    roster.get_mut(1).unwrap().score = 20;
    roster.get_mut(2).unwrap().score = 50;
    assert_eq!(winners(&roster), vec![0, 2]);
}
