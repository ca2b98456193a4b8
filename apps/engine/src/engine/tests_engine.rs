use serde_json::json;

use super::*;
use crate::domain::cards_parsing::CardDescriptor;
use crate::domain::cards_types::{CardFace, Color};
use crate::domain::dealing::full_deck;
use crate::errors::domain::ConflictKind;

fn engine_with(players: usize) -> (GameEngine, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let config = EngineConfig::default().with_seed(7);
    let mut engine = GameEngine::new(config, Box::new(scheduler.clone()));
    for i in 0..players {
        engine.join(&format!("p{i}")).unwrap();
    }
    engine.take_notifications();
    (engine, scheduler)
}

/// Put the engine into `Announcing` for `round_no` with the given hands,
/// drawn from a real deck so card conservation holds.
fn rig(engine: &mut GameEngine, round_no: u8, trump: Trump, hands: &[&[&str]]) {
    let mut stack = full_deck(4);
    for (seat, tokens) in hands.iter().enumerate() {
        let hand = tokens
            .iter()
            .map(|t| {
                let face: CardFace = t.parse().unwrap();
                let pos = stack.iter().position(|c| c.face == face).unwrap();
                stack.swap_remove(pos)
            })
            .collect();
        let player = engine.roster.get_mut(seat).unwrap();
        player.reset_round();
        player.hand = hand;
    }
    engine.round = RoundState {
        round_no,
        suit_count: 4,
        stack,
        table: Vec::new(),
        trump_card: None,
        trump: Some(trump),
        first_player: 0,
        leader: 0,
        tricks_played: 0,
        turn: Some(0),
    };
    engine.phase = Phase::Announcing;
    engine.match_no = 1;
    engine.take_notifications();
}

fn card(token: &str) -> CardDescriptor {
    let face: CardFace = token.parse().unwrap();
    let probe = crate::domain::Card { id: 0, face };
    CardDescriptor {
        id: None,
        ..CardDescriptor::for_card(&probe)
    }
}

fn kind(err: &DomainError) -> ValidationKind {
    err.validation_kind().cloned().unwrap()
}

#[test]
fn start_requires_enough_players() {
    let (mut engine, _) = engine_with(2);
    let err = engine.start().unwrap_err();
    assert_eq!(kind(&err), ValidationKind::NotEnoughPlayers);
    assert_eq!(engine.phase(), Phase::Lobby);
    assert!(engine.take_notifications().is_empty());
}

#[test]
fn join_rules() {
    let (mut engine, _) = engine_with(3);
    let err = engine.join("p1").unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::NameTaken, _)));

    engine.start().unwrap();
    let err = engine.join("newcomer").unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::MatchInProgress, _)
    ));

    engine.leave("p2").unwrap();
    engine.take_notifications();
    assert_eq!(engine.join("p2").unwrap(), 2);
    let notes = engine.take_notifications();
    assert!(notes.state && notes.players);
}

#[test]
fn start_is_rejected_while_running() {
    let (mut engine, _) = engine_with(3);
    engine.start().unwrap();
    engine.take_notifications();
    let err = engine.start().unwrap_err();
    assert_eq!(kind(&err), ValidationKind::PhaseMismatch);
    assert!(engine.take_notifications().is_empty());
}

#[test]
fn round_one_plays_itself_after_announcing() {
    let (mut engine, scheduler) = engine_with(3);
    engine.start().unwrap();
    if let Phase::ChoosingTrump { chooser } = engine.phase() {
        let name = engine.roster().name(chooser).to_string();
        engine.choose_trump(&name, "red").unwrap();
    }
    assert_eq!(engine.phase(), Phase::Announcing);
    assert_eq!(engine.round_no(), 1);
    engine.take_notifications();

    for _ in 0..3 {
        let seat = engine.turn().unwrap();
        let name = engine.roster().name(seat).to_string();
        engine.announce(&name, &json!(0)).unwrap();
    }

    assert!(matches!(
        engine.phase(),
        Phase::TrickResolved {
            round_over: true,
            ..
        }
    ));
    assert_eq!(engine.table().len(), 3);
    let notes = engine.take_notifications();
    assert_eq!(notes.messages[0], "0 of 1 tricks announced.");
    assert!(notes.messages[1].ends_with("wins the trick."));
    assert_eq!(
        notes
            .messages
            .iter()
            .filter(|m| m.contains("makes"))
            .count(),
        3
    );
    assert_eq!(scheduler.pending().len(), 1);

    let ticket = scheduler.take_next().unwrap();
    assert!(engine.settle(ticket));
    assert_eq!(engine.round_no(), 2);
    assert!(engine.table().is_empty());
}

#[test]
fn closing_bid_may_not_match_round() {
    let (mut engine, _) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );
    engine.announce("p0", &json!(1)).unwrap();
    engine.announce("p1", &json!(0)).unwrap();
    engine.take_notifications();

    let err = engine.announce("p2", &json!(1)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::BidSumEqualsRound);
    assert_eq!(engine.turn(), Some(2));
    assert_eq!(engine.roster().get(2).unwrap().announcement, None);
    assert!(engine.take_notifications().is_empty());

    engine.announce("p2", &json!(0)).unwrap();
    assert_eq!(engine.phase(), Phase::Playing { trick_no: 1 });
    assert_eq!(engine.turn(), Some(0));
    let notes = engine.take_notifications();
    assert_eq!(notes.messages, vec!["1 of 2 tricks announced.".to_string()]);
}

#[test]
fn rejected_actions_leave_no_trace() {
    let (mut engine, _) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );

    let err = engine.announce("p1", &json!(0)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::OutOfTurn);
    let err = engine.announce("p0", &json!("two")).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::NotANumber);
    let err = engine.announce("p0", &json!(3)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::InvalidBid);
    let err = engine.play_card("p0", &card("R5")).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::PhaseMismatch);
    let err = engine.choose_trump("p0", "red").unwrap_err();
    assert_eq!(kind(&err), ValidationKind::PhaseMismatch);
    let err = engine.announce("ghost", &json!(0)).unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));

    assert_eq!(engine.turn(), Some(0));
    assert!(engine.roster().iter().all(|(_, p)| p.announcement.is_none()));
    assert!(engine.take_notifications().is_empty());
}

#[test]
fn tricks_resolve_and_round_is_scored() {
    let (mut engine, scheduler) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );
    engine.announce("p0", &json!(1)).unwrap();
    engine.announce("p1", &json!(0)).unwrap();
    engine.announce("p2", &json!(0)).unwrap();
    engine.take_notifications();

    let first = engine.play_card("p0", &card("R5")).unwrap();
    assert!(!first.trick_completed);
    let err = engine.play_card("p1", &card("G2")).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::MustFollowSuit);
    let err = engine.play_card("p1", &card("Y4")).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::CardNotInHand);
    engine.play_card("p1", &card("R9")).unwrap();
    let last = engine.play_card("p2", &card("W")).unwrap();
    assert!(last.trick_completed);
    assert_eq!(last.trick_winner, Some(2));
    assert_eq!(
        engine.phase(),
        Phase::TrickResolved {
            winner: 2,
            round_over: false
        }
    );
    let notes = engine.take_notifications();
    assert_eq!(notes.messages, vec!["p2 wins the trick.".to_string()]);

    // Plays are refused until the table is cleared.
    let err = engine.play_card("p2", &card("F")).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::PhaseMismatch);

    let ticket = scheduler.take_next().unwrap();
    assert!(engine.settle(ticket));
    assert!(!engine.settle(ticket), "a ticket is honoured once");
    assert_eq!(engine.phase(), Phase::Playing { trick_no: 2 });
    assert_eq!(engine.turn(), Some(2));

    // Fool lead: the blue three sets the color.
    engine.play_card("p2", &card("F")).unwrap();
    engine.play_card("p0", &card("B3")).unwrap();
    let last = engine.play_card("p1", &card("G2")).unwrap();
    assert_eq!(last.trick_winner, Some(0));
    assert_eq!(
        engine.phase(),
        Phase::TrickResolved {
            winner: 0,
            round_over: true
        }
    );

    let scores: Vec<i32> = engine.roster().iter().map(|(_, p)| p.score).collect();
    assert_eq!(scores, vec![30, 20, -10]);
    let notes = engine.take_notifications();
    assert_eq!(
        notes.messages,
        vec![
            "p0 wins the trick.".to_string(),
            "p0 makes 30 points.".to_string(),
            "p1 makes 20 points.".to_string(),
            "p2 makes -10 points.".to_string(),
        ]
    );

    let ticket = scheduler.take_next().unwrap();
    assert!(engine.settle(ticket));
    assert_eq!(engine.round_no(), 3);
    assert!(engine
        .roster()
        .iter()
        .all(|(_, p)| p.hand.len() == 3 && p.tricks_won == 0));
}

#[test]
fn wizard_trump_card_hands_choice_to_chooser() {
    let (mut engine, _) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["B5", "R3"], &["R9", "G2"], &["Y1", "F"]],
    );
    let pos = engine
        .round
        .stack
        .iter()
        .position(|c| c.is_wizard())
        .unwrap();
    engine.round.trump_card = Some(engine.round.stack.swap_remove(pos));
    engine.round.trump = None;
    engine.round.turn = Some(2);
    engine.phase = Phase::ChoosingTrump { chooser: 2 };

    let view = engine.state_view("p0");
    assert!(view.announcing);
    assert_eq!(view.choosing_trump.as_deref(), Some("p2"));

    let err = engine.announce("p0", &json!(0)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::PhaseMismatch);
    let err = engine.choose_trump("p0", "red").unwrap_err();
    assert_eq!(kind(&err), ValidationKind::NotTrumpChooser);
    let err = engine.choose_trump("p2", "purple").unwrap_err();
    assert_eq!(kind(&err), ValidationKind::InvalidColor);
    let err = engine.choose_trump("p2", "orange").unwrap_err();
    assert_eq!(kind(&err), ValidationKind::InvalidColor);
    assert!(engine.take_notifications().is_empty());

    assert_eq!(engine.choose_trump("p2", "Blue").unwrap(), Color::Blue);
    assert_eq!(engine.phase(), Phase::Announcing);
    assert_eq!(engine.trump(), Some(Trump::Color(Color::Blue)));
    assert_eq!(engine.turn(), Some(0));
    // Trump color sorts after the other colors.
    let hand: Vec<_> = engine.hand_of("p0").unwrap().iter().map(|c| c.face).collect();
    assert_eq!(
        hand,
        vec![
            CardFace::Number {
                color: Color::Red,
                rank: 3
            },
            CardFace::Number {
                color: Color::Blue,
                rank: 5
            },
        ]
    );
}

#[test]
fn chooser_leaving_passes_the_choice_back() {
    let (mut engine, _) = engine_with(4);
    rig(&mut engine, 1, Trump::NoTrump, &[&["R1"], &["R2"], &["R3"], &["R4"]]);
    engine.round.trump = None;
    engine.phase = Phase::ChoosingTrump { chooser: 3 };
    engine.round.turn = Some(3);

    engine.leave("p3").unwrap();
    assert_eq!(engine.phase(), Phase::ChoosingTrump { chooser: 2 });
    engine.choose_trump("p2", "green").unwrap();
    assert_eq!(engine.turn(), Some(0));
}

#[test]
fn leaving_on_turn_passes_the_turn() {
    let (mut engine, _) = engine_with(4);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"], &["Y7", "Y8"]],
    );
    engine.leave("p0").unwrap();
    assert_eq!(engine.turn(), Some(1));
    engine.announce("p1", &json!(1)).unwrap();
    engine.announce("p2", &json!(0)).unwrap();
    // p3 is the last bidder: 1 + 0 + 1 would equal the round.
    let err = engine.announce("p3", &json!(1)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::BidSumEqualsRound);
    engine.leave("p3").unwrap();
    // Nobody else has to bid, so play starts with the first active seat.
    assert_eq!(engine.phase(), Phase::Playing { trick_no: 1 });
    assert_eq!(engine.turn(), Some(1));
}

#[test]
fn last_bidder_leaving_cannot_close_on_the_round_total() {
    let (mut engine, _) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );
    engine.announce("p0", &json!(1)).unwrap();
    engine.announce("p1", &json!(1)).unwrap();
    engine.take_notifications();

    // 1 + 1 already equals the round, so p1 has to bid again.
    engine.leave("p2").unwrap();
    assert_eq!(engine.phase(), Phase::Announcing);
    assert_eq!(engine.turn(), Some(1));
    assert_eq!(engine.roster().get(1).unwrap().announcement, None);
    assert_eq!(engine.roster().get(0).unwrap().announcement, Some(1));
    let notes = engine.take_notifications();
    assert!(notes.players);
    assert!(notes.messages.is_empty());

    let err = engine.announce("p1", &json!(1)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::BidSumEqualsRound);
    engine.announce("p1", &json!(0)).unwrap();
    assert_eq!(engine.phase(), Phase::Playing { trick_no: 1 });
    assert_eq!(engine.turn(), Some(0));
    let notes = engine.take_notifications();
    assert_eq!(notes.messages, vec!["1 of 2 tricks announced.".to_string()]);
}

#[test]
fn player_without_cards_is_not_asked_to_bid() {
    let (mut engine, _) = engine_with(4);
    // p3 was away when round 2 was dealt and comes back while bids are taken.
    engine.leave("p3").unwrap();
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );
    engine.join("p3").unwrap();
    assert!(engine.hand_of("p3").unwrap().is_empty());
    assert_eq!(engine.turn(), Some(0));

    engine.announce("p0", &json!(1)).unwrap();
    engine.announce("p1", &json!(0)).unwrap();
    // p2 closes the bidding: p3 is not waited for.
    let err = engine.announce("p2", &json!(1)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::BidSumEqualsRound);
    let err = engine.announce("p3", &json!(0)).unwrap_err();
    assert_eq!(kind(&err), ValidationKind::OutOfTurn);
    engine.announce("p2", &json!(0)).unwrap();

    assert_eq!(engine.phase(), Phase::Playing { trick_no: 1 });
    assert_eq!(engine.roster().get(3).unwrap().announcement, None);
    assert!(engine.legal_cards("p3").unwrap().is_empty());
}

#[test]
fn match_ends_when_deck_cannot_cover_the_round() {
    let (mut engine, _) = engine_with(3);
    engine.start().unwrap();
    engine.begin_round(20);
    assert_eq!(engine.round_no(), 20);
    assert!(engine.round.stack.is_empty());
    assert_eq!(engine.round.trump_card, None);
    assert_eq!(engine.trump(), Some(Trump::NoTrump));

    engine.roster.get_mut(0).unwrap().score = 40;
    engine.roster.get_mut(2).unwrap().score = 40;
    engine.begin_round(21);
    assert_eq!(engine.phase(), Phase::MatchOver);
    assert_eq!(engine.winners(), vec!["p0", "p2"]);
    let view = engine.state_view("p1");
    assert!(view.game_over);
    assert_eq!(view.winners, vec!["p0".to_string(), "p2".to_string()]);

    // A fresh match drops absent players and resets scores.
    engine.leave("p1").unwrap();
    engine.join("p3").unwrap();
    engine.start().unwrap();
    assert_eq!(engine.match_no(), 2);
    assert_eq!(engine.roster().len(), 3);
    assert!(engine.roster().iter().all(|(_, p)| p.score == 0));
    assert!(engine.winners().is_empty());
}

#[test]
fn shutdown_makes_pending_settle_stale() {
    let (mut engine, scheduler) = engine_with(3);
    rig(&mut engine, 1, Trump::NoTrump, &[&["R1"], &["R2"], &["R3"]]);
    engine.announce("p0", &json!(0)).unwrap();
    engine.announce("p1", &json!(0)).unwrap();
    engine.announce("p2", &json!(0)).unwrap();
    let ticket = engine.pending_settle().unwrap();
    assert_eq!(scheduler.pending(), vec![ticket]);

    engine.shutdown();
    assert!(scheduler.pending().is_empty());
    assert!(!engine.settle(ticket));
    assert!(matches!(engine.phase(), Phase::TrickResolved { .. }));
}

#[test]
fn legal_cards_only_for_player_on_turn() {
    let (mut engine, _) = engine_with(3);
    rig(
        &mut engine,
        2,
        Trump::NoTrump,
        &[&["R5", "B3"], &["R9", "G2"], &["W", "F"]],
    );
    engine.announce("p0", &json!(1)).unwrap();
    engine.announce("p1", &json!(0)).unwrap();
    engine.announce("p2", &json!(0)).unwrap();
    engine.play_card("p0", &card("R5")).unwrap();

    assert!(engine.legal_cards("p0").unwrap().is_empty());
    let legal: Vec<_> = engine
        .legal_cards("p1")
        .unwrap()
        .iter()
        .map(|c| c.face)
        .collect();
    assert_eq!(
        legal,
        vec![CardFace::Number {
            color: Color::Red,
            rank: 9
        }]
    );
    assert!(engine.legal_cards("ghost").is_err());
}
