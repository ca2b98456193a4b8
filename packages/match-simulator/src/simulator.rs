//! Runs whole matches in memory with bots in every seat.
//!
//! Settles are delivered immediately through a [`ManualScheduler`], so a
//! match of twenty rounds finishes in milliseconds.

use std::error::Error;

use serde::Serialize;
use serde_json::json;
use tracing::debug;
use wizard_engine::domain::cards_parsing::CardDescriptor;
use wizard_engine::domain::cards_types::Color;
use wizard_engine::domain::rules::suit_count_for;
use wizard_engine::domain::state::{Phase, Seat};
use wizard_engine::{EngineConfig, GameEngine, ManualScheduler};

use crate::bots::{Bot, Seen};

/// Upper bound on engine calls per match; a correct match needs far fewer.
const MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub match_num: u32,
    pub seed: u64,
    pub bots: Vec<&'static str>,
    pub final_scores: Vec<i32>,
    pub winners: Vec<String>,
    pub rounds: u8,
    pub tricks: u32,
    /// Rounds in which each seat made exactly its announcement.
    pub exact_bids: Vec<u32>,
}

pub struct Simulator {
    match_num: u32,
    seed: u64,
}

fn seat_name(seat: Seat) -> String {
    format!("seat{seat}")
}

impl Simulator {
    pub fn new(match_num: u32, seed: u64) -> Self {
        Self { match_num, seed }
    }

    pub fn simulate_match(
        &self,
        bots: &mut [Box<dyn Bot>],
    ) -> Result<MatchResult, Box<dyn Error>> {
        let scheduler = ManualScheduler::new();
        let config = EngineConfig::default().with_seed(self.seed);
        let mut engine = GameEngine::new(config, Box::new(scheduler.clone()));
        for seat in 0..bots.len() {
            engine.join(&seat_name(seat))?;
        }
        engine.start()?;

        let mut result = MatchResult {
            match_num: self.match_num,
            seed: self.seed,
            bots: bots.iter().map(|b| b.name()).collect(),
            final_scores: Vec::new(),
            winners: Vec::new(),
            rounds: 0,
            tricks: 0,
            exact_bids: vec![0; bots.len()],
        };

        for _ in 0..MAX_STEPS {
            match engine.phase() {
                Phase::MatchOver => {
                    result.final_scores = engine.roster().iter().map(|(_, p)| p.score).collect();
                    result.winners = engine.winners().into_iter().map(String::from).collect();
                    return Ok(result);
                }
                Phase::Lobby => return Err("engine fell back to the lobby".into()),
                Phase::ChoosingTrump { chooser } => choose_trump(&mut engine, bots, chooser)?,
                Phase::Announcing => announce(&mut engine, bots)?,
                Phase::Playing { .. } => play(&mut engine, bots)?,
                Phase::TrickResolved { .. } => {
                    let ticket = scheduler
                        .take_next()
                        .ok_or("trick resolved without a scheduled settle")?;
                    engine.settle(ticket);
                    continue;
                }
            }

            if let Phase::TrickResolved { round_over, .. } = engine.phase() {
                result.tricks += 1;
                if round_over {
                    record_round(&engine, &mut result);
                }
            }
        }
        Err(format!("match {} did not finish in {MAX_STEPS} steps", self.match_num).into())
    }
}

fn seen_for(engine: &GameEngine, seat: Seat) -> Seen<'_> {
    let player = engine.roster().get(seat);
    Seen {
        hand: player.map(|p| p.hand.as_slice()).unwrap_or(&[]),
        table: engine.table(),
        round_no: engine.round_no(),
        trump: engine.trump(),
        announced: player.and_then(|p| p.announcement),
        tricks_won: player.map(|p| p.tricks_won).unwrap_or(0),
    }
}

fn on_turn(engine: &GameEngine) -> Result<Seat, Box<dyn Error>> {
    engine
        .turn()
        .ok_or_else(|| format!("nobody on turn in {:?}", engine.phase()).into())
}

fn choose_trump(
    engine: &mut GameEngine,
    bots: &mut [Box<dyn Bot>],
    chooser: Seat,
) -> Result<(), Box<dyn Error>> {
    let suit_count = suit_count_for(engine.roster().active_count());
    let color = bots[chooser].choose_trump(
        &seen_for(engine, chooser),
        Color::for_suit_count(suit_count),
    );
    engine.choose_trump(&seat_name(chooser), color.as_str())?;
    Ok(())
}

fn announce(engine: &mut GameEngine, bots: &mut [Box<dyn Bot>]) -> Result<(), Box<dyn Error>> {
    let seat = on_turn(engine)?;
    let round_no = engine.round_no();
    let preferred = bots[seat].bid(&seen_for(engine, seat)).min(round_no);

    // Nearest bid to the preferred one that the table accepts.
    let mut candidates: Vec<u8> = (0..=round_no).collect();
    candidates.sort_by_key(|&b| (b.abs_diff(preferred), b));
    let name = seat_name(seat);
    for bid in candidates {
        match engine.announce(&name, &json!(bid)) {
            Ok(_) => return Ok(()),
            Err(err) => debug!(seat, bid, error = %err, "Bid refused, trying next"),
        }
    }
    Err(format!("no acceptable bid for {name} in round {round_no}").into())
}

fn play(engine: &mut GameEngine, bots: &mut [Box<dyn Bot>]) -> Result<(), Box<dyn Error>> {
    let seat = on_turn(engine)?;
    let name = seat_name(seat);
    let legal = engine.legal_cards(&name)?;
    let card = bots[seat]
        .play(&seen_for(engine, seat), &legal)
        .ok_or_else(|| format!("{name} has no legal card"))?;
    engine.play_card(&name, &CardDescriptor::for_card(&card))?;
    Ok(())
}

fn record_round(engine: &GameEngine, result: &mut MatchResult) {
    result.rounds = engine.round_no();
    for (seat, player) in engine.roster().iter() {
        if player.announcement == Some(player.tricks_won) {
            result.exact_bids[seat] += 1;
        }
    }
}
