//! Self-play: both seats driven by strategies.
//!
//! The engine owns the match totals and a strategy per seat, and runs
//! rounds back to back until someone wins a cycle or a round cap is hit.

use std::fmt;

use serde::Serialize;

use crate::game::{
    self, GameError, MachineMove, MatchState, Player, Round, RoundOutcome, CHINCHON_BONUS,
};
use crate::hand::MoveError;
use crate::strategies::{Strategy, TurnAction};

/// Turns a round may take before self-play gives up with
/// [`GameError::Stalled`]. Generous: rounds between competent strategies
/// run a couple dozen turns.
pub const DEFAULT_TURN_CAP: u32 = 1000;

pub struct MatchEngine {
    human_strategy: Box<dyn Strategy>,
    machine_strategy: Box<dyn Strategy>,
    pub state: MatchState,
    seed: Option<u64>,
    turn_cap: u32,
    rounds_played: u32,
}

impl MatchEngine {
    pub fn new(
        human_strategy: Box<dyn Strategy>,
        machine_strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            human_strategy,
            machine_strategy,
            state: MatchState::default(),
            seed: None,
            turn_cap: DEFAULT_TURN_CAP,
            rounds_played: 0,
        }
    }

    /// Reproducible engine: round `n` shuffles with `seed + n`.
    pub fn with_seed(
        human_strategy: Box<dyn Strategy>,
        machine_strategy: Box<dyn Strategy>,
        seed: u64,
    ) -> Self {
        let mut engine = Self::new(human_strategy, machine_strategy);
        engine.seed = Some(seed);
        engine
    }

    pub fn with_turn_cap(mut self, turn_cap: u32) -> Self {
        self.turn_cap = turn_cap;
        self
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Deal a fresh round and play it out.
    pub fn play_round(&mut self) -> Result<RoundOutcome, GameError> {
        let seed = self
            .seed
            .map(|s| s.wrapping_add(u64::from(self.rounds_played)));
        let mut round = game::new_round(seed).map_err(MoveError::from)?;
        self.finish_round(&mut round)
    }

    /// Play out an existing round from wherever it stands until a close.
    pub fn finish_round(&mut self, round: &mut Round) -> Result<RoundOutcome, GameError> {
        for _ in 0..self.turn_cap {
            let source = self
                .human_strategy
                .choose_draw(&round.human, round.deck.top_discard());
            game::human_draw(round, source)?;
            match self.human_strategy.choose_discard(&round.human) {
                TurnAction::Close(position) => {
                    let outcome = game::human_close(round, position, &mut self.state)?;
                    self.rounds_played += 1;
                    return Ok(outcome);
                }
                TurnAction::Throw(position) => {
                    game::human_throw(round, position)?;
                }
            }
            match game::machine_turn(round, self.machine_strategy.as_mut(), &mut self.state)? {
                MachineMove::Closed { outcome, .. } => {
                    self.rounds_played += 1;
                    return Ok(outcome);
                }
                MachineMove::Threw(_) => {}
            }
        }
        Err(GameError::Stalled {
            turns: self.turn_cap,
        })
    }

    /// Loop rounds until a cycle winner emerges or `max_rounds` is reached.
    pub fn play_match(&mut self, max_rounds: u32) -> Result<MatchSummary, GameError> {
        let mut summary = MatchSummary::default();
        for _ in 0..max_rounds {
            let outcome = self.play_round()?;
            summary.absorb(&outcome);
            if outcome.cycle_winner.is_some() {
                break;
            }
        }
        summary.final_scores = self.state;
        Ok(summary)
    }
}

/// Aggregate of a self-play run, ready for display or JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub rounds: u32,
    pub human_closes: u32,
    pub machine_closes: u32,
    pub chinchones: u32,
    pub cycle_winner: Option<Player>,
    pub final_scores: MatchState,
}

impl MatchSummary {
    fn absorb(&mut self, outcome: &RoundOutcome) {
        self.rounds += 1;
        match outcome.closer {
            Player::Human => self.human_closes += 1,
            Player::Machine => self.machine_closes += 1,
        }
        if outcome.human.points == CHINCHON_BONUS {
            self.chinchones += 1;
        }
        if outcome.machine.points == CHINCHON_BONUS {
            self.chinchones += 1;
        }
        if let Some(winner) = outcome.cycle_winner {
            self.cycle_winner = Some(winner);
        }
    }
}

impl fmt::Display for MatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} rounds: human closed {}, machine closed {}, {} chinchones",
            self.rounds, self.human_closes, self.machine_closes, self.chinchones
        )?;
        write!(
            f,
            "score: human {} machine {}",
            self.final_scores.human_score, self.final_scores.machine_score
        )?;
        match self.cycle_winner {
            Some(winner) => write!(f, " ({winner:?} took the cycle)"),
            None => Ok(()),
        }
    }
}
