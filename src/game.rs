//! Round flow and match scoring.
//!
//! A round walks `HumanDraw -> HumanDiscard -> MachineTurn -> HumanDraw ...`
//! until either seat closes, then settles both hands into the running match
//! totals. The human seat is driven by whatever sits on the other side of
//! the external interface; the machine seat by a [`Strategy`].

use serde::Serialize;

use crate::analyzer::Evaluation;
use crate::card::Card;
use crate::deck::{Deck, DeckExhausted};
use crate::hand::{Hand, IllegalMovement, MoveError};
use crate::strategies::{DrawSource, Strategy, TurnAction};

/// A running total above this ends the cycle for whoever crossed it.
pub const ELIMINATION_SCORE: i32 = 100;

/// Score credited for closing with zero deadwood.
pub const CHINCHON_BONUS: i32 = -10;

/// Whose move the round is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    HumanDraw,
    HumanDiscard,
    MachineTurn,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    Human,
    Machine,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Machine,
            Player::Machine => Player::Human,
        }
    }
}

/// Running totals across rounds. Passed by reference into settlement; there
/// is no global score anywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchState {
    pub human_score: i32,
    pub machine_score: i32,
}

impl MatchState {
    /// Absorb a settled round. When a total passes [`ELIMINATION_SCORE`]
    /// the opponent wins the cycle and both totals restart at zero.
    pub fn apply_round(&mut self, human_points: i32, machine_points: i32) -> Option<Player> {
        self.human_score += human_points;
        self.machine_score += machine_points;
        let winner = if self.human_score > ELIMINATION_SCORE {
            Some(Player::Machine)
        } else if self.machine_score > ELIMINATION_SCORE {
            Some(Player::Human)
        } else {
            None
        };
        if let Some(winner) = winner {
            tracing::info!(
                human = self.human_score,
                machine = self.machine_score,
                "cycle over, {winner:?} wins; totals reset"
            );
            self.human_score = 0;
            self.machine_score = 0;
        }
        winner
    }
}

/// One live round: the deck plus both hands.
#[derive(Debug)]
pub struct Round {
    pub deck: Deck,
    pub human: Hand,
    pub machine: Hand,
    pub phase: Phase,
}

/// Shuffle, deal seven cards to each seat and turn up the first discard.
pub fn new_round(seed: Option<u64>) -> Result<Round, DeckExhausted> {
    let mut deck = Deck::new(seed);
    let human = Hand::deal("human", &mut deck)?;
    let machine = Hand::deal("machine", &mut deck)?;
    deck.turn_up_first()?;
    if let Some(card) = deck.top_discard() {
        tracing::debug!("round ready, {card} up");
    }
    Ok(Round {
        deck,
        human,
        machine,
        phase: Phase::HumanDraw,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the round is in {actual:?}, not {expected:?}")]
    WrongPhase { expected: Phase, actual: Phase },
    #[error("no close after {turns} turns of self-play")]
    Stalled { turns: u32 },
    #[error(transparent)]
    Illegal(#[from] IllegalMovement),
    #[error(transparent)]
    Move(#[from] MoveError),
}

fn expect_phase(round: &Round, expected: Phase) -> Result<(), GameError> {
    if round.phase != expected {
        return Err(GameError::WrongPhase {
            expected,
            actual: round.phase,
        });
    }
    Ok(())
}

/// One settled hand: its final arrangement and the points it scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettledHand {
    pub evaluation: Evaluation,
    pub points: i32,
}

/// A finished round, ready for display or serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundOutcome {
    pub closer: Player,
    pub human: SettledHand,
    pub machine: SettledHand,
    pub cycle_winner: Option<Player>,
}

fn round_points(total: u32) -> i32 {
    if total == 0 {
        CHINCHON_BONUS
    } else {
        total as i32
    }
}

fn settle(round: &mut Round, closer: Player, state: &mut MatchState) -> RoundOutcome {
    round.phase = Phase::Finished;
    let human = round.human.evaluate();
    let machine = round.machine.evaluate();
    let human_points = round_points(human.total);
    let machine_points = round_points(machine.total);
    let cycle_winner = state.apply_round(human_points, machine_points);
    tracing::info!(
        closer = ?closer,
        human = human_points,
        machine = machine_points,
        "round settled"
    );
    RoundOutcome {
        closer,
        human: SettledHand {
            evaluation: human,
            points: human_points,
        },
        machine: SettledHand {
            evaluation: machine,
            points: machine_points,
        },
        cycle_winner,
    }
}

/// Human seat draws; the round moves on to the discard phase.
pub fn human_draw(round: &mut Round, source: DrawSource) -> Result<Card, GameError> {
    expect_phase(round, Phase::HumanDraw)?;
    let card = match source {
        DrawSource::Pile => round.human.draw_from_pile(&mut round.deck)?,
        DrawSource::Discard => round.human.draw_from_discard(&mut round.deck)?,
    };
    round.phase = Phase::HumanDiscard;
    Ok(card)
}

/// Human seat throws face up; the machine plays next.
pub fn human_throw(round: &mut Round, position: usize) -> Result<Card, GameError> {
    expect_phase(round, Phase::HumanDiscard)?;
    let card = round.human.throw(&mut round.deck, position)?;
    round.phase = Phase::MachineTurn;
    Ok(card)
}

/// Human seat flips face down, ending the round.
pub fn human_close(
    round: &mut Round,
    position: usize,
    state: &mut MatchState,
) -> Result<RoundOutcome, GameError> {
    expect_phase(round, Phase::HumanDiscard)?;
    round.human.close(&mut round.deck, position)?;
    Ok(settle(round, Player::Human, state))
}

/// What the machine did with its turn.
#[derive(Debug)]
pub enum MachineMove {
    /// Threw this card face up; play returns to the human seat.
    Threw(Card),
    /// Flipped the card at `position` face down and ended the round.
    Closed {
        position: usize,
        outcome: RoundOutcome,
    },
}

/// Run the automated seat's whole turn: draw, then throw or close.
pub fn machine_turn(
    round: &mut Round,
    strategy: &mut dyn Strategy,
    state: &mut MatchState,
) -> Result<MachineMove, GameError> {
    expect_phase(round, Phase::MachineTurn)?;
    match strategy.choose_draw(&round.machine, round.deck.top_discard()) {
        DrawSource::Pile => round.machine.draw_from_pile(&mut round.deck)?,
        DrawSource::Discard => round.machine.draw_from_discard(&mut round.deck)?,
    };
    match strategy.choose_discard(&round.machine) {
        TurnAction::Throw(position) => {
            let card = round.machine.throw(&mut round.deck, position)?;
            round.phase = Phase::HumanDraw;
            Ok(MachineMove::Threw(card))
        }
        TurnAction::Close(position) => {
            round.machine.close(&mut round.deck, position)?;
            Ok(MachineMove::Closed {
                position,
                outcome: settle(round, Player::Machine, state),
            })
        }
    }
}
