//! Engine for Chinchón, the Spanish rummy-family card game.
//!
//! Two seats share a 40-card Spanish deck. Each turn a player draws, face
//! down from the pile or face up from the table, and throws a card back,
//! trying to arrange the hand into runs and sets. A round ends when
//! someone flips a card face down with at most four points of deadwood
//! left; totals accumulate across rounds until a player passes 100 and
//! hands the cycle to the opponent.
//!
//! The interesting part is [`analyzer`]: a brute-force search over hand
//! permutations that both scores hands and drives the automated seat's
//! choices ([`strategies::SearchBot`]).

pub mod analyzer;
pub mod card;
pub mod deck;
pub mod engine;
pub mod game;
pub mod hand;
pub mod strategies;

pub use analyzer::{evaluate, Evaluation};
pub use card::{Card, ParseCardError, Suit};
pub use deck::{Deck, DeckExhausted};
pub use engine::{MatchEngine, MatchSummary};
pub use game::{
    GameError, MachineMove, MatchState, Phase, Player, Round, RoundOutcome, SettledHand,
};
pub use hand::{Hand, IllegalMovement, MoveError};
pub use strategies::{DrawSource, RandomBot, SearchBot, Strategy, TurnAction};
