//! Automated player strategies.

mod random_bot;
mod search_bot;

pub use random_bot::RandomBot;
pub use search_bot::SearchBot;

use crate::card::Card;
use crate::hand::Hand;

/// Where to take the turn's card from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    /// Face down, from the draw pile
    Pile,
    /// Face up, from the top of the discard pile
    Discard,
}

/// What to do with the eight-card hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnAction {
    /// Throw the card at this position face up
    Throw(usize),
    /// Flip the card at this position face down, ending the round
    Close(usize),
}

/// Decision procedure for an automated seat.
///
/// `choose_draw` sees the hand between turns (seven cards) and the visible
/// top discard; `choose_discard` sees the hand right after drawing (eight
/// cards) and picks the card to put down.
pub trait Strategy {
    fn choose_draw(&mut self, hand: &Hand, top_discard: Option<Card>) -> DrawSource;

    fn choose_discard(&mut self, hand: &Hand) -> TurnAction;
}
