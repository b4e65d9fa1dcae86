//! Exhaustive-search strategy.
//!
//! Every choice runs the full hand evaluation: take the table card only
//! when it strictly lowers the deadwood, throw the card the best
//! arrangement leaves last, and close as soon as the leftover hand is
//! cheap enough to flip.

use smallvec::SmallVec;

use super::{DrawSource, Strategy, TurnAction};
use crate::analyzer::{evaluate, MAX_EVAL};
use crate::card::Card;
use crate::hand::{Hand, CLOSE_THRESHOLD, HAND_SIZE};

/// A closing hand must leave its last loose card below this rank.
const CLOSE_TAIL_RANK: u8 = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct SearchBot;

impl SearchBot {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for SearchBot {
    fn choose_draw(&mut self, hand: &Hand, top_discard: Option<Card>) -> DrawSource {
        let Some(top) = top_discard else {
            return DrawSource::Pile;
        };
        let current = evaluate(&hand.cards).total;
        let mut with_top: SmallVec<[Card; MAX_EVAL]> = hand.cards.clone();
        with_top.push(top);
        if evaluate(&with_top).total < current {
            tracing::debug!(hand = %hand.name, "the table card {top} improves the hand");
            DrawSource::Discard
        } else {
            DrawSource::Pile
        }
    }

    fn choose_discard(&mut self, hand: &Hand) -> TurnAction {
        let evaluation = hand.evaluate();
        let to_throw = evaluation.arrangement[hand.len() - 1];
        let position = hand
            .cards
            .iter()
            .position(|&c| c == to_throw)
            .unwrap_or(hand.len() - 1);

        let mut kept: SmallVec<[Card; MAX_EVAL]> = hand.cards.clone();
        kept.remove(position);
        let kept_eval = evaluate(&kept);
        // Flip only when the leftover hand is closeable and its loose tail
        // card is small.
        if kept_eval.total <= CLOSE_THRESHOLD
            && kept_eval.arrangement[HAND_SIZE - 1].rank() < CLOSE_TAIL_RANK
        {
            TurnAction::Close(position)
        } else {
            TurnAction::Throw(position)
        }
    }
}
