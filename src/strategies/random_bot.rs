//! Baseline strategy that plays legal moves at random.
//!
//! Useful as a sparring partner in self-play tests: it never makes an
//! illegal move, but applies no judgement beyond closing when the card it
//! happened to pick leaves a closeable hand.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{DrawSource, Strategy, TurnAction};
use crate::analyzer::evaluate;
use crate::card::Card;
use crate::hand::{Hand, CLOSE_THRESHOLD};

pub struct RandomBot {
    rng: SmallRng,
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomBot {
    fn choose_draw(&mut self, _hand: &Hand, top_discard: Option<Card>) -> DrawSource {
        if top_discard.is_some() && self.rng.gen_bool(0.5) {
            DrawSource::Discard
        } else {
            DrawSource::Pile
        }
    }

    fn choose_discard(&mut self, hand: &Hand) -> TurnAction {
        let position = self.rng.gen_range(0..hand.len());
        let mut kept = hand.cards.clone();
        kept.remove(position);
        if evaluate(&kept).total <= CLOSE_THRESHOLD {
            TurnAction::Close(position)
        } else {
            TurnAction::Throw(position)
        }
    }
}
