//! Draw pile and discard pile.
//!
//! The deck owns every card that is not in a hand. The top of the discard
//! pile is face up and visible to both players.

use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, Suit, DECK_SIZE, RANKS_PER_SUIT};

/// Both piles empty on a draw. Unreachable while the 40-card accounting
/// holds; if it fires, state is corrupt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("draw and discard piles are both empty")]
pub struct DeckExhausted;

#[derive(Debug, Clone)]
pub struct Deck {
    /// Face-down stack, drawn from the end
    pub draw_pile: Vec<Card>,
    /// Face-up stack, last card on top
    pub discard_pile: Vec<Card>,
    rng: ChaCha8Rng,
}

impl Deck {
    /// Build the 40 cards and shuffle them into the draw pile. A fixed seed
    /// reproduces the shuffle and every later reshuffle.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut draw_pile = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in 1..=RANKS_PER_SUIT {
                let card = Card::new(suit, rank).expect("ranks 1..=10 are valid");
                draw_pile.push(card);
            }
        }
        draw_pile.shuffle(&mut rng);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            rng,
        }
    }

    /// Pop the top of the draw pile. An empty draw pile triggers a
    /// reshuffle: every discard except the visible top card goes back into
    /// the draw pile in fresh random order.
    pub fn draw(&mut self) -> Result<Card, DeckExhausted> {
        if self.draw_pile.is_empty() {
            let top = self.discard_pile.pop().ok_or(DeckExhausted)?;
            self.draw_pile.append(&mut self.discard_pile);
            self.draw_pile.shuffle(&mut self.rng);
            self.discard_pile.push(top);
            tracing::debug!(
                moved = self.draw_pile.len(),
                "reshuffled the discard pile under {top}"
            );
        }
        self.draw_pile.pop().ok_or(DeckExhausted)
    }

    /// Take the visible top card of the discard pile, if there is one.
    pub fn draw_from_discard(&mut self) -> Option<Card> {
        self.discard_pile.pop()
    }

    /// Put a card face up on the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    /// The card currently face up, without removing it.
    pub fn top_discard(&self) -> Option<Card> {
        self.discard_pile.last().copied()
    }

    /// Round start: turn the top of the draw pile face up.
    pub fn turn_up_first(&mut self) -> Result<(), DeckExhausted> {
        let card = self.draw_pile.pop().ok_or(DeckExhausted)?;
        self.discard_pile.push(card);
        Ok(())
    }

    /// Cards held by the deck across both piles.
    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Deck {
    /// Debug dump of both piles, draw pile first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck:")?;
        for card in &self.draw_pile {
            write!(f, " {card}")?;
        }
        write!(f, "\nTable:")?;
        for card in &self.discard_pile {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}
