//! A player's hand and its legal moves.
//!
//! Between turns a hand holds exactly [`HAND_SIZE`] cards; drawing makes it
//! [`DRAWN_SIZE`] until a card is thrown or the round is closed. Every
//! operation checks the size first and leaves the hand untouched on failure.

use std::fmt;

use smallvec::SmallVec;

use crate::analyzer::{evaluate, Evaluation};
use crate::card::Card;
use crate::deck::{Deck, DeckExhausted};

/// Cards held between turns
pub const HAND_SIZE: usize = 7;

/// Cards held after drawing, before throwing
pub const DRAWN_SIZE: usize = 8;

/// Most deadwood a hand may keep and still close the round
pub const CLOSE_THRESHOLD: u32 = 4;

/// A move that the rules reject. Raising one changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMovement {
    #[error("can't get more than one card")]
    AlreadyDrew,
    #[error("can't throw before getting")]
    NothingDrawn,
    #[error("no card at position {0}")]
    BadPosition(usize),
    #[error("hand is worth {total} points, closing needs {CLOSE_THRESHOLD} or less")]
    CloseRefused { total: u32 },
    #[error("the discard pile is empty")]
    EmptyDiscard,
}

/// Errors out of moves that touch the draw pile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error(transparent)]
    Illegal(#[from] IllegalMovement),
    #[error(transparent)]
    Exhausted(#[from] DeckExhausted),
}

#[derive(Debug, Clone)]
pub struct Hand {
    pub name: String,
    pub cards: SmallVec<[Card; DRAWN_SIZE]>,
}

impl Hand {
    /// Deal a fresh hand of [`HAND_SIZE`] cards from the deck.
    pub fn deal(name: impl Into<String>, deck: &mut Deck) -> Result<Self, DeckExhausted> {
        let name = name.into();
        let mut cards = SmallVec::new();
        for _ in 0..HAND_SIZE {
            cards.push(deck.draw()?);
        }
        tracing::debug!(hand = %name, "dealt {HAND_SIZE} cards");
        Ok(Self { name, cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of the raw card values, ignoring melds.
    pub fn raw_value(&self) -> u32 {
        self.cards.iter().map(|c| u32::from(c.value())).sum()
    }

    /// Best arrangement of the current cards.
    pub fn evaluate(&self) -> Evaluation {
        evaluate(&self.cards)
    }

    /// Take the face-down top of the draw pile. Legal only between turns.
    pub fn draw_from_pile(&mut self, deck: &mut Deck) -> Result<Card, MoveError> {
        if self.cards.len() != HAND_SIZE {
            return Err(IllegalMovement::AlreadyDrew.into());
        }
        let card = deck.draw()?;
        tracing::info!(hand = %self.name, "takes the face-down card: {card}");
        self.cards.push(card);
        Ok(card)
    }

    /// Take the visible top of the discard pile. Legal only between turns.
    pub fn draw_from_discard(&mut self, deck: &mut Deck) -> Result<Card, MoveError> {
        if self.cards.len() != HAND_SIZE {
            return Err(IllegalMovement::AlreadyDrew.into());
        }
        let card = deck
            .draw_from_discard()
            .ok_or(IllegalMovement::EmptyDiscard)?;
        tracing::info!(hand = %self.name, "takes the table card: {card}");
        self.cards.push(card);
        Ok(card)
    }

    /// Throw the card at `position` face up, ending the turn.
    pub fn throw(&mut self, deck: &mut Deck, position: usize) -> Result<Card, IllegalMovement> {
        if self.cards.len() != DRAWN_SIZE {
            return Err(IllegalMovement::NothingDrawn);
        }
        if position >= self.cards.len() {
            return Err(IllegalMovement::BadPosition(position));
        }
        let card = self.cards.remove(position);
        tracing::info!(hand = %self.name, "throws {card}");
        deck.discard(card);
        Ok(card)
    }

    /// Discard the card at `position` face down, closing the round. Refused
    /// unless the seven remaining cards are worth [`CLOSE_THRESHOLD`] or
    /// less; a refusal leaves the hand exactly as it was.
    pub fn close(
        &mut self,
        deck: &mut Deck,
        position: usize,
    ) -> Result<Evaluation, IllegalMovement> {
        if self.cards.len() != DRAWN_SIZE {
            return Err(IllegalMovement::NothingDrawn);
        }
        if position >= self.cards.len() {
            return Err(IllegalMovement::BadPosition(position));
        }
        let mut kept: SmallVec<[Card; DRAWN_SIZE]> = self.cards.clone();
        kept.remove(position);
        let evaluation = evaluate(&kept);
        if evaluation.total > CLOSE_THRESHOLD {
            return Err(IllegalMovement::CloseRefused {
                total: evaluation.total,
            });
        }
        let card = self.cards[position];
        deck.discard(card);
        self.cards = kept;
        tracing::info!(
            hand = %self.name,
            points = evaluation.total,
            "closes the round, flipping {card}"
        );
        Ok(evaluation)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for card in &self.cards {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn hand_of(name: &str, notations: &[&str]) -> Hand {
        Hand {
            name: name.to_string(),
            cards: notations.iter().map(|s| s.parse().unwrap()).collect(),
        }
    }

    #[test]
    fn dealing_takes_seven_cards() {
        let mut deck = Deck::new(Some(11));
        let hand = Hand::deal("human", &mut deck).unwrap();
        assert_eq!(hand.len(), HAND_SIZE);
        assert_eq!(deck.len(), 33);
    }

    #[test]
    fn cannot_draw_twice() {
        let mut deck = Deck::new(Some(12));
        let mut hand = Hand::deal("human", &mut deck).unwrap();
        hand.draw_from_pile(&mut deck).unwrap();
        let before = hand.cards.clone();
        assert_eq!(
            hand.draw_from_pile(&mut deck),
            Err(IllegalMovement::AlreadyDrew.into())
        );
        assert_eq!(hand.cards, before);
    }

    #[test]
    fn cannot_throw_before_drawing() {
        let mut deck = Deck::new(Some(13));
        let mut hand = Hand::deal("human", &mut deck).unwrap();
        let before = hand.cards.clone();
        assert_eq!(
            hand.throw(&mut deck, 0),
            Err(IllegalMovement::NothingDrawn)
        );
        assert_eq!(hand.cards, before);
    }

    #[test]
    fn draw_from_empty_discard_is_rejected() {
        let mut deck = Deck::new(Some(14));
        let mut hand = Hand::deal("human", &mut deck).unwrap();
        assert!(deck.top_discard().is_none());
        assert_eq!(
            hand.draw_from_discard(&mut deck),
            Err(IllegalMovement::EmptyDiscard.into())
        );
    }

    #[test]
    fn throw_puts_the_card_on_the_table() {
        let mut deck = Deck::new(Some(15));
        let mut hand = Hand::deal("human", &mut deck).unwrap();
        hand.draw_from_pile(&mut deck).unwrap();
        let card = hand.cards[3];
        let thrown = hand.throw(&mut deck, 3).unwrap();
        assert_eq!(thrown, card);
        assert_eq!(hand.len(), HAND_SIZE);
        assert_eq!(deck.top_discard(), Some(card));
    }

    #[test]
    fn close_needs_a_cheap_hand() {
        let mut deck = Deck::new(Some(16));
        // Deadwood after dropping 12O: 1 + 2 + 2 = 5. Refused.
        let mut hand = hand_of(
            "human",
            &["4B", "5B", "6B", "7B", "1O", "2C", "2E", "12O"],
        );
        let before = hand.cards.clone();
        assert_eq!(
            hand.close(&mut deck, 7),
            Err(IllegalMovement::CloseRefused { total: 5 })
        );
        assert_eq!(hand.cards, before);

        // Swapping the loose 2E for 1E brings it to 4. Accepted.
        let mut hand = hand_of(
            "human",
            &["4B", "5B", "6B", "7B", "1O", "2C", "1E", "12O"],
        );
        let evaluation = hand.close(&mut deck, 7).unwrap();
        assert_eq!(evaluation.total, 4);
        assert_eq!(hand.len(), HAND_SIZE);
        assert_eq!(deck.top_discard(), Some("12O".parse().unwrap()));
    }

    #[test]
    fn close_position_is_bounds_checked() {
        let mut deck = Deck::new(Some(17));
        let mut hand = hand_of(
            "human",
            &["4B", "5B", "6B", "1O", "2C", "1E", "12O", "7O"],
        );
        assert_eq!(
            hand.close(&mut deck, 8),
            Err(IllegalMovement::BadPosition(8))
        );
    }

    #[test]
    fn chinchon_closes_for_zero() {
        let mut deck = Deck::new(Some(18));
        let mut hand = hand_of(
            "human",
            &["1B", "2B", "3B", "4B", "7C", "7E", "7O", "12O"],
        );
        let evaluation = hand.close(&mut deck, 7).unwrap();
        assert_eq!(evaluation.total, 0);
    }

    #[test]
    fn display_lists_cards_in_order() {
        let hand = Hand {
            name: "human".to_string(),
            cards: smallvec!["1B".parse().unwrap(), "12O".parse().unwrap()],
        };
        assert_eq!(hand.to_string(), "human: 1B 12O");
    }
}
