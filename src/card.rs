//! Spanish-deck cards.
//!
//! The deck has 40 cards: four suits of ten ranks each. Ranks 1-7 are the
//! numeric cards; the three figures (sota, caballo, rey) are stored as ranks
//! 8-10 so that sequences stay contiguous, and printed as 10/11/12.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Total cards in the deck
pub const DECK_SIZE: usize = 40;

/// Ranks per suit (1-7 plus the three figures stored as 8/9/10)
pub const RANKS_PER_SUIT: u8 = 10;

/// The four Spanish suits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Bastos,
    Copas,
    Espadas,
    Oros,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Bastos, Suit::Copas, Suit::Espadas, Suit::Oros];

    /// Initial used in card notation ("10C" is the 10 of copas)
    pub fn letter(&self) -> char {
        match self {
            Suit::Bastos => 'B',
            Suit::Copas => 'C',
            Suit::Espadas => 'E',
            Suit::Oros => 'O',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'B' => Some(Suit::Bastos),
            'C' => Some(Suit::Copas),
            'E' => Some(Suit::Espadas),
            'O' => Some(Suit::Oros),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single card. Immutable once built; equality is suit plus rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    suit: Suit,
    rank: u8,
}

impl Card {
    /// Build a card from its internal rank (1..=10).
    pub fn new(suit: Suit, rank: u8) -> Result<Self, ParseCardError> {
        if rank == 0 || rank > RANKS_PER_SUIT {
            return Err(ParseCardError::NoSuchRank(rank));
        }
        Ok(Self { suit, rank })
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Internal rank, 1..=10. Figures are 8/9/10 so `rank + 1` is the next
    /// card of a sequence.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Deadwood points this card is worth when left unmelded.
    pub fn value(&self) -> u8 {
        self.rank.min(10)
    }

    /// Rank as printed: 1-7 unchanged, figures shown as 10/11/12.
    pub fn display_rank(&self) -> u8 {
        if self.rank >= 8 {
            self.rank + 2
        } else {
            self.rank
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.display_rank(), self.suit)
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parse notation like "1O", "7b" or "12E": displayed rank then suit
    /// letter. Displayed ranks 8 and 9 do not exist in this deck.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCardError::Empty);
        }
        let (idx, suit_char) = s.char_indices().next_back().ok_or(ParseCardError::Empty)?;
        let suit =
            Suit::from_letter(suit_char).ok_or(ParseCardError::UnknownSuit(suit_char))?;
        let shown: u8 = s[..idx]
            .parse()
            .map_err(|_| ParseCardError::Malformed(s.to_string()))?;
        let rank = match shown {
            1..=7 => shown,
            10..=12 => shown - 2,
            _ => return Err(ParseCardError::NoSuchRank(shown)),
        };
        Card::new(suit, rank)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCardError {
    #[error("empty card notation")]
    Empty,
    #[error("unknown suit letter '{0}'")]
    UnknownSuit(char),
    #[error("rank {0} does not exist in the Spanish deck")]
    NoSuchRank(u8),
    #[error("malformed card notation \"{0}\"")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn parses_numeric_and_figure_notation() {
        assert_eq!(card("1O"), Card::new(Suit::Oros, 1).unwrap());
        assert_eq!(card("7b"), Card::new(Suit::Bastos, 7).unwrap());
        assert_eq!(card("10C"), Card::new(Suit::Copas, 8).unwrap());
        assert_eq!(card("11E"), Card::new(Suit::Espadas, 9).unwrap());
        assert_eq!(card("12O"), Card::new(Suit::Oros, 10).unwrap());
    }

    #[test]
    fn rejects_ranks_missing_from_the_deck() {
        assert_eq!("8B".parse::<Card>(), Err(ParseCardError::NoSuchRank(8)));
        assert_eq!("9O".parse::<Card>(), Err(ParseCardError::NoSuchRank(9)));
        assert_eq!("0C".parse::<Card>(), Err(ParseCardError::NoSuchRank(0)));
        assert_eq!("13E".parse::<Card>(), Err(ParseCardError::NoSuchRank(13)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
        assert_eq!("5X".parse::<Card>(), Err(ParseCardError::UnknownSuit('X')));
        assert!(matches!(
            "xO".parse::<Card>(),
            Err(ParseCardError::Malformed(_))
        ));
    }

    #[test]
    fn construction_checks_rank_range() {
        assert!(Card::new(Suit::Oros, 10).is_ok());
        assert_eq!(
            Card::new(Suit::Oros, 11),
            Err(ParseCardError::NoSuchRank(11))
        );
        assert_eq!(Card::new(Suit::Oros, 0), Err(ParseCardError::NoSuchRank(0)));
    }

    #[test]
    fn display_round_trips() {
        for notation in ["1B", "7C", "10E", "11O", "12B"] {
            assert_eq!(card(notation).to_string(), notation);
        }
    }

    #[test]
    fn figures_keep_their_stored_value() {
        assert_eq!(card("10C").value(), 8);
        assert_eq!(card("11C").value(), 9);
        assert_eq!(card("12C").value(), 10);
        assert_eq!(card("3C").value(), 3);
    }
}
