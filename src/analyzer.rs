//! Hand evaluation: the optimal split of a card set into melds and deadwood.
//!
//! A meld is three or more cards of one suit with consecutive ranks (a run)
//! or three or more cards of equal rank (a set). Melded cards are worth
//! nothing; everything else counts its face value against the player.
//!
//! The search is brute force over every permutation of the hand. Hands hold
//! at most 8 cards, so the worst case is 8! = 40320 scans.

use itertools::Itertools;
use serde::Serialize;
use smallvec::SmallVec;

use crate::card::Card;

/// Largest card set the search is meant for: a full hand plus the drawn card.
pub const MAX_EVAL: usize = 8;

/// Outcome of evaluating a card set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// The winning permutation: melds packed toward the head, deadwood
    /// sunk to the tail. The last position is the discard candidate.
    pub arrangement: SmallVec<[Card; MAX_EVAL]>,
    /// Deadwood total; 0 is a fully melded hand.
    pub total: u32,
}

fn is_run(a: Card, b: Card, c: Card) -> bool {
    a.suit() == b.suit()
        && b.suit() == c.suit()
        && b.rank() == a.rank() + 1
        && c.rank() == b.rank() + 1
}

fn is_set(a: Card, b: Card, c: Card) -> bool {
    a.rank() == b.rank() && b.rank() == c.rank()
}

/// Score one permutation. Returns `(total, pos_score)` where `pos_score`
/// weighs each unmelded position by its reverse index; among permutations
/// with equal totals, the smallest `pos_score` is the one whose deadwood
/// sits closest to the tail.
fn scan(cards: &[Card]) -> (u32, u32) {
    let n = cards.len();
    let mut v: SmallVec<[u32; MAX_EVAL]> = SmallVec::with_capacity(n);
    for i in 0..n {
        let value = u32::from(cards[i].value());
        if i < 2 {
            v.push(value);
            continue;
        }
        if is_run(cards[i - 2], cards[i - 1], cards[i])
            || is_set(cards[i - 2], cards[i - 1], cards[i])
        {
            if v[i - 1] != 0 && v[i - 2] != 0 {
                // fresh meld: consume all three positions
                v[i - 2] = 0;
                v[i - 1] = 0;
                v.push(0);
                continue;
            }
            if v[i - 1] == 0 && v[i - 2] == 0 {
                // fourth or later card of the meld that consumed the
                // previous two positions
                v.push(0);
                continue;
            }
        }
        v.push(value);
    }
    let total = v.iter().sum();
    let pos_score = (0..n)
        .filter(|&i| v[i] != 0)
        .map(|i| (n - 1 - i) as u32)
        .sum();
    (total, pos_score)
}

/// Find the arrangement with the least deadwood. Ties on the total prefer
/// the smallest `pos_score`, then the first permutation enumerated, so the
/// result is fully determined by the input order.
///
/// Works on any card set; factorial in its length, so keep ad-hoc sets
/// around hand size.
pub fn evaluate(cards: &[Card]) -> Evaluation {
    let n = cards.len();
    let mut best_total = u32::MAX;
    let mut best_pos = u32::MAX;
    let mut best: SmallVec<[Card; MAX_EVAL]> = SmallVec::from_slice(cards);
    for perm in cards.iter().copied().permutations(n) {
        let (total, pos_score) = scan(&perm);
        if total < best_total || (total == best_total && pos_score < best_pos) {
            best_total = total;
            best_pos = pos_score;
            best = SmallVec::from_slice(&perm);
        }
    }
    if best_total == u32::MAX {
        // only reachable for the empty set, which has one empty permutation
        best_total = 0;
    }
    Evaluation {
        arrangement: best,
        total: best_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(notations: &[&str]) -> Vec<Card> {
        notations.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn naive_total(cards: &[Card]) -> u32 {
        cards.iter().map(|c| u32::from(c.value())).sum()
    }

    fn sorted_keys(cards: &[Card]) -> Vec<(char, u8)> {
        let mut keys: Vec<(char, u8)> = cards
            .iter()
            .map(|c| (c.suit().letter(), c.rank()))
            .collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn run_of_three_counts_nothing() {
        // 5O + 7E + 4C + 12B stay loose: 5 + 7 + 4 + 10 = 26
        let hand = cards(&["1B", "2B", "3B", "5O", "7E", "4C", "12B"]);
        assert_eq!(evaluate(&hand).total, 26);
    }

    #[test]
    fn set_of_three_counts_nothing() {
        // loose cards: 1 + 3 + 5 + 7 = 16
        let hand = cards(&["11B", "11C", "11E", "1O", "3C", "5B", "7E"]);
        assert_eq!(evaluate(&hand).total, 16);
    }

    #[test]
    fn run_of_four_melds_fully() {
        let hand = cards(&["1B", "2B", "3B", "4B", "6O", "10C", "7E"]);
        assert_eq!(evaluate(&hand).total, 6 + 8 + 7);
    }

    #[test]
    fn four_of_a_kind_melds_fully() {
        let hand = cards(&["5B", "5C", "5E", "5O", "1B", "3O", "7C"]);
        assert_eq!(evaluate(&hand).total, 1 + 3 + 7);
    }

    #[test]
    fn seven_card_run_is_worth_zero() {
        let hand = cards(&["1B", "2B", "3B", "4B", "5B", "6B", "7B"]);
        assert_eq!(evaluate(&hand).total, 0);
    }

    #[test]
    fn run_of_four_plus_set_of_three_is_worth_zero() {
        let hand = cards(&["1B", "2B", "3B", "4B", "7C", "7E", "7O"]);
        assert_eq!(evaluate(&hand).total, 0);
    }

    #[test]
    fn shared_card_goes_where_it_saves_more() {
        // 5E can head the run 5E 6E 7E (leaving 5B 5C loose, 10 points) or
        // complete the set 5B 5C 5E (leaving 6E 7E loose, 13 points).
        let hand = cards(&["5B", "5C", "5E", "6E", "7E"]);
        assert_eq!(evaluate(&hand).total, 10);
    }

    #[test]
    fn deadwood_sinks_to_the_tail() {
        let hand = cards(&["2O", "11B", "4C", "11C", "6B", "11E", "1O"]);
        let eval = evaluate(&hand);
        assert_eq!(eval.total, 2 + 4 + 6 + 1);
        // the set occupies the head of the arrangement
        for card in &eval.arrangement[..3] {
            assert_eq!(card.rank(), 9);
        }
        // everything after it is deadwood, so the last card is loose
        for card in &eval.arrangement[3..] {
            assert_ne!(card.rank(), 9);
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let hand = cards(&["2O", "2B", "2C", "4C", "6B", "10E", "1O"]);
        let first = evaluate(&hand);
        let second = evaluate(&hand);
        assert_eq!(first, second);
    }

    #[test]
    fn tiny_sets_are_plain_sums() {
        assert_eq!(evaluate(&[]).total, 0);
        assert_eq!(evaluate(&cards(&["5O"])).total, 5);
        assert_eq!(evaluate(&cards(&["5O", "5B"])).total, 10);
    }

    mod properties {
        use super::*;
        use crate::card::{Suit, RANKS_PER_SUIT};
        use proptest::prelude::*;

        fn full_deck() -> Vec<Card> {
            let mut all = Vec::new();
            for suit in Suit::ALL {
                for rank in 1..=RANKS_PER_SUIT {
                    all.push(Card::new(suit, rank).unwrap());
                }
            }
            all
        }

        proptest! {
            #[test]
            fn melding_never_raises_the_total(
                hand in proptest::sample::subsequence(full_deck(), 0..=6usize)
            ) {
                let eval = evaluate(&hand);
                prop_assert!(eval.total <= naive_total(&hand));
            }

            #[test]
            fn arrangement_is_a_permutation_of_the_input(
                hand in proptest::sample::subsequence(full_deck(), 0..=6usize)
            ) {
                let eval = evaluate(&hand);
                prop_assert_eq!(sorted_keys(&eval.arrangement), sorted_keys(&hand));
            }
        }
    }
}
