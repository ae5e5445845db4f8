//! Coarse hand-strength estimate in `[0, 1]` used by the bots.
//!
//! Preflop it is a bracket lookup over the two hole cards. After the flop it
//! maps the evaluator's category onto a fixed ladder, and falls back to
//! draws read from the same shared [`HandAnalysis`].

use crate::cards::Card;
use crate::evaluator::{evaluate_cards, Category, HandAnalysis};
use crate::hand::HoleCards;

/// Strength of two hole cards before any board card is seen.
pub fn preflop_strength(hole: &HoleCards) -> f64 {
    let (high, low) = hole.high_low();
    let suited = hole.is_suited();

    if hole.is_pair() {
        return match high {
            10.. => 0.9,
            7.. => 0.7,
            _ => 0.5 + f64::from(high) / 20.0,
        };
    }
    if high >= 13 {
        return match (low, suited) {
            (12.., _) => 0.8,
            (10.., true) => 0.7,
            (10.., false) => 0.6,
            (_, true) => 0.5,
            (_, false) => 0.3,
        };
    }
    if high == 12 {
        return match (low, suited) {
            (10.., true) => 0.65,
            (10.., false) => 0.55,
            (_, true) => 0.4,
            (_, false) => 0.25,
        };
    }
    match (high - low - 1, suited) {
        (0, true) => 0.5,
        (0, false) => 0.35,
        (1, true) => 0.4,
        (1, false) => 0.25,
        (_, true) => 0.3,
        (_, false) => 0.15,
    }
}

/// Strength of the hole cards combined with the community cards.
pub fn hand_strength(hole: &HoleCards, community: &[Card]) -> f64 {
    if community.is_empty() {
        return preflop_strength(hole);
    }
    let mut cards = Vec::with_capacity(2 + community.len());
    cards.extend(hole.as_array());
    cards.extend_from_slice(community);

    if let Ok(eval) = evaluate_cards(&cards) {
        let made = match eval.category() {
            Category::RoyalFlush | Category::StraightFlush => Some(0.95),
            Category::FourOfAKind => Some(0.9),
            Category::FullHouse => Some(0.85),
            Category::Flush => Some(0.8),
            Category::Straight => Some(0.75),
            Category::ThreeOfAKind => Some(0.7),
            Category::TwoPair => Some(0.6),
            Category::Pair => Some(0.5),
            Category::HighCard => None,
        };
        if let Some(s) = made {
            return s;
        }
    }

    let analysis = HandAnalysis::new(&cards);
    if analysis.flush_draw() {
        0.4
    } else if analysis.straight_draw() {
        0.35
    } else if has_overcard(hole, community) {
        0.3
    } else {
        0.2
    }
}

fn has_overcard(hole: &HoleCards, community: &[Card]) -> bool {
    let top = community.iter().map(|c| c.value()).max().unwrap_or(0);
    hole.as_array().iter().any(|c| c.value() > top)
}
