pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

pub use hand_analysis::HandAnalysis;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Compact, comparable hand strength. Higher is better.
/// Encodes category and ranked tiebreakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category together with the values that define it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandDetail {
    HighCard { high: Rank },
    Pair { pair: Rank },
    TwoPair { high: Rank, low: Rank },
    ThreeOfAKind { trips: Rank },
    Straight { high: Rank },
    Flush { high: Rank },
    FullHouse { three: Rank, two: Rank },
    FourOfAKind { quad: Rank },
    StraightFlush { high: Rank },
    RoyalFlush,
}

impl HandDetail {
    pub const fn category(&self) -> Category {
        match self {
            HandDetail::HighCard { .. } => Category::HighCard,
            HandDetail::Pair { .. } => Category::Pair,
            HandDetail::TwoPair { .. } => Category::TwoPair,
            HandDetail::ThreeOfAKind { .. } => Category::ThreeOfAKind,
            HandDetail::Straight { .. } => Category::Straight,
            HandDetail::Flush { .. } => Category::Flush,
            HandDetail::FullHouse { .. } => Category::FullHouse,
            HandDetail::FourOfAKind { .. } => Category::FourOfAKind,
            HandDetail::StraightFlush { .. } => Category::StraightFlush,
            HandDetail::RoyalFlush => Category::RoyalFlush,
        }
    }
}

impl fmt::Display for HandDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HandDetail::HighCard { high } => write!(f, "High Card {}", high.label()),
            HandDetail::Pair { pair } => write!(f, "Pair of {}s", pair.label()),
            HandDetail::TwoPair { high, low } => {
                write!(f, "Two Pair, {}s and {}s", high.label(), low.label())
            }
            HandDetail::ThreeOfAKind { trips } => write!(f, "Three of a Kind, {}s", trips.label()),
            HandDetail::Straight { high } => write!(f, "Straight, {} high", high.label()),
            HandDetail::Flush { high } => write!(f, "Flush, {} high", high.label()),
            HandDetail::FullHouse { three, two } => {
                write!(f, "Full House, {}s over {}s", three.label(), two.label())
            }
            HandDetail::FourOfAKind { quad } => write!(f, "Four of a Kind, {}s", quad.label()),
            HandDetail::StraightFlush { high } => write!(f, "Straight Flush, {} high", high.label()),
            HandDetail::RoyalFlush => f.write_str("Royal Flush"),
        }
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
pub struct Evaluation {
    pub detail: HandDetail,
    value: HandValue,
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

impl Evaluation {
    /// Return the packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        self.value
    }

    pub const fn category(&self) -> Category {
        self.detail.category()
    }

    pub fn description(&self) -> String {
        self.detail.to_string()
    }
}

impl HandValue {
    /// Return the packed comparable value.
    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn category_ordinal(self) -> u8 {
        (self.0 >> 48) as u8
    }

    /// Pack a category and five rank tiebreakers into a comparable value.
    pub fn from_parts(category: Category, ranks_desc: &[Rank; 5]) -> Self {
        // [ category (8 bits) | r0 (6) | r1 (6) | r2 (6) | r3 (6) | r4 (6) | 18 zero bits ]
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (category as u64) << CAT_SHIFT;
        for (i, r) in ranks_desc.iter().enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (*r as u64) << offset;
        }
        HandValue(v)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("not enough cards to evaluate")]
    NotEnoughCards,
    #[error("too many cards to evaluate: {0}")]
    TooManyCards(usize),
    #[error("duplicate cards in hand")]
    DuplicateCards,
}

/// Evaluate any five to seven distinct cards, picking the best five.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{evaluate_cards, Category};
///
/// let cards = parse_cards("Kc Kd Kh 2s 2d 9c 4h").unwrap();
/// let eval = evaluate_cards(&cards).unwrap();
/// assert_eq!(eval.category(), Category::FullHouse);
/// assert_eq!(eval.description(), "Full House, Ks over 2s");
/// ```
pub fn evaluate_cards(cards: &[Card]) -> Result<Evaluation, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards);
    }
    if cards.len() > 7 {
        return Err(EvalError::TooManyCards(cards.len()));
    }
    let unique: HashSet<&Card> = cards.iter().collect();
    if unique.len() != cards.len() {
        return Err(EvalError::DuplicateCards);
    }
    Ok(evaluate_unchecked(cards))
}

/// Evaluate seven cards (2 hole + 5 board).
pub fn evaluate_seven(cards: &[Card; 7]) -> Result<Evaluation, EvalError> {
    evaluate_cards(cards)
}

fn evaluate_unchecked(cards: &[Card]) -> Evaluation {
    let analysis = HandAnalysis::new(cards);
    detector::DETECTORS
        .iter()
        .find_map(|d| d.evaluate(&analysis))
        // HighCardDetector matches any non-empty hand
        .unwrap_or_else(|| analysis.build_evaluation(HandDetail::HighCard { high: Rank::Two }, &[]))
}

/// Evaluate a Hold'em hand given hole cards and a full board.
///
/// ```
/// use holdem_engine::evaluator::{evaluate_holdem, Category};
/// use holdem_engine::hand::{Board, HoleCards};
///
/// let hole: HoleCards = "As Ah".parse().unwrap();
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let eval = evaluate_holdem(&hole, &board).unwrap();
/// assert_eq!(eval.category(), Category::Pair);
/// ```
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let board_cards = board.as_slice();
    if board_cards.len() < 5 {
        return Err(EvalError::NotEnoughCards);
    }
    let mut seven = Vec::with_capacity(7);
    seven.extend(hole.as_array());
    seven.extend_from_slice(board_cards);
    Ok(evaluate_unchecked(&seven))
}

/// Compare two Hold'em hands on a shared board.
///
/// ```
/// use holdem_engine::evaluator::compare_holdem;
/// use holdem_engine::hand::{Board, HoleCards};
/// use std::cmp::Ordering;
///
/// let board: Board = "Qc Jd 9h 3s 2c".parse().unwrap();
/// let a: HoleCards = "As Ah".parse().unwrap();
/// let b: HoleCards = "Ks Kh".parse().unwrap();
/// assert_eq!(compare_holdem(&a, &b, &board).unwrap(), Ordering::Greater);
/// ```
pub fn compare_holdem(a: &HoleCards, b: &HoleCards, board: &Board) -> Result<Ordering, EvalError> {
    let va = evaluate_holdem(a, board)?;
    let vb = evaluate_holdem(b, board)?;
    Ok(va.cmp(&vb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn eval(s: &str) -> Evaluation {
        evaluate_cards(&parse_cards(s).unwrap()).unwrap()
    }

    #[test]
    fn not_enough_cards_errors() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board = Board::new(parse_cards("2c").unwrap());
        assert_eq!(evaluate_holdem(&hole, &board).unwrap_err(), EvalError::NotEnoughCards);
        assert_eq!(
            evaluate_cards(&parse_cards("As Ks 2c").unwrap()).unwrap_err(),
            EvalError::NotEnoughCards
        );
    }

    #[test]
    fn rejects_duplicates_and_overflow() {
        let dup = parse_cards("As As 2c 3d 4h").unwrap();
        assert_eq!(evaluate_cards(&dup).unwrap_err(), EvalError::DuplicateCards);
        let eight = parse_cards("2c 3c 4c 5c 6c 7c 8c 9c").unwrap();
        assert_eq!(evaluate_cards(&eight).unwrap_err(), EvalError::TooManyCards(8));
    }

    #[test]
    fn overlap_between_hole_and_board_is_invalid() {
        let hole: HoleCards = "As Ks".parse().unwrap();
        let board: Board = "As 2c 3d 4h 9s".parse().unwrap();
        assert!(matches!(evaluate_holdem(&hole, &board), Err(EvalError::InvalidHand(HandError::Overlap))));
    }

    #[test]
    fn descriptions() {
        assert_eq!(eval("As Ks Qs Js Ts 2d 3c").description(), "Royal Flush");
        assert_eq!(eval("9d 8d 7d 6d 5d").description(), "Straight Flush, 9 high");
        assert_eq!(eval("Tc Td Th Ts 2d 5c 7h").description(), "Four of a Kind, 10s");
        assert_eq!(eval("Ac 9c 7c 4c 2c Ad").description(), "Flush, A high");
        assert_eq!(eval("Ac 2d 3h 4s 5c Kd").description(), "Straight, 5 high");
        assert_eq!(eval("Jc Jd Jh 4s 9d").description(), "Three of a Kind, Js");
        assert_eq!(eval("Ac Ad 8h 8s 2d").description(), "Two Pair, As and 8s");
        assert_eq!(eval("9c 9d Ah 8s 2d").description(), "Pair of 9s");
        assert_eq!(eval("Ac Qd 8h 6s 2d").description(), "High Card A");
    }

    #[test]
    fn kickers_break_same_category() {
        assert!(eval("Ac Ad Kh 8s 2d") > eval("Ac Ad Qh 8s 2d"));
        assert_eq!(eval("Ac Ad Kh 8s 2d 3c 4c").value(), eval("As Ah Kd 8c 2h 3d 4d").value());
    }

    #[test]
    fn flush_compares_all_five() {
        assert!(eval("Ac Kc 9c 7c 3c") > eval("Ad Kd 9d 7d 2d"));
    }

    #[test]
    fn category_ordinal_survives_packing() {
        let e = eval("Jc Jd Jh 4s 4d");
        assert_eq!(e.value().category_ordinal(), Category::FullHouse.ordinal());
    }
}
