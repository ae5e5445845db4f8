use crate::cards::{parse_cards, Card};
use std::collections::HashSet;
use std::str::FromStr;

/// Most community cards a board can hold.
pub const MAX_BOARD: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("duplicate cards in hole cards")]
    DuplicateHoleCards,
    #[error("too many board cards: {0}")]
    TooManyBoardCards(usize),
    #[error("duplicate cards on board")]
    DuplicateBoardCards,
    #[error("hole cards overlap with board")]
    Overlap,
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("card parse error: {0}")]
    CardParse(String),
}

/// A player's two private cards.
///
/// ```
/// use holdem_engine::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert!(hole.is_suited());
/// assert!(!hole.is_pair());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleCards(Card, Card);

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateHoleCards);
        }
        Ok(Self(a, b))
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match slice {
            [a, b] => Self::try_new(*a, *b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.0
    }

    pub fn second(&self) -> Card {
        self.1
    }

    pub fn as_array(&self) -> [Card; 2] {
        [self.0, self.1]
    }

    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }

    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }

    /// (high, low) numeric values.
    pub fn high_low(&self) -> (u8, u8) {
        let (a, b) = (self.0.value(), self.1.value());
        (a.max(b), a.min(b))
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Self::from_slice(&cards)
    }
}

/// Community cards: empty preflop, then 3, 4 and 5 cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        let board = Self { cards };
        board.validate()?;
        Ok(board)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Highest card value on the board, if any.
    pub fn high_value(&self) -> Option<u8> {
        self.cards.iter().map(|c| c.value()).max()
    }

    fn validate(&self) -> Result<(), HandError> {
        if self.cards.len() > MAX_BOARD {
            return Err(HandError::TooManyBoardCards(self.cards.len()));
        }
        let set: HashSet<Card> = self.cards.iter().copied().collect();
        if set.len() != self.cards.len() {
            return Err(HandError::DuplicateBoardCards);
        }
        Ok(())
    }

    pub(crate) fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub(crate) fn clear(&mut self) {
        self.cards.clear();
    }
}

impl FromStr for Board {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))?;
        Board::try_new(cards)
    }
}

/// Check that hole cards and board form a consistent Hold'em state:
/// 0..=5 distinct board cards and no card shared with the hole.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    board.validate()?;
    if hole.first() == hole.second() {
        return Err(HandError::DuplicateHoleCards);
    }
    if board.as_slice().iter().any(|c| *c == hole.first() || *c == hole.second()) {
        return Err(HandError::Overlap);
    }
    Ok(())
}
