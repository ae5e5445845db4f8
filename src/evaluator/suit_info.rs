use crate::cards::{Card, Rank, Suit};

/// Per-suit grouping of a 5-7 card hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuitInfo {
    pub counts: [u8; 4],
    pub flush_suit: Option<Suit>,
    /// Ranks of the flush suit, highest first. Empty without a flush.
    pub flush_ranks: Vec<Rank>,
}

impl SuitInfo {
    pub fn detect(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        for c in cards {
            counts[c.suit().index()] += 1;
        }
        let flush_suit = Suit::ALL.iter().copied().find(|s| counts[s.index()] >= 5);
        let mut flush_ranks: Vec<Rank> = match flush_suit {
            Some(suit) => cards.iter().filter(|c| c.suit() == suit).map(|c| c.rank()).collect(),
            None => Vec::new(),
        };
        flush_ranks.sort_by(|a, b| b.cmp(a));
        Self { counts, flush_suit, flush_ranks }
    }

    pub fn is_flush(&self) -> bool {
        self.flush_suit.is_some()
    }

    /// A suit holding exactly four cards.
    pub fn flush_draw(&self) -> bool {
        self.counts.iter().any(|&n| n == 4)
    }
}
