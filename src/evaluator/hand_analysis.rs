use super::rank_groups::RankGroups;
use super::straight_info::StraightInfo;
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};
use crate::evaluator::{Evaluation, HandDetail, HandValue};

/// Pre-computed analysis of a 5-7 card hand.
/// Built once and shared by the category detectors and the bot's strength estimate.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight_info: StraightInfo,
    /// Straight found inside the flush suit.
    pub straight_flush_top: Option<Rank>,
}

impl HandAnalysis {
    pub fn new(cards: &[Card]) -> Self {
        let mut rank_counts = [0u8; 15];
        for c in cards {
            rank_counts[c.value() as usize] += 1;
        }
        let rank_groups = RankGroups::from_counts(&rank_counts);
        let suit_info = SuitInfo::detect(cards);
        let straight_info = StraightInfo::detect(cards.iter().map(|c| c.rank()));
        let straight_flush_top = if suit_info.is_flush() {
            StraightInfo::detect(suit_info.flush_ranks.iter().copied()).top_rank
        } else {
            None
        };
        Self { rank_groups, suit_info, straight_info, straight_flush_top }
    }

    pub fn flush_draw(&self) -> bool {
        self.suit_info.flush_draw()
    }

    /// Exactly four consecutive distinct values.
    pub fn straight_draw(&self) -> bool {
        self.straight_info.longest_run() == 4
    }

    /// Build an Evaluation from a detail and its tiebreak ranks (highest first).
    pub fn build_evaluation(&self, detail: HandDetail, tiebreak: &[Rank]) -> Evaluation {
        let mut padded = [Rank::Two; 5];
        for (slot, r) in padded.iter_mut().zip(tiebreak) {
            *slot = *r;
        }
        let value = HandValue::from_parts(detail.category(), &padded);
        Evaluation { detail, value }
    }
}
