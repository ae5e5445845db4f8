use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::{Evaluation, HandDetail};

/// Each category detector recognises its hand and builds the evaluation,
/// or declines with `None`.
pub trait CategoryDetector {
    fn evaluate(&self, analysis: &HandAnalysis) -> Option<Evaluation>;
}

pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        (a.straight_flush_top == Some(Rank::Ace))
            .then(|| a.build_evaluation(HandDetail::RoyalFlush, &[Rank::Ace]))
    }
}

pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let high = a.straight_flush_top?;
        Some(a.build_evaluation(HandDetail::StraightFlush { high }, &[high]))
    }
}

pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let quad = a.rank_groups.quad()?;
        let kickers = a.rank_groups.kickers_excluding(&[quad], 1);
        let mut tiebreak = vec![quad];
        tiebreak.extend(kickers);
        Some(a.build_evaluation(HandDetail::FourOfAKind { quad }, &tiebreak))
    }
}

pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let (three, two) = a.rank_groups.full_house()?;
        Some(a.build_evaluation(HandDetail::FullHouse { three, two }, &[three, two]))
    }
}

pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let top = a.suit_info.flush_ranks.first().copied()?;
        let five: Vec<Rank> = a.suit_info.flush_ranks.iter().take(5).copied().collect();
        Some(a.build_evaluation(HandDetail::Flush { high: top }, &five))
    }
}

pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let high = a.straight_info.top_rank?;
        Some(a.build_evaluation(HandDetail::Straight { high }, &[high]))
    }
}

pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let trips = a.rank_groups.trips()?;
        let mut tiebreak = vec![trips];
        tiebreak.extend(a.rank_groups.kickers_excluding(&[trips], 2));
        Some(a.build_evaluation(HandDetail::ThreeOfAKind { trips }, &tiebreak))
    }
}

pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let pairs = a.rank_groups.pairs();
        let (high, low) = match pairs.as_slice() {
            [high, low, ..] => (*high, *low),
            _ => return None,
        };
        let mut tiebreak = vec![high, low];
        tiebreak.extend(a.rank_groups.kickers_excluding(&[high, low], 1));
        Some(a.build_evaluation(HandDetail::TwoPair { high, low }, &tiebreak))
    }
}

pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let pair = a.rank_groups.pairs().first().copied()?;
        let mut tiebreak = vec![pair];
        tiebreak.extend(a.rank_groups.kickers_excluding(&[pair], 3));
        Some(a.build_evaluation(HandDetail::Pair { pair }, &tiebreak))
    }
}

/// Always matches: the fallback at the bottom of the ladder.
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn evaluate(&self, a: &HandAnalysis) -> Option<Evaluation> {
        let top = a.rank_groups.kickers_excluding(&[], 5);
        let high = top.first().copied()?;
        Some(a.build_evaluation(HandDetail::HighCard { high }, &top))
    }
}

/// All detectors, strongest category first.
pub const DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];
