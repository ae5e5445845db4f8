use crate::cards::Rank;

/// Groups ranks by their frequency in a hand, sorted by (count desc, rank desc).
///
/// Example: AAAKQ groups as [(Ace, 3), (King, 1), (Queen, 1)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankGroups {
    groups: Vec<(Rank, u8)>,
}

impl RankGroups {
    /// Create RankGroups from a rank count array indexed by rank value (2-14).
    pub fn from_counts(rank_counts: &[u8; 15]) -> Self {
        let mut groups: Vec<(Rank, u8)> = Rank::ALL
            .iter()
            .copied()
            .map(|rank| (rank, rank_counts[rank.value() as usize]))
            .filter(|(_, count)| *count > 0)
            .collect();
        groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
        Self { groups }
    }

    /// Rank of a four-of-a-kind, if present.
    pub fn quad(&self) -> Option<Rank> {
        self.groups.iter().find(|(_, count)| *count >= 4).map(|(rank, _)| *rank)
    }

    /// Highest rank seen at least three times.
    pub fn trips(&self) -> Option<Rank> {
        self.groups.iter().filter(|(_, count)| *count >= 3).map(|(rank, _)| *rank).max()
    }

    /// Exactly-paired ranks, in descending order.
    pub fn pairs(&self) -> Vec<Rank> {
        let mut pairs: Vec<Rank> =
            self.groups.iter().filter(|(_, count)| *count == 2).map(|(rank, _)| *rank).collect();
        pairs.sort_by(|a, b| b.cmp(a));
        pairs
    }

    /// Highest trips together with the highest different rank seen at least twice.
    /// Seven cards can hold two sets of trips; the lower one plays as the pair.
    pub fn full_house(&self) -> Option<(Rank, Rank)> {
        let three = self.trips()?;
        let two = self
            .groups
            .iter()
            .filter(|(rank, count)| *rank != three && *count >= 2)
            .map(|(rank, _)| *rank)
            .max()?;
        Some((three, two))
    }

    /// Up to `n` distinct ranks, highest first, skipping `excluded`.
    pub fn kickers_excluding(&self, excluded: &[Rank], n: usize) -> Vec<Rank> {
        let mut ranks: Vec<Rank> =
            self.groups.iter().map(|(rank, _)| *rank).filter(|r| !excluded.contains(r)).collect();
        ranks.sort_by(|a, b| b.cmp(a));
        ranks.truncate(n);
        ranks
    }

    #[cfg(test)]
    pub fn groups(&self) -> &[(Rank, u8)] {
        &self.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_counts(pairs: &[(u8, u8)]) -> [u8; 15] {
        let mut counts = [0u8; 15];
        for &(rank_val, count) in pairs {
            counts[rank_val as usize] = count;
        }
        counts
    }

    #[test]
    fn quad_with_trips_alongside() {
        let groups = RankGroups::from_counts(&make_counts(&[(14, 4), (13, 3)]));
        assert_eq!(groups.quad(), Some(Rank::Ace));
        assert_eq!(groups.kickers_excluding(&[Rank::Ace], 1), vec![Rank::King]);
    }

    #[test]
    fn double_trips_make_a_full_house() {
        let groups = RankGroups::from_counts(&make_counts(&[(9, 3), (4, 3), (2, 1)]));
        assert_eq!(groups.full_house(), Some((Rank::Nine, Rank::Four)));
    }

    #[test]
    fn full_house_prefers_highest_pair() {
        let groups = RankGroups::from_counts(&make_counts(&[(13, 3), (2, 2), (9, 2)]));
        assert_eq!(groups.full_house(), Some((Rank::King, Rank::Nine)));
    }

    #[test]
    fn trips_alone_is_not_a_full_house() {
        let groups = RankGroups::from_counts(&make_counts(&[(10, 3), (5, 1), (3, 1)]));
        assert_eq!(groups.trips(), Some(Rank::Ten));
        assert_eq!(groups.full_house(), None);
    }

    #[test]
    fn three_pairs_sorted_descending() {
        let groups = RankGroups::from_counts(&make_counts(&[(5, 2), (14, 2), (8, 2), (3, 1)]));
        assert_eq!(groups.pairs(), vec![Rank::Ace, Rank::Eight, Rank::Five]);
        assert_eq!(
            groups.kickers_excluding(&[Rank::Ace, Rank::Eight], 1),
            vec![Rank::Five]
        );
    }

    #[test]
    fn sorting_by_count_then_rank() {
        let groups = RankGroups::from_counts(&make_counts(&[(5, 1), (14, 1), (10, 2)]));
        let ranks: Vec<Rank> = groups.groups().iter().map(|(r, _)| *r).collect();
        assert_eq!(ranks, vec![Rank::Ten, Rank::Ace, Rank::Five]);
    }
}
