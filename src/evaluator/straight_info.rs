use crate::cards::Rank;

/// Presence mask over card values, bit `v` set when value `v` appears.
/// The Ace also sets bit 1 so the wheel (A-2-3-4-5) is an ordinary run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    mask: u16,
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    pub fn detect<I: IntoIterator<Item = Rank>>(ranks: I) -> Self {
        let mut mask = 0u16;
        for rank in ranks {
            mask |= 1 << rank.value();
            if rank == Rank::Ace {
                mask |= 1 << 1;
            }
        }
        let top_rank = (5..=14u8)
            .rev()
            .find(|high| (high - 4..=*high).all(|v| mask & (1 << v) != 0))
            .and_then(Rank::from_value);
        Self { mask, top_rank }
    }

    pub fn is_straight(&self) -> bool {
        self.top_rank.is_some()
    }

    /// Longest run of consecutive distinct values, Ace counted high only.
    pub fn longest_run(&self) -> u8 {
        let mut best = 0;
        let mut run = 0;
        for v in 2..=14u8 {
            if self.mask & (1 << v) != 0 {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }
}
