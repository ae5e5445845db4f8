use crate::cards::{Card, DealtCard};
use crate::evaluator::Category;
use crate::game::{Action, Stage};
use crate::hand::HoleCards;

/// Read-only view of one seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    pub name: String,
    pub is_human: bool,
    pub chips: u64,
    pub hole_cards: Vec<DealtCard>,
    pub bet: u64,
    pub folded: bool,
    pub all_in: bool,
    pub acted: bool,
    /// Set after showdown only.
    pub hand_rank: Option<Category>,
    pub hand_description: Option<String>,
}

impl PlayerView {
    /// Still in the hand and able to put chips in.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && self.chips > 0
    }

    pub fn hole(&self) -> Option<HoleCards> {
        let cards: Vec<Card> = self.hole_cards.iter().map(|d| d.card).collect();
        HoleCards::from_slice(&cards).ok()
    }
}

/// Owned copy of the table state returned by every engine call.
///
/// `pot` holds chips collected from finished streets; bets of the
/// current street sit in each player's `bet` until the street ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub players: Vec<PlayerView>,
    pub community: Vec<Card>,
    pub pot: u64,
    pub current_bet: u64,
    pub stage: Stage,
    pub current: Option<usize>,
    pub dealer: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    pub winners: Vec<usize>,
}

impl GameSnapshot {
    /// Collected pot plus the bets still in front of players.
    pub fn total_pot(&self) -> u64 {
        self.pot + self.players.iter().map(|p| p.bet).sum::<u64>()
    }

    pub fn to_call(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.bet))
    }

    /// Smallest bet or raise the seat can make, limited by its stack.
    pub fn min_raise_amount(&self, seat: usize) -> u64 {
        let Some(p) = self.players.get(seat) else {
            return 0;
        };
        let min = if self.current_bet == 0 {
            self.big_blind
        } else {
            (self.current_bet * 2).saturating_sub(p.bet)
        };
        min.min(p.chips)
    }

    /// Actions that would be accepted from `seat` right now.
    pub fn legal_actions(&self, seat: usize) -> Vec<Action> {
        if !self.stage.is_betting() || self.current != Some(seat) {
            return Vec::new();
        }
        if self.to_call(seat) == 0 {
            vec![Action::Fold, Action::Check, Action::Bet]
        } else {
            vec![Action::Fold, Action::Call, Action::Raise]
        }
    }

    pub fn round_over(&self) -> bool {
        !self.stage.is_betting()
    }

    /// Seats still in the hand (not folded).
    pub fn active_players(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }
}
