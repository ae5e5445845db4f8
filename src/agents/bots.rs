use crate::config::TableConfig;
use crate::engine::GameEngine;
use crate::game::{Action, ActionError};
use crate::snapshot::GameSnapshot;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::strength::hand_strength;
use super::{AgentKind, PlayerAgent};

/// Difficulty tiers. Harder bots call and bluff more and fold less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown difficulty: '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Base thresholds and randomness for one bot.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
    pub bluff: f64,
    /// Chance of ignoring the ladder and picking a random legal action.
    pub random_action_rate: f64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Tuned thresholds for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (fold, call, raise, bluff) = match difficulty {
            Difficulty::Easy => (0.2, 0.4, 0.7, 0.1),
            Difficulty::Medium => (0.18, 0.45, 0.72, 0.2),
            Difficulty::Hard => (0.15, 0.5, 0.75, 0.3),
        };
        Self { difficulty, fold, call, raise, bluff, random_action_rate: 0.1, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Turn off bluffing and random actions so decisions follow the ladder only.
    pub fn deterministic(mut self) -> Self {
        self.bluff = 0.0;
        self.random_action_rate = 0.0;
        self
    }

    pub fn with_thresholds(mut self, fold: f64, call: f64, raise: f64) -> Self {
        self.fold = fold;
        self.call = call;
        self.raise = raise;
        self
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds { fold: self.fold, call: self.call, raise: self.raise, bluff: self.bluff }
    }
}

/// Bots for a table play at the table's configured difficulty.
impl From<&TableConfig> for BotProfile {
    fn from(cfg: &TableConfig) -> Self {
        Self::for_difficulty(cfg.difficulty)
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

/// Decision thresholds after situational adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
    pub bluff: f64,
}

impl Thresholds {
    /// Loosen for late position (`position` in `[0, 1]`) and for a good
    /// price (`pot_odds` in `[0, 1]`).
    pub fn adjusted(self, position: f64, pot_odds: f64) -> Self {
        Self {
            fold: (self.fold - 0.1 * position - 0.2 * pot_odds).max(0.1),
            call: (self.call - 0.1 * position - 0.3 * pot_odds).max(0.2),
            raise: (self.raise - 0.05 * position).max(0.4),
            bluff: self.bluff + 0.1 * position,
        }
    }
}

/// Bet sizing strategies, each a share of the collected pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BetSizing {
    /// Half the pot.
    Small,
    /// Three quarters of the pot.
    Normal,
    /// The pot scaled up by hand strength.
    Large,
    /// Between half and one and a half pots.
    Random,
}

/// What a bot wants to do; `amount` is only meaningful for bets and raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotDecision {
    pub action: Action,
    pub amount: u64,
}

impl BotDecision {
    fn passive(action: Action) -> Self {
        Self { action, amount: 0 }
    }
}

/// Share of the other seats that have already finished acting this street.
pub fn position_advantage(snap: &GameSnapshot, seat: usize) -> f64 {
    let n = snap.players.len();
    if n <= 1 {
        return 0.0;
    }
    let still_to_act = snap
        .players
        .iter()
        .enumerate()
        .filter(|(i, p)| *i != seat && p.can_act() && (!p.acted || p.bet < snap.current_bet))
        .count();
    1.0 - still_to_act as f64 / (n - 1) as f64
}

/// Price of a call relative to the collected pot.
pub fn pot_odds(snap: &GameSnapshot, seat: usize) -> f64 {
    let to_call = snap.to_call(seat);
    if to_call == 0 {
        return 0.0;
    }
    to_call as f64 / (snap.pot + to_call) as f64
}

/// Choose an action for `seat`. Every returned action is legal for the
/// snapshot; the engine clamps amounts to the seat's stack.
pub fn decide<R: Rng + ?Sized>(
    snap: &GameSnapshot,
    seat: usize,
    profile: &BotProfile,
    rng: &mut R,
) -> BotDecision {
    let can_check = snap.to_call(seat) == 0;
    let Some(hole) = snap.players.get(seat).and_then(|p| p.hole()) else {
        return BotDecision::passive(if can_check { Action::Check } else { Action::Fold });
    };

    let strength = hand_strength(&hole, &snap.community);
    let t = profile.thresholds().adjusted(position_advantage(snap, seat), pot_odds(snap, seat));
    let aggressive = if can_check { Action::Bet } else { Action::Raise };

    if rng.random::<f64>() < profile.random_action_rate {
        let choices = if can_check {
            [Action::Fold, Action::Check, Action::Bet]
        } else {
            [Action::Fold, Action::Call, Action::Raise]
        };
        let action = choices[rng.random_range(0..choices.len())];
        let amount = match action {
            Action::Bet | Action::Raise => bet_size(snap, seat, strength, BetSizing::Random, rng),
            _ => 0,
        };
        debug!(seat, %action, amount, "random action");
        return BotDecision { action, amount };
    }

    let bluffing = rng.random::<f64>() < t.bluff;
    let effective = if bluffing { 1.0 - strength } else { strength };

    let decision = if effective < t.fold {
        BotDecision::passive(if can_check { Action::Check } else { Action::Fold })
    } else if effective < t.call {
        BotDecision::passive(if can_check { Action::Check } else { Action::Call })
    } else if effective < t.raise {
        let amount = bet_size(snap, seat, effective, BetSizing::Normal, rng);
        BotDecision { action: aggressive, amount }
    } else {
        let amount = bet_size(snap, seat, effective, BetSizing::Large, rng);
        BotDecision { action: aggressive, amount }
    };
    debug!(
        seat,
        strength,
        effective,
        bluffing,
        action = %decision.action,
        amount = decision.amount,
        "bot decision"
    );
    decision
}

/// Chips to bet or raise for `seat`: at least the minimum raise, rounded
/// to whole big blinds and capped at the stack.
pub fn bet_size<R: Rng + ?Sized>(
    snap: &GameSnapshot,
    seat: usize,
    strength: f64,
    sizing: BetSizing,
    rng: &mut R,
) -> u64 {
    let chips = snap.players.get(seat).map_or(0, |p| p.chips);
    let pot = snap.pot as f64;
    let min = if snap.current_bet > 0 { snap.current_bet * 2 } else { snap.big_blind } as f64;
    let raw = match sizing {
        BetSizing::Small => pot * 0.5,
        BetSizing::Normal => pot * 0.75,
        BetSizing::Large => pot * (1.0 + strength),
        BetSizing::Random => pot * (0.5 + rng.random::<f64>()),
    };
    let bb = snap.big_blind.max(1) as f64;
    let rounded = (raw.max(min) / bb).round() * bb;
    (rounded as u64).max(1).min(chips)
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng }
    }
}

/// Seat controller that plays with [`decide`].
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError> {
        let snap = engine.snapshot();
        if snap.round_over() || snap.current != Some(seat) {
            return Ok(false);
        }
        let decision = decide(&snap, seat, &self.profile, &mut self.state.rng);
        engine.try_action(decision.action, decision.amount).map(|_| true)
    }
}
