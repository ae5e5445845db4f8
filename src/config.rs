use crate::agents::Difficulty;
use crate::deck::DECK_SIZE;

/// Cards a round can consume besides hole cards: three burns and five board cards.
const BOARD_AND_BURNS: usize = 8;

/// Largest table one deck can serve.
pub const MAX_PLAYERS: usize = (DECK_SIZE - BOARD_AND_BURNS) / 2;

/// How tied showdown categories are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum ShowdownRule {
    /// Every player holding the best category shares the pot.
    #[default]
    CategoryOnly,
    /// Compare the full hand value, kickers included.
    FullRank,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),
    #[error("too many players for one deck: {0}")]
    TooManyPlayers(usize),
    #[error("blinds must be positive")]
    ZeroBlind,
    #[error("big blind {big} is below small blind {small}")]
    BigBlindBelowSmall { small: u64, big: u64 },
    #[error("human seat {seat} is outside a {players}-player table")]
    HumanSeatOutOfRange { seat: usize, players: usize },
}

/// Table setup.
///
/// ```
/// use holdem_engine::config::TableConfig;
///
/// let cfg = TableConfig::default().with_players(6).with_blinds(10, 20).with_seed(7);
/// assert!(cfg.validate().is_ok());
/// assert!(TableConfig::default().with_players(1).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub players: usize,
    pub starting_chips: u64,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Seat whose hole cards are dealt face up. `None` for bot-only tables.
    pub human_seat: Option<usize>,
    /// Fixed RNG seed for reproducible shuffles.
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub showdown: ShowdownRule,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            players: 4,
            starting_chips: 1000,
            small_blind: 5,
            big_blind: 10,
            human_seat: Some(0),
            seed: None,
            difficulty: Difficulty::Medium,
            showdown: ShowdownRule::CategoryOnly,
        }
    }
}

impl TableConfig {
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn with_starting_chips(mut self, chips: u64) -> Self {
        self.starting_chips = chips;
        self
    }

    pub fn with_blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn with_human_seat(mut self, seat: Option<usize>) -> Self {
        self.human_seat = seat;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_showdown(mut self, rule: ShowdownRule) -> Self {
        self.showdown = rule;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::TooFewPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(self.players));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind < self.small_blind {
            return Err(ConfigError::BigBlindBelowSmall {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if let Some(seat) = self.human_seat {
            if seat >= self.players {
                return Err(ConfigError::HumanSeatOutOfRange { seat, players: self.players });
            }
        }
        Ok(())
    }

    pub(crate) fn player_name(&self, seat: usize) -> String {
        if self.human_seat == Some(seat) {
            "You".to_string()
        } else {
            format!("Player {}", seat + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = TableConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.big_blind, 2 * cfg.small_blind);
    }

    #[test]
    fn rejects_bad_tables() {
        let base = TableConfig::default();
        assert_eq!(base.clone().with_players(0).validate(), Err(ConfigError::TooFewPlayers(0)));
        assert_eq!(
            base.clone().with_players(MAX_PLAYERS + 1).validate(),
            Err(ConfigError::TooManyPlayers(MAX_PLAYERS + 1))
        );
        assert_eq!(base.clone().with_blinds(0, 10).validate(), Err(ConfigError::ZeroBlind));
        assert_eq!(
            base.clone().with_blinds(10, 5).validate(),
            Err(ConfigError::BigBlindBelowSmall { small: 10, big: 5 })
        );
        assert_eq!(
            base.with_players(3).with_human_seat(Some(3)).validate(),
            Err(ConfigError::HumanSeatOutOfRange { seat: 3, players: 3 })
        );
    }

    #[test]
    fn max_players_fits_one_deck() {
        assert_eq!(MAX_PLAYERS, 22);
        assert!(TableConfig::default().with_players(MAX_PLAYERS).validate().is_ok());
    }

    #[test]
    fn names_mark_the_human() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.player_name(0), "You");
        assert_eq!(cfg.player_name(2), "Player 3");
    }
}
