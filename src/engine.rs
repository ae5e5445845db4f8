// Engine API boundary. Presentation layers, bots and the CLI drive a round
// through this trait without depending on `Game` internals. Every call runs
// to completion and hands back an owned snapshot.

use crate::game::{Action, ActionError, Game, RoundError};
use crate::snapshot::GameSnapshot;

pub trait GameEngine {
    // Round lifecycle
    fn start_new_round(&mut self) -> Result<GameSnapshot, RoundError>;

    // Actions for the seat to act
    fn try_action(&mut self, action: Action, amount: u64) -> Result<GameSnapshot, ActionError>;
    fn player_action(&mut self, action: Action, amount: u64) -> GameSnapshot;

    // Queries
    fn determine_winners(&self) -> Vec<usize>;
    fn snapshot(&self) -> GameSnapshot;
}

impl GameEngine for Game {
    fn start_new_round(&mut self) -> Result<GameSnapshot, RoundError> {
        Game::start_new_round(self)
    }

    fn try_action(&mut self, action: Action, amount: u64) -> Result<GameSnapshot, ActionError> {
        Game::try_action(self, action, amount)
    }
    fn player_action(&mut self, action: Action, amount: u64) -> GameSnapshot {
        Game::player_action(self, action, amount)
    }

    fn determine_winners(&self) -> Vec<usize> {
        Game::determine_winners(self)
    }
    fn snapshot(&self) -> GameSnapshot {
        Game::snapshot(self)
    }
}
