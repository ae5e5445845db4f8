//! Agents: pluggable seat controllers.
//!
//! `PlayerAgent` acts for one seat through the [`GameEngine`] boundary and
//! `AgentTable` maps seats to agents, so front ends only forward human input
//! and let the table drive everyone else.

use crate::config::TableConfig;
use crate::engine::GameEngine;
use crate::game::{Action, ActionError};
use core::fmt;
use std::str::FromStr;
use tracing::debug;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// An action a front end wants a seat to take on its next turn.
///
/// ```
/// use holdem_engine::agents::Intent;
/// use holdem_engine::game::Action;
///
/// let intent: Intent = "raise 40".parse().unwrap();
/// assert_eq!(intent, Intent::new(Action::Raise, 40));
/// assert_eq!("x".parse::<Intent>().unwrap().action, Action::Check);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub action: Action,
    pub amount: u64,
}

impl Intent {
    pub fn new(action: Action, amount: u64) -> Self {
        Self { action, amount }
    }
}

impl FromStr for Intent {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let action: Action = parts.next().unwrap_or_default().parse()?;
        let amount = match parts.next() {
            Some(n) => n.parse::<u64>().map_err(|_| ActionError::InvalidAmount)?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(ActionError::Unknown(s.to_string()));
        }
        Ok(Self { action, amount })
    }
}

/// A seat controller that can act for a player when it is their turn.
pub trait PlayerAgent {
    /// Called when `seat` may be the current actor. Returns whether an
    /// action was taken.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally queue an intent; default is to ignore and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
}

mod bots;
mod strength;

pub use bots::{
    bet_size, decide, pot_odds, position_advantage, BetSizing, BotAgent, BotDecision, BotProfile,
    Difficulty, ParseDifficultyError, Thresholds,
};
pub use strength::{hand_strength, preflop_strength};

/// Executes queued intents when it is the seat's turn.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: Option<Intent>,
}

impl HumanAgent {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending(&self) -> Option<Intent> {
        self.pending
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }

    /// A rejected intent is dropped so the front end can ask again.
    fn on_turn(&mut self, engine: &mut dyn GameEngine, seat: usize) -> Result<bool, ActionError> {
        let snap = engine.snapshot();
        if snap.round_over() {
            self.pending = None;
            return Ok(false);
        }
        if snap.current != Some(seat) {
            return Ok(false);
        }
        match self.pending.take() {
            Some(intent) => engine.try_action(intent.action, intent.amount).map(|_| true),
            None => Ok(false),
        }
    }
}

/// Manages a set of optional agents, one per seat, and drives the agent at the
/// current seat when appropriate.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// A bot in every seat except `human`, which gets a [`HumanAgent`].
    /// Bot seeds are derived from `seed` so a whole table replays exactly.
    pub fn with_bots(
        n: usize,
        human: Option<usize>,
        profile: &BotProfile,
        seed: Option<u64>,
    ) -> Self {
        let mut table = Self::for_seats(n);
        for seat in 0..n {
            let agent: Box<dyn PlayerAgent> = if human == Some(seat) {
                Box::new(HumanAgent::new())
            } else {
                let mut p = profile.clone();
                if let Some(s) = seed {
                    p = p.with_seed(s.wrapping_add(seat as u64));
                }
                Box::new(BotAgent::new(p))
            };
            table.set_agent(seat, Some(agent));
        }
        table
    }

    /// Seats, human seat, bot difficulty and seed all taken from `cfg`.
    pub fn for_config(cfg: &TableConfig) -> Self {
        Self::with_bots(cfg.players, cfg.human_seat, &BotProfile::from(cfg), cfg.seed)
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.seats.resize_with(seat + 1, || None);
        }
        self.seats[seat] = agent;
    }

    /// Return the kind of agent at a seat, if any.
    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.seats.get(seat).and_then(|a| a.as_deref().map(|ag| ag.kind()))
    }

    /// Send an intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, intent: Intent) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(intent);
        }
        false
    }

    /// Whether a seat currently has an agent assigned.
    pub fn has_agent(&self, seat: usize) -> bool {
        self.seats.get(seat).is_some_and(|a| a.is_some())
    }

    /// Whether any non-human (bot) agents are assigned.
    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| matches!(ag.kind(), AgentKind::Bot))
    }

    /// Drive the agent assigned to the current seat, if any.
    pub fn on_turn(&mut self, engine: &mut dyn GameEngine) -> Result<bool, ActionError> {
        let Some(seat) = engine.snapshot().current else {
            return Ok(false);
        };
        match self.seats.get_mut(seat) {
            Some(Some(agent)) => agent.on_turn(engine, seat),
            _ => Ok(false),
        }
    }

    /// Keep driving agents until the round ends, the current seat has
    /// nothing to do, or `max_steps` actions were taken. Returns the number
    /// of actions taken.
    pub fn run_until_blocked(
        &mut self,
        engine: &mut dyn GameEngine,
        max_steps: usize,
    ) -> Result<usize, ActionError> {
        let mut steps = 0;
        while steps < max_steps {
            if engine.snapshot().round_over() || !self.on_turn(engine)? {
                break;
            }
            steps += 1;
        }
        debug!(steps, "agents blocked");
        Ok(steps)
    }

    /// Remove all agents.
    pub fn clear(&mut self) {
        for a in &mut self.seats {
            *a = None;
        }
    }
}
