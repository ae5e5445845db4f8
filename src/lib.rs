//! holdem-engine: single-table Texas Hold'em
//!
//! Goals:
//! - Deterministic, fast 7-card evaluation
//! - A betting state machine that never panics on bad input; illegal actions
//!   come back as `Result` errors and leave the table untouched
//! - Heuristic bots that only ever take legal actions
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::evaluator::{evaluate_holdem, Category};
//! use holdem_engine::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board = Board::try_new(vec![
//!     Card::new(Rank::King, Suit::Clubs),
//!     Card::new(Rank::Queen, Suit::Diamonds),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Three, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//! ]).unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category(), Category::Pair);
//! ```
//!
//! ## Quick start: play a round with bots
//! ```
//! use holdem_engine::agents::{AgentTable, BotProfile};
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::game::Game;
//!
//! let cfg = TableConfig::default().with_human_seat(None).with_seed(42);
//! let mut game = Game::new(cfg).unwrap();
//! let mut table = AgentTable::with_bots(4, None, &BotProfile::default(), Some(42));
//!
//! game.start_new_round().unwrap();
//! table.run_until_blocked(&mut game, 1_000).unwrap();
//! assert!(game.snapshot().round_over());
//! assert_eq!(game.chips_in_play(), 4 * 1000);
//! ```
//!
//! ## CLI
//! ```sh
//! cargo run --bin holdem -- --players 6 --rounds 20 --seed 7
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod snapshot;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
