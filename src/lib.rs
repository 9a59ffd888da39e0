//! An engine and bots for Connect 4 generalized to any board size, win
//! length and number of players
//!
//! Bots search on private copies of the board they are given, so asking for
//! a move never changes the live game.
//!
//! # Basic Usage
//!
//! ```
//! use connectn_ai::{BoardConfig, BotSpec, Game, GameConfig, GameState};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let config = GameConfig::new(BoardConfig::new(7, 6, 4, 2)?)
//!     .with_bot(1, BotSpec::Minimax { depth: 4, node_budget: None });
//! let mut game = Game::new(config)?;
//!
//! // player 0 is human and plays the center column
//! assert_eq!(game.apply_move(3)?, GameState::Playing { next_player: 1 });
//!
//! // player 1 is a bot; its move is applied by the caller
//! let reply = game.request_bot_move()?.expect("player 1 is a bot");
//! assert_eq!(game.apply_move(reply)?, GameState::Playing { next_player: 0 });
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod arena;

pub mod board;

pub mod bot;

pub mod config;

pub mod error;

pub mod evaluator;

pub mod game;

pub mod heuristic;

pub mod minimax;

pub mod movegen;

pub mod random_bot;

pub mod score;

pub mod transposition_table;

mod test;

pub use arena::{Arena, Tally};
pub use board::{Board, PlayerId};
pub use bot::Bot;
pub use config::{BoardConfig, BotSpec, GameConfig};
pub use error::{GameError, Result};
pub use evaluator::{check_win, check_win_full, is_draw, Outcome};
pub use game::{Game, GameState};
pub use minimax::{MinimaxBot, SearchStats};
pub use movegen::legal_moves;
pub use random_bot::RandomBot;
pub use score::ScoreVector;

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 7;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 6;

/// The default number of tiles in a row needed to win
pub const DEFAULT_WIN_LENGTH: usize = 4;

/// The most players a game can have, an engine limit set by the size of [`ScoreVector`]
pub const MAX_PLAYERS: usize = 8;

/// The largest width or height a board can have
pub const MAX_DIMENSION: usize = 64;

// the defaults must pass validation
const_assert!(DEFAULT_WIDTH <= MAX_DIMENSION && DEFAULT_HEIGHT <= MAX_DIMENSION);
const_assert!(DEFAULT_WIN_LENGTH <= DEFAULT_WIDTH);

// games are played on worker threads by the arena
assert_impl_all!(Board: Send, Sync, Clone);
assert_impl_all!(Game: Send);
assert_impl_all!(MinimaxBot: Send, Clone);
assert_impl_all!(RandomBot: Send);
