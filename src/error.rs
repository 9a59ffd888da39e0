//! Error types shared by the board, the bots and the game interface

use thiserror::Error;

/// Everything that can go wrong when configuring or playing a game
///
/// None of these are fatal: the caller can always retry with a different
/// configuration or move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid move, column {0} is full")]
    ColumnFull(usize),

    #[error("invalid move, column {column} out of range (board has {width} columns)")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("no legal move available, the game is already over")]
    NoLegalMove,

    #[error("cannot undo, column {0} is empty")]
    EmptyColumn(usize),

    #[error("cannot undo column {0}, it was not the last move played")]
    NotLastMove(usize),

    #[error("the game is over")]
    GameOver,
}

pub type Result<T> = std::result::Result<T, GameError>;
