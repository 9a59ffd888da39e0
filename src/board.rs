use std::fmt;

use crate::{
    config::BoardConfig,
    error::{GameError, Result},
    evaluator,
};

/// Identifies a player, `0..player_count`
pub type PlayerId = u8;

// cell value of an empty cell, occupied cells hold `player + 1`
const EMPTY: u8 = 0;

/// A board of arbitrary size under the gravity drop rule
///
/// Pieces are always played by the active player, who rotates through
/// `0..player_count` as moves are made and rotates back when they are undone.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<u8>, // cells are stored left-to-right, bottom-to-top
    heights: Vec<usize>,
    moves: Vec<usize>,
}

impl Board {
    /// Creates an empty board, failing if the configuration is invalid
    pub fn new(config: BoardConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cells: vec![EMPTY; config.cells()],
            heights: vec![0; config.width],
            moves: Vec::new(),
        })
    }

    /// Replays a sequence of zero-indexed columns from an empty board
    ///
    /// Fails on the first illegal move, or on any move played after the game was won.
    pub fn from_moves(config: BoardConfig, moves: &[usize]) -> Result<Self> {
        let mut board = Self::new(config)?;
        for &column in moves {
            if let Some((last_column, last_row)) = board.last_move() {
                if evaluator::check_win(&board, last_row, last_column).is_some() {
                    return Err(GameError::GameOver);
                }
            }
            board.drop(column)?;
        }
        Ok(board)
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn win_length(&self) -> usize {
        self.config.win_length
    }

    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// Whether a line of the configured length can fit on this board at all
    pub fn is_winnable(&self) -> bool {
        self.config.is_winnable()
    }

    /// The owner of the cell at `(column, row)`, row 0 being the bottom
    ///
    /// Out of range coordinates are treated as empty.
    pub fn get(&self, column: usize, row: usize) -> Option<PlayerId> {
        if column >= self.width() || row >= self.height() {
            return None;
        }
        match self.cells[column + self.width() * row] {
            EMPTY => None,
            cell => Some(cell - 1),
        }
    }

    /// The raw cell encoding, `0` for empty and `player + 1` otherwise
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The number of pieces in a column
    pub fn height_of(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn playable(&self, column: usize) -> bool {
        column < self.width() && self.heights[column] < self.height()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() == self.config.cells()
    }

    pub fn num_moves(&self) -> usize {
        self.moves.len()
    }

    /// The number of cells still empty
    pub fn remaining_cells(&self) -> usize {
        self.config.cells() - self.moves.len()
    }

    /// Every column played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// The player whose piece the next `drop` places
    pub fn active_player(&self) -> PlayerId {
        (self.moves.len() % self.player_count()) as PlayerId
    }

    /// The column and landing row of the most recent move
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.moves
            .last()
            .map(|&column| (column, self.heights[column] - 1))
    }

    /// Drops the active player's piece into `column`, returning the row it lands on
    pub fn drop(&mut self, column: usize) -> Result<usize> {
        if column >= self.width() {
            return Err(GameError::ColumnOutOfRange {
                column,
                width: self.width(),
            });
        }
        if !self.playable(column) {
            return Err(GameError::ColumnFull(column));
        }
        Ok(self.play(column))
    }

    /// Drops a piece into a column already known to be playable
    pub(crate) fn play(&mut self, column: usize) -> usize {
        let row = self.heights[column];
        let index = column + self.width() * row;
        self.cells[index] = self.active_player() + 1;
        self.heights[column] += 1;
        self.moves.push(column);
        row
    }

    /// Takes back the most recent move, which must have been played in `column`
    pub fn undo(&mut self, column: usize) -> Result<()> {
        if column >= self.width() {
            return Err(GameError::ColumnOutOfRange {
                column,
                width: self.width(),
            });
        }
        if self.heights[column] == 0 {
            return Err(GameError::EmptyColumn(column));
        }
        if self.moves.last() != Some(&column) {
            return Err(GameError::NotLastMove(column));
        }
        self.unplay();
        Ok(())
    }

    /// Takes back the most recent move, doing nothing on an empty board
    pub(crate) fn unplay(&mut self) {
        if let Some(column) = self.moves.pop() {
            self.heights[column] -= 1;
            let index = column + self.width() * self.heights[column];
            self.cells[index] = EMPTY;
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height()).rev() {
            let line: String = (0..self.width())
                .map(|column| match self.get(column, row) {
                    Some(player) => (b'0' + player) as char,
                    None => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
