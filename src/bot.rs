use crate::{board::Board, error::Result};

/// Anything that can pick a move for the active player
pub trait Bot: Send {
    /// Picks a column for the active player of `board`
    ///
    /// The board is only inspected; any exploration happens on private copies.
    /// Fails with [`GameError::NoLegalMove`](crate::GameError::NoLegalMove) when
    /// every column is full.
    fn choose_move(&mut self, board: &Board) -> Result<usize>;

    /// A short display name
    fn name(&self) -> &str;

    /// Forgets any state accumulated during the current game
    fn reset(&mut self) {}
}
