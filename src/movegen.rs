//! Legal move enumeration

use crate::board::Board;

/// Orders the columns from the middle outwards, as the middle columns are
/// often better moves
///
/// Columns equally far from the center are ordered left first.
pub fn move_order(width: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..width).collect();
    // doubled distance from the center keeps even widths in integers
    order.sort_by_key(|&column| ((2 * column as isize - (width as isize - 1)).abs(), column));
    order
}

/// The playable columns of a board in center-out order
///
/// Holds nothing but the board borrow and the column order, so a fresh pass
/// is just another call to [`legal_moves`].
#[derive(Clone, Debug)]
pub struct LegalMoves<'a> {
    board: &'a Board,
    order: std::vec::IntoIter<usize>,
}

impl<'a> Iterator for LegalMoves<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let board = self.board;
        self.order.find(|&column| board.playable(column))
    }
}

/// Enumerates the non-full columns of `board`, nearest the center first
pub fn legal_moves(board: &Board) -> LegalMoves<'_> {
    LegalMoves {
        board,
        order: move_order(board.width()).into_iter(),
    }
}
