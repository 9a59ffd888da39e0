//! Win and draw detection for any board geometry, win length and player count

use crate::board::{Board, PlayerId};

/// The four line axes as (column step, row step): horizontal, vertical, diagonal `/`, diagonal `\`
///
/// This is also the order in which [`check_win_full`] tries each axis at a cell.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// How a finished game ended
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(PlayerId),
    Draw,
}

// number of consecutive `player` cells starting one step away from (column, row),
// stopping early once `limit` cells have been counted
fn run_length(
    board: &Board,
    column: usize,
    row: usize,
    (dx, dy): (isize, isize),
    player: PlayerId,
    limit: usize,
) -> usize {
    let mut x = column as isize + dx;
    let mut y = row as isize + dy;
    let mut run = 0;
    while run < limit
        && x >= 0
        && y >= 0
        && board.get(x as usize, y as usize) == Some(player)
    {
        run += 1;
        x += dx;
        y += dy;
    }
    run
}

/// Checks whether the piece at (`row`, `column`) is part of a winning line
///
/// Only the lines through that cell are examined, so this is the check to use
/// right after dropping a piece. Returns the owner of the piece if it wins.
pub fn check_win(board: &Board, row: usize, column: usize) -> Option<PlayerId> {
    if !board.is_winnable() {
        return None;
    }
    let player = board.get(column, row)?;
    let needed = board.win_length() - 1;

    for &(dx, dy) in DIRECTIONS.iter() {
        let forward = run_length(board, column, row, (dx, dy), player, needed);
        let backward = run_length(board, column, row, (-dx, -dy), player, needed - forward);
        if forward + backward >= needed {
            return Some(player);
        }
    }
    None
}

/// Scans the whole board for a winning line
///
/// Cells are visited bottom row first, left to right, trying each axis in
/// [`DIRECTIONS`] order; the owner of the first line found is returned. On
/// boards reached by legal play at most one player can have a line, so the
/// order only matters for boards assembled by other means.
pub fn check_win_full(board: &Board) -> Option<PlayerId> {
    if !board.is_winnable() {
        return None;
    }
    let needed = board.win_length() - 1;

    for row in 0..board.height() {
        for column in 0..board.width() {
            let player = match board.get(column, row) {
                Some(player) => player,
                None => continue,
            };
            for &direction in DIRECTIONS.iter() {
                if run_length(board, column, row, direction, player, needed) >= needed {
                    return Some(player);
                }
            }
        }
    }
    None
}

/// True iff the board is full and nobody has a line
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && check_win_full(board).is_none()
}

/// Classifies the position after a piece landed at (`row`, `column`)
///
/// Returns `None` while the game continues.
pub fn outcome_after_move(board: &Board, row: usize, column: usize) -> Option<Outcome> {
    if let Some(player) = check_win(board, row, column) {
        Some(Outcome::Winner(player))
    } else if board.is_full() {
        Some(Outcome::Draw)
    } else {
        None
    }
}
