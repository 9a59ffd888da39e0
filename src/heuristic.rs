//! Static evaluation of positions where the search runs out of depth

use crate::{
    board::Board,
    evaluator::DIRECTIONS,
    score::{ScoreVector, HEURISTIC_LIMIT},
    MAX_PLAYERS,
};

// weight of an open window holding `count` pieces of one player
fn window_weight(count: i64) -> i64 {
    count * count * count
}

/// Sums each player's line potential over every window of `win_length` cells
///
/// A window counts for a player when it holds at least one of their pieces
/// and none of anybody else's, weighted by how many pieces it already holds.
pub fn potentials(board: &Board) -> [i64; MAX_PLAYERS] {
    let mut potentials = [0; MAX_PLAYERS];
    if !board.is_winnable() {
        return potentials;
    }
    let span = board.win_length() as isize - 1;
    let (width, height) = (board.width() as isize, board.height() as isize);

    for &(dx, dy) in DIRECTIONS.iter() {
        for row in 0..height {
            for column in 0..width {
                let (end_column, end_row) = (column + dx * span, row + dy * span);
                if end_column < 0 || end_column >= width || end_row < 0 || end_row >= height {
                    continue;
                }

                let mut owner = None;
                let mut count = 0;
                let mut blocked = false;
                for step in 0..=span {
                    let cell = board.get((column + dx * step) as usize, (row + dy * step) as usize);
                    match (cell, owner) {
                        (None, _) => {}
                        (Some(player), None) => {
                            owner = Some(player);
                            count += 1;
                        }
                        (Some(player), Some(current)) if player == current => count += 1,
                        (Some(_), Some(_)) => {
                            blocked = true;
                            break;
                        }
                    }
                }
                if let (Some(player), false) = (owner, blocked) {
                    potentials[player as usize] += window_weight(count);
                }
            }
        }
    }
    potentials
}

/// Scores a position for every player as their potential minus the strongest opponent's
///
/// Results are clamped to `±HEURISTIC_LIMIT` so they never rival a real win.
/// With two players the result is zero-sum.
pub fn evaluate(board: &Board) -> ScoreVector {
    let player_count = board.player_count();
    let potentials = potentials(board);

    let mut scores = [0; MAX_PLAYERS];
    for player in 0..player_count {
        let strongest_opponent = (0..player_count)
            .filter(|&other| other != player)
            .map(|other| potentials[other])
            .max()
            .unwrap_or(0);
        let limit = HEURISTIC_LIMIT as i64;
        scores[player] = (potentials[player] - strongest_opponent).max(-limit).min(limit) as i32;
    }
    ScoreVector::from_scores(&scores[..player_count])
}
