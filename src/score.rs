//! Per-player position scores

use static_assertions::const_assert;

use crate::{board::PlayerId, MAX_DIMENSION, MAX_PLAYERS};

/// The base score of a won position; wins found with more remaining depth score higher
pub const WIN_SCORE: i32 = 1_000_000;

/// The static heuristic never reports a score beyond this magnitude
pub const HEURISTIC_LIMIT: i32 = WIN_SCORE / 2;

// the depth bonus of a win stays below the base score
const_assert!(MAX_DIMENSION * MAX_DIMENSION < WIN_SCORE as usize);
const_assert!(HEURISTIC_LIMIT < WIN_SCORE);
const_assert!(MAX_PLAYERS <= PlayerId::MAX as usize);

/// One score per player, each player wanting its own entry as high as possible
///
/// With two players the vector is always zero-sum, which is what lets the
/// two-player search prune with a single alpha-beta window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScoreVector {
    scores: [i32; MAX_PLAYERS],
    len: u8,
}

impl ScoreVector {
    /// Every player scores zero, as in a draw
    pub fn neutral(player_count: usize) -> Self {
        Self {
            scores: [0; MAX_PLAYERS],
            len: player_count as u8,
        }
    }

    /// A win for `winner` found with `depth` plies of search remaining
    pub fn win(winner: PlayerId, player_count: usize, depth: usize) -> Self {
        let value = WIN_SCORE + depth as i32;
        let mut vector = Self::neutral(player_count);
        for (player, score) in vector.scores[..player_count].iter_mut().enumerate() {
            *score = if player == winner as usize { value } else { -value };
        }
        vector
    }

    /// A two-player vector giving `player` the score `value` and the opponent its negation
    pub fn zero_sum(player: PlayerId, value: i32) -> Self {
        let mut vector = Self::neutral(2);
        vector.scores[player as usize] = value;
        vector.scores[1 - player as usize] = -value;
        vector
    }

    /// Builds a vector from explicit per-player scores
    pub fn from_scores(scores: &[i32]) -> Self {
        let mut vector = Self::neutral(scores.len());
        vector.scores[..scores.len()].copy_from_slice(scores);
        vector
    }

    pub fn get(&self, player: PlayerId) -> i32 {
        self.scores[player as usize]
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.scores[..self.len as usize]
    }

    /// Whether this score records a won game for `player`
    pub fn is_win_for(&self, player: PlayerId) -> bool {
        self.get(player) >= WIN_SCORE
    }

    /// Whether this score records a lost game for `player`
    pub fn is_loss_for(&self, player: PlayerId) -> bool {
        self.get(player) <= -WIN_SCORE
    }
}
