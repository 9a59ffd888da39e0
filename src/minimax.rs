//! A depth-limited game tree search for any number of players
//!
//! # Two players
//! The search is a negamax formulation of minimax with alpha-beta pruning:
//! every node is scored from the point of view of the player to move, the
//! window is flipped for the opponent, and a branch is cut off once
//! `alpha >= beta`. Cached entries remember whether they hold an exact score
//! or only a bound from a cut-off search.
//!
//! # More than two players
//! A single signed score cannot describe a game where every opponent plays
//! for themselves, so nodes are scored with a [`ScoreVector`] holding one
//! entry per player, and each player picks the move that maximises their own
//! entry (the maxn rule). Alpha-beta bounds do not carry over: the only cut-off
//! is when the player to move finds an immediate win, which no sibling can
//! beat. Expect far less pruning than in the two-player case, and the more
//! players there are, the less pruning there is.
//!
//! # Position Scoring
//! A position won by a move made with `d` plies of search remaining scores
//! `WIN_SCORE + d` for the winner and the negation for everyone else, so
//! quicker wins and slower losses are preferred. Draws score zero, and
//! positions where the depth runs out get the static heuristic.

use crate::{
    board::Board,
    bot::Bot,
    config::BoardConfig,
    error::{GameError, Result},
    evaluator::check_win,
    heuristic,
    movegen::move_order,
    score::{ScoreVector, WIN_SCORE},
    transposition_table::{Bound, Entry, Key, TranspositionTable},
};

// below every reachable score, and safe to negate
const NEG_INFINITY: i32 = -2 * WIN_SCORE;

/// Counters describing the most recent search
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, including cache hits
    pub nodes: u64,
    /// Nodes answered from the transposition table
    pub cache_hits: u64,
    /// Look-ahead depth of the last fully completed iteration
    pub depth_reached: usize,
}

// marks a search abandoned because the node budget ran out
struct Aborted;

type SearchResult<T> = std::result::Result<T, Aborted>;

/// A bot choosing moves by depth-limited minimax search
///
/// `max_depth` counts the plies searched after each candidate move, so a
/// depth of 0 scores every legal move by itself with the static heuristic.
///
/// The bot keeps a transposition table for as long as it lives, which should
/// be a single game; [`Bot::reset`] clears it, and so does moving on a board
/// with a different configuration.
#[derive(Clone, Debug)]
pub struct MinimaxBot {
    max_depth: usize,
    node_budget: Option<u64>,
    transposition_table: TranspositionTable,
    config: Option<BoardConfig>,
    order: Vec<usize>,
    stats: SearchStats,
}

impl MinimaxBot {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            node_budget: None,
            transposition_table: TranspositionTable::new(),
            config: None,
            order: Vec::new(),
            stats: SearchStats::default(),
        }
    }

    /// Bounds the nodes visited per move request
    ///
    /// With a budget the search deepens one ply at a time and answers with the
    /// deepest iteration that finished. If not even the shallowest one does,
    /// the most central legal column is played.
    pub fn with_node_budget(mut self, node_budget: u64) -> Self {
        self.node_budget = Some(node_budget);
        self
    }

    /// Replaces the transposition table, e.g. to change its size limit
    pub fn with_transposition_table(mut self, transposition_table: TranspositionTable) -> Self {
        self.transposition_table = transposition_table;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Diagnostics for the most recent call
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.transposition_table
    }

    /// Chooses a move looking `max_depth` plies past each candidate
    pub fn choose_move_with_depth(&mut self, board: &Board, max_depth: usize) -> Result<usize> {
        self.search(board, max_depth).map(|(column, _)| column)
    }

    /// Scores the position for every player, searching `max_depth` plies past each move
    ///
    /// The result is the score of the move the bot would choose.
    pub fn evaluate(&mut self, board: &Board, max_depth: usize) -> Result<ScoreVector> {
        self.search(board, max_depth).map(|(_, scores)| scores)
    }

    fn prepare(&mut self, board: &Board) {
        if self.config.as_ref() != Some(board.config()) {
            self.transposition_table.clear();
            self.order = move_order(board.width());
            self.config = Some(*board.config());
        }
        self.stats = SearchStats::default();
    }

    fn search(&mut self, board: &Board, max_depth: usize) -> Result<(usize, ScoreVector)> {
        self.prepare(board);
        let first = self
            .order
            .iter()
            .copied()
            .find(|&column| board.playable(column))
            .ok_or(GameError::NoLegalMove)?;

        // exploratory moves are only ever made on this copy
        let mut work = board.clone();

        match self.node_budget {
            None => match self.root(&mut work, max_depth) {
                Ok(result) => {
                    self.stats.depth_reached = max_depth;
                    Ok(result)
                }
                // unreachable without a budget
                Err(Aborted) => Ok((first, heuristic::evaluate(board))),
            },
            Some(_) => {
                let mut best = None;
                for depth in 0..=max_depth {
                    match self.root(&mut work, depth) {
                        Ok(result) => {
                            best = Some(result);
                            self.stats.depth_reached = depth;
                        }
                        Err(Aborted) => break,
                    }
                    // deeper iterations cannot see past the end of the game
                    if depth + 1 >= work.remaining_cells() {
                        break;
                    }
                }
                Ok(best.unwrap_or_else(|| (first, heuristic::evaluate(board))))
            }
        }
    }

    fn count_node(&mut self) -> SearchResult<()> {
        self.stats.nodes += 1;
        match self.node_budget {
            Some(budget) if self.stats.nodes > budget => Err(Aborted),
            _ => Ok(()),
        }
    }

    /// Scores every legal move of the root, keeping the first of equally good moves
    fn root(&mut self, work: &mut Board, max_depth: usize) -> SearchResult<(usize, ScoreVector)> {
        self.count_node()?;
        let player = work.active_player();
        let depth = max_depth.saturating_add(1).min(work.remaining_cells());
        let two_player = work.player_count() == 2;

        let mut alpha = NEG_INFINITY;
        let mut best: Option<(usize, ScoreVector)> = None;

        for column in self.ordered_moves(work, None) {
            let scores = if two_player {
                let score = self.play_negamax(work, column, depth, alpha, -NEG_INFINITY)?;
                ScoreVector::zero_sum(player, score)
            } else {
                self.play_maxn(work, column, depth)?
            };

            if best.map_or(true, |(_, best)| scores.get(player) > best.get(player)) {
                best = Some((column, scores));
                alpha = alpha.max(scores.get(player));
            }
        }
        // the caller checked there is a legal move
        best.ok_or(Aborted)
    }

    // legal columns in center-out order, with the cached best move first
    fn ordered_moves(&self, work: &Board, hint: Option<usize>) -> Vec<usize> {
        let mut moves = Vec::with_capacity(self.order.len());
        if let Some(column) = hint.filter(|&column| work.playable(column)) {
            moves.push(column);
        }
        moves.extend(
            self.order
                .iter()
                .copied()
                .filter(|&column| work.playable(column) && Some(column) != hint),
        );
        moves
    }

    /// Plays `column` on the working copy, scores it for the player making the move, and takes it back
    fn play_negamax(
        &mut self,
        work: &mut Board,
        column: usize,
        depth: usize,
        alpha: i32,
        beta: i32,
    ) -> SearchResult<i32> {
        // only playable columns are searched
        let row = work.play(column);
        let score = if check_win(work, row, column).is_some() {
            Ok(WIN_SCORE + depth as i32)
        } else if work.is_full() {
            Ok(0)
        } else {
            // the search window is flipped for the other player
            self.negamax(work, depth - 1, -beta, -alpha).map(|score| -score)
        };
        work.unplay();
        score
    }

    /// Two-player search, returning the score for the player to move
    fn negamax(&mut self, work: &mut Board, depth: usize, mut alpha: i32, mut beta: i32) -> SearchResult<i32> {
        self.count_node()?;
        let player = work.active_player();
        let depth = depth.min(work.remaining_cells());
        if depth == 0 {
            return Ok(heuristic::evaluate(work).get(player));
        }

        // try to fetch the score or a bound on it from the transposition table
        let (key, mirrored) = Key::symmetric(work, depth);
        let mut hint = None;
        if let Some(entry) = self.transposition_table.get(&key).copied() {
            let value = entry.scores.get(player);
            match entry.bound {
                Bound::Exact => {
                    self.stats.cache_hits += 1;
                    return Ok(value);
                }
                Bound::Lower => alpha = alpha.max(value),
                Bound::Upper => beta = beta.min(value),
            }
            if alpha >= beta {
                // prune the exploration
                self.stats.cache_hits += 1;
                return Ok(value);
            }
            hint = entry.best_move.map(|column| unmirror(column, work.width(), mirrored));
        }

        let original_alpha = alpha;
        let mut best = NEG_INFINITY;
        let mut best_move = None;
        for column in self.ordered_moves(work, hint) {
            let score = self.play_negamax(work, column, depth, alpha, beta)?;
            if score > best {
                best = score;
                best_move = Some(column);
            }
            alpha = alpha.max(score);
            // a perfect opponent will not let the game reach this branch
            if alpha >= beta {
                break;
            }
        }

        let bound = if best <= original_alpha {
            Bound::Upper
        } else if best >= beta {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.transposition_table.set(
            key,
            Entry {
                scores: ScoreVector::zero_sum(player, best),
                bound,
                best_move: best_move.map(|column| unmirror(column, work.width(), mirrored)),
            },
        );
        Ok(best)
    }

    /// Plays `column` on the working copy, scores it for every player, and takes it back
    fn play_maxn(&mut self, work: &mut Board, column: usize, depth: usize) -> SearchResult<ScoreVector> {
        let player_count = work.player_count();
        // only playable columns are searched
        let row = work.play(column);
        let scores = if let Some(winner) = check_win(work, row, column) {
            Ok(ScoreVector::win(winner, player_count, depth))
        } else if work.is_full() {
            Ok(ScoreVector::neutral(player_count))
        } else {
            self.maxn(work, depth - 1)
        };
        work.unplay();
        scores
    }

    /// Search for three or more players, returning every player's score
    fn maxn(&mut self, work: &mut Board, depth: usize) -> SearchResult<ScoreVector> {
        self.count_node()?;
        let player = work.active_player();
        let depth = depth.min(work.remaining_cells());
        if depth == 0 {
            return Ok(heuristic::evaluate(work));
        }

        // move order decides between equal choices, so mirror images are not merged here
        let key = Key::new(work, depth);
        if let Some(entry) = self.transposition_table.get(&key).copied() {
            self.stats.cache_hits += 1;
            return Ok(entry.scores);
        }

        // nothing below this node can beat winning on the spot
        let ceiling = WIN_SCORE + depth as i32;
        let mut best: Option<(usize, ScoreVector)> = None;
        for column in self.ordered_moves(work, None) {
            let scores = self.play_maxn(work, column, depth)?;
            if best.map_or(true, |(_, best)| scores.get(player) > best.get(player)) {
                best = Some((column, scores));
            }
            if scores.get(player) >= ceiling {
                break;
            }
        }

        // a node is only searched while the board has an empty cell
        let (best_move, scores) = best.ok_or(Aborted)?;
        self.transposition_table.set(
            key,
            Entry {
                scores,
                bound: Bound::Exact,
                best_move: Some(best_move),
            },
        );
        Ok(scores)
    }
}

// maps a column between a board and its mirror image when `mirrored` is set
fn unmirror(column: usize, width: usize, mirrored: bool) -> usize {
    if mirrored {
        width - 1 - column
    } else {
        column
    }
}

impl Bot for MinimaxBot {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        self.choose_move_with_depth(board, self.max_depth)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn reset(&mut self) {
        self.transposition_table.clear();
        self.config = None;
        self.stats = SearchStats::default();
    }
}
