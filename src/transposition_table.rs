use std::collections::HashMap;

use crate::{
    board::{Board, PlayerId},
    score::ScoreVector,
};

/// How a cached score relates to the true score of its position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// The true score is at least the cached one (the search failed high)
    Lower,
    /// The true score is at most the cached one (the search failed low)
    Upper,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub scores: ScoreVector,
    pub bound: Bound,
    pub best_move: Option<usize>,
}

/// Identifies a search node: exact board contents, player to move and remaining depth
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    cells: Box<[u8]>,
    active_player: PlayerId,
    depth: u16,
}

impl Key {
    /// Encodes a node exactly as it stands
    pub fn new(board: &Board, depth: usize) -> Self {
        Self {
            cells: board.cells().into(),
            active_player: board.active_player(),
            depth: depth as u16,
        }
    }

    /// Encodes a node so that a board and its left-right mirror image share a key
    ///
    /// Returns whether the mirrored encoding was chosen, in which case columns
    /// stored under this key are mirrored too.
    pub fn symmetric(board: &Board, depth: usize) -> (Self, bool) {
        let key = Self::new(board, depth);
        let width = board.width();
        let mirrored: Box<[u8]> = key
            .cells
            .chunks(width)
            .flat_map(|row| row.iter().rev().copied())
            .collect();
        if mirrored < key.cells {
            (
                Self {
                    cells: mirrored,
                    ..key
                },
                true,
            )
        } else {
            (key, false)
        }
    }
}

/// The number of entries a table holds before it starts over
pub const DEFAULT_MAX_ENTRIES: usize = 1 << 20;

/// A memo of searched nodes, private to one bot for the length of one game
///
/// Keys are exact, so two different nodes never share an entry. Once the
/// table reaches its size limit it is emptied and refilled, which only costs
/// repeated work.
#[derive(Clone, Debug)]
pub struct TranspositionTable {
    entries: HashMap<Key, Entry>,
    max_entries: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn set(&mut self, key: Key, entry: Entry) {
        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.entries.clear();
        }
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: &Key) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}
