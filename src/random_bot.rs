//! A bot that plays uniformly at random, for weak opponents and comparison

use rand::{rngs::SmallRng, Rng, SeedableRng};

use crate::{
    board::Board,
    bot::Bot,
    error::{GameError, Result},
    movegen::legal_moves,
};

pub struct RandomBot {
    rng: SmallRng,
}

impl RandomBot {
    /// Creates a bot seeded from system entropy
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a bot whose choices are reproducible for a given seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Bot for RandomBot {
    fn choose_move(&mut self, board: &Board) -> Result<usize> {
        let moves: Vec<usize> = legal_moves(board).collect();
        if moves.is_empty() {
            return Err(GameError::NoLegalMove);
        }
        Ok(moves[self.rng.gen_range(0..moves.len())])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
