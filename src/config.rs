//! Game configuration and its validation

use crate::{
    bot::Bot,
    error::{GameError, Result},
    minimax::MinimaxBot,
    random_bot::RandomBot,
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DEFAULT_WIN_LENGTH, MAX_DIMENSION, MAX_PLAYERS,
};

/// The geometry and rules of a board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BoardConfig {
    /// The number of columns
    pub width: usize,
    /// The number of rows
    pub height: usize,
    /// The number of consecutive pieces needed to win
    pub win_length: usize,
    /// The number of players taking turns
    pub player_count: usize,
}

impl BoardConfig {
    /// Creates a validated configuration
    pub fn new(width: usize, height: usize, win_length: usize, player_count: usize) -> Result<Self> {
        let config = Self {
            width,
            height,
            win_length,
            player_count,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.width > MAX_DIMENSION {
            return Err(GameError::InvalidConfiguration(format!(
                "width must be between 1 and {}, got {}",
                MAX_DIMENSION, self.width
            )));
        }
        if self.height < 1 || self.height > MAX_DIMENSION {
            return Err(GameError::InvalidConfiguration(format!(
                "height must be between 1 and {}, got {}",
                MAX_DIMENSION, self.height
            )));
        }
        if self.win_length < 2 {
            return Err(GameError::InvalidConfiguration(format!(
                "win length must be at least 2, got {}",
                self.win_length
            )));
        }
        if self.player_count < 2 {
            return Err(GameError::InvalidConfiguration(format!(
                "player count must be at least 2, got {}",
                self.player_count
            )));
        }
        if self.player_count > MAX_PLAYERS {
            return Err(GameError::InvalidConfiguration(format!(
                "this engine supports at most {} players, got {}",
                MAX_PLAYERS, self.player_count
            )));
        }
        Ok(())
    }

    /// The total number of cells on the board
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Whether a line of `win_length` fits on the board at all
    pub fn is_winnable(&self) -> bool {
        self.win_length <= self.width.max(self.height)
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_length: DEFAULT_WIN_LENGTH,
            player_count: 2,
        }
    }
}

/// Describes which bot, if any, controls a player
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BotSpec {
    /// Picks uniformly among legal moves; seeded from entropy when `seed` is `None`
    Random { seed: Option<u64> },
    /// Depth-limited minimax search, optionally bounded by a node budget per move
    Minimax {
        depth: usize,
        node_budget: Option<u64>,
    },
}

impl BotSpec {
    /// Builds a fresh bot instance with its own private state
    pub fn build(&self) -> Box<dyn Bot> {
        match *self {
            BotSpec::Random { seed: Some(seed) } => Box::new(RandomBot::with_seed(seed)),
            BotSpec::Random { seed: None } => Box::new(RandomBot::new()),
            BotSpec::Minimax { depth, node_budget } => {
                let mut bot = MinimaxBot::new(depth);
                if let Some(budget) = node_budget {
                    bot = bot.with_node_budget(budget);
                }
                Box::new(bot)
            }
        }
    }
}

/// Everything needed to start a game
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    pub board: BoardConfig,
    /// Bot assignment indexed by player id; missing or `None` entries are human players
    pub bots: Vec<Option<BotSpec>>,
}

impl GameConfig {
    pub fn new(board: BoardConfig) -> Self {
        Self {
            board,
            bots: Vec::new(),
        }
    }

    /// Assigns a bot to a player
    pub fn with_bot(mut self, player: usize, bot: BotSpec) -> Self {
        if self.bots.len() <= player {
            self.bots.resize(player + 1, None);
        }
        self.bots[player] = Some(bot);
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        if let Some(player) = self
            .bots
            .iter()
            .enumerate()
            .skip(self.board.player_count)
            .find_map(|(player, bot)| bot.map(|_| player))
        {
            return Err(GameError::InvalidConfiguration(format!(
                "bot assigned to player {}, but there are only {} players",
                player, self.board.player_count
            )));
        }
        Ok(())
    }
}
