//! The interface a front end drives a game through

use crate::{
    board::{Board, PlayerId},
    bot::Bot,
    config::GameConfig,
    error::{GameError, Result},
    evaluator::{outcome_after_move, Outcome},
};

/// Where a game stands after a move
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GameState {
    Playing { next_player: PlayerId },
    Won(PlayerId),
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Playing { .. })
    }
}

/// A single game: the live board, its state, and the bots assigned to players
///
/// The game owns the board exclusively. Bots only ever see it by shared
/// reference, and the column a bot proposes is applied by the caller through
/// [`Game::apply_move`].
pub struct Game {
    config: GameConfig,
    board: Board,
    bots: Vec<Option<Box<dyn Bot>>>,
    state: GameState,
}

impl Game {
    /// Starts a game, building a fresh bot for every player that has one assigned
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.board)?;
        let bots = (0..config.board.player_count)
            .map(|player| {
                config
                    .bots
                    .get(player)
                    .copied()
                    .flatten()
                    .map(|spec| spec.build())
            })
            .collect();
        Ok(Self {
            config,
            board,
            bots,
            state: GameState::Playing { next_player: 0 },
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn active_player(&self) -> PlayerId {
        self.board.active_player()
    }

    /// Whether `player` is controlled by a bot
    pub fn is_bot(&self, player: PlayerId) -> bool {
        matches!(self.bots.get(player as usize), Some(Some(_)))
    }

    /// The name of the bot controlling `player`, if any
    pub fn bot_name(&self, player: PlayerId) -> Option<&str> {
        self.bots
            .get(player as usize)
            .and_then(|bot| bot.as_ref())
            .map(|bot| bot.name())
    }

    /// Hands control of `player` to a bot, or to a human with `None`
    pub fn set_bot(&mut self, player: PlayerId, bot: Option<Box<dyn Bot>>) -> Result<()> {
        let player_count = self.bots.len();
        let slot = self.bots.get_mut(player as usize).ok_or_else(|| {
            GameError::InvalidConfiguration(format!(
                "no player {} in a {} player game",
                player, player_count
            ))
        })?;
        *slot = bot;
        Ok(())
    }

    /// Drops the active player's piece into `column` and reports the resulting state
    pub fn apply_move(&mut self, column: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(GameError::GameOver);
        }
        let row = self.board.drop(column)?;
        self.state = match outcome_after_move(&self.board, row, column) {
            Some(Outcome::Winner(player)) => GameState::Won(player),
            Some(Outcome::Draw) => GameState::Draw,
            None => GameState::Playing {
                next_player: self.board.active_player(),
            },
        };
        Ok(self.state)
    }

    /// Asks the active player's bot for a move
    ///
    /// Returns `None` when the active player is human. The move is not applied.
    pub fn request_bot_move(&mut self) -> Result<Option<usize>> {
        if self.state.is_over() {
            return Err(GameError::NoLegalMove);
        }
        let player = self.board.active_player() as usize;
        match self.bots.get_mut(player).and_then(|bot| bot.as_mut()) {
            Some(bot) => bot.choose_move(&self.board).map(Some),
            None => Ok(None),
        }
    }

    /// Clears the board and every bot's per-game state, keeping the configuration
    pub fn reset(&mut self) -> Result<()> {
        self.board = Board::new(self.config.board)?;
        self.state = GameState::Playing { next_player: 0 };
        for bot in self.bots.iter_mut().flatten() {
            bot.reset();
        }
        Ok(())
    }
}
