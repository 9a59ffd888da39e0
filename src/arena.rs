//! Bot-versus-bot matches, played in parallel to compare bots

use rayon::prelude::*;

use crate::{
    config::{BoardConfig, BotSpec, GameConfig},
    error::{GameError, Result},
    game::{Game, GameState},
};

/// Win and draw counts over a series of games
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Wins per competitor, in the order the competitors were given
    pub wins: Vec<u64>,
    pub draws: u64,
    pub games: u64,
}

impl Tally {
    fn new(competitors: usize) -> Self {
        Self {
            wins: vec![0; competitors],
            draws: 0,
            games: 0,
        }
    }

    fn record(&mut self, winner: Option<usize>) {
        self.games += 1;
        match winner {
            Some(competitor) => self.wins[competitor] += 1,
            None => self.draws += 1,
        }
    }
}

/// A series of games between one bot per player
#[derive(Clone, Debug)]
pub struct Arena {
    pub board: BoardConfig,
    /// One bot per seat; competitor `i` starts in seat `i`
    pub competitors: Vec<BotSpec>,
    pub games: usize,
    /// Shifts every competitor one seat along after each game, so each gets to move first
    pub rotate_seats: bool,
    /// Seeds random bots that were not given a seed of their own
    pub seed: u64,
}

impl Arena {
    pub fn new(board: BoardConfig, competitors: Vec<BotSpec>, games: usize) -> Self {
        Self {
            board,
            competitors,
            games,
            rotate_seats: true,
            seed: 0,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.board.validate()?;
        if self.competitors.len() != self.board.player_count {
            return Err(GameError::InvalidConfiguration(format!(
                "{} competitors given for a {} player game",
                self.competitors.len(),
                self.board.player_count
            )));
        }
        Ok(())
    }

    // competitor sitting in `seat` during game `game`
    fn competitor(&self, game: usize, seat: usize) -> usize {
        if self.rotate_seats {
            (seat + game) % self.competitors.len()
        } else {
            seat
        }
    }

    /// The configuration of game number `game`, with fresh seeds for unseeded random bots
    pub fn game_config(&self, game: usize) -> GameConfig {
        let seats = self.competitors.len();
        (0..seats).fold(GameConfig::new(self.board), |config, seat| {
            let spec = match self.competitors[self.competitor(game, seat)] {
                BotSpec::Random { seed: None } => BotSpec::Random {
                    seed: Some(
                        self.seed
                            .wrapping_mul(6_364_136_223_846_793_005)
                            .wrapping_add((game * seats + seat) as u64),
                    ),
                },
                spec => spec,
            };
            config.with_bot(seat, spec)
        })
    }

    /// Plays one game to the end, returning the winning competitor
    pub fn play_game(&self, game: usize) -> Result<Option<usize>> {
        let mut match_game = Game::new(self.game_config(game))?;
        loop {
            match match_game.state() {
                GameState::Playing { .. } => {
                    let column = match_game.request_bot_move()?.ok_or_else(|| {
                        GameError::InvalidConfiguration("every seat needs a bot".to_string())
                    })?;
                    match_game.apply_move(column)?;
                }
                GameState::Won(seat) => return Ok(Some(self.competitor(game, seat as usize))),
                GameState::Draw => return Ok(None),
            }
        }
    }

    /// Plays every game on the rayon thread pool
    ///
    /// `on_game_finished` is called once per completed game, from whichever
    /// thread played it.
    pub fn run<F>(&self, on_game_finished: F) -> Result<Tally>
    where
        F: Fn() + Sync,
    {
        self.validate()?;
        let winners = (0..self.games)
            .into_par_iter()
            .map(|game| {
                let winner = self.play_game(game);
                on_game_finished();
                winner
            })
            .collect::<Result<Vec<_>>>()?;

        let mut tally = Tally::new(self.competitors.len());
        for winner in winners {
            tally.record(winner);
        }
        Ok(tally)
    }
}
