use anyhow::Result;
use crossterm::style::{style, PrintStyledContent};
use crossterm::QueueableCommand;

use std::io::{stdin, stdout, Stdin, Write};
use std::str::FromStr;

use connectn_ai::{BoardConfig, BotSpec, Game, GameConfig, GameState, PlayerId};

mod display;
use display::*;

/// Asks until the answer parses, an empty answer taking the default
fn prompt<T: FromStr + ToString>(stdin: &Stdin, question: &str, default: T) -> Result<T> {
    loop {
        print!("{} [{}]: ", question, default.to_string());
        stdout().flush()?;

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<T>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Unknown answer given"),
        }
    }
}

fn prompt_board(stdin: &Stdin) -> Result<BoardConfig> {
    let default = BoardConfig::default();
    loop {
        let width = prompt(stdin, "Board width", default.width)?;
        let height = prompt(stdin, "Board height", default.height)?;
        let win_length = prompt(stdin, "Tiles in a row to win", default.win_length)?;
        let player_count = prompt(stdin, "Number of players", default.player_count)?;

        match BoardConfig::new(width, height, win_length, player_count) {
            Ok(config) => {
                if !config.is_winnable() {
                    println!("Note: {} in a row cannot fit on this board, every game will be a draw", win_length);
                }
                return Ok(config);
            }
            Err(err) => println!("{}", err),
        }
    }
}

fn prompt_bot(stdin: &Stdin, player: usize) -> Result<Option<BotSpec>> {
    loop {
        let mut buffer = String::new();
        print!("Player {}: (h)uman, (r)andom bot or (m)inimax bot? ", player + 1);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().trim().chars().next() {
            Some('h') => return Ok(None),
            Some('r') => return Ok(Some(BotSpec::Random { seed: None })),
            Some('m') => {
                let depth = prompt(stdin, "Search depth", 6)?;
                return Ok(Some(BotSpec::Minimax {
                    depth,
                    node_budget: None,
                }));
            }
            _ => println!("Unknown answer given"),
        }
    }
}

fn announce(player: PlayerId, message: &str) -> Result<()> {
    let mut stdout = stdout();
    stdout
        .queue(PrintStyledContent(
            style(format!("Player {}", player + 1)).with(player_color(player)),
        ))?
        .queue(PrintStyledContent(style(format!(" {}\n", message))))?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect N\n");

    let board = prompt_board(&stdin)?;
    let mut config = GameConfig::new(board);
    for player in 0..board.player_count {
        if let Some(bot) = prompt_bot(&stdin, player)? {
            config = config.with_bot(player, bot);
        }
    }
    let all_bots = config.bots.iter().filter(|bot| bot.is_some()).count() == board.player_count;

    let mut game = Game::new(config)?;

    // game loop
    loop {
        display(game.board())?;

        match game.state() {
            GameState::Playing { next_player } => {
                let next_move = match game.bot_name(next_player).map(str::to_owned) {
                    // AI player
                    Some(name) => {
                        announce(next_player, &format!("({}) is thinking...", name))?;

                        // slow down play if every player is AI
                        if all_bots {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let column = game
                            .request_bot_move()?
                            .ok_or_else(|| anyhow::anyhow!("player {} has no bot", next_player + 1))?;
                        println!("Bot move: {}", column + 1);
                        column + 1
                    }

                    // human player
                    None => {
                        announce(next_player, "to move")?;
                        print!("Move input > ");
                        stdout().flush()?;
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Ok(column) if column >= 1 => column,
                            _ => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                        }
                    }
                };

                if let Err(err) = game.apply_move(next_move - 1) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            GameState::Won(player) => {
                announce(player, "wins!")?;
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
