use anyhow::Result;
use clap::Parser;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use std::time::Instant;

use connectn_ai::{Arena, BoardConfig, BotSpec};

/// Plays bots against each other and reports how often each one wins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board width
    #[arg(long, default_value_t = 7)]
    width: usize,

    /// Board height
    #[arg(long, default_value_t = 6)]
    height: usize,

    /// Tiles in a row needed to win
    #[arg(long, default_value_t = 4)]
    win_length: usize,

    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Seed for random bots
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Keep every bot in its starting seat instead of rotating after each game
    #[arg(long, default_value_t = false)]
    fixed_seats: bool,

    /// One bot per player, in seat order: `random`, `minimax:<depth>` or `minimax:<depth>:<node budget>`
    #[arg(value_parser = parse_bot, num_args = 2.., default_values = ["minimax:4", "random"])]
    bots: Vec<BotSpec>,
}

fn parse_bot(spec: &str) -> Result<BotSpec, String> {
    let mut parts = spec.split(':');
    let number = |part: Option<&str>| -> Result<Option<u64>, String> {
        part.map(|value| {
            value
                .parse::<u64>()
                .map_err(|_| format!("could not parse '{}' as a number", value))
        })
        .transpose()
    };
    match parts.next() {
        Some("random") => Ok(BotSpec::Random { seed: None }),
        Some("minimax") => {
            let depth = number(parts.next())?.unwrap_or(4) as usize;
            let node_budget = number(parts.next())?;
            Ok(BotSpec::Minimax { depth, node_budget })
        }
        _ => Err(format!("unknown bot '{}'", spec)),
    }
}

fn describe(bot: &BotSpec) -> String {
    match bot {
        BotSpec::Random { .. } => "random".to_string(),
        BotSpec::Minimax {
            depth,
            node_budget: None,
        } => format!("minimax (depth {})", depth),
        BotSpec::Minimax {
            depth,
            node_budget: Some(budget),
        } => format!("minimax (depth {}, {} nodes)", depth, budget),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let board = BoardConfig::new(args.width, args.height, args.win_length, args.bots.len())?;
    let mut arena = Arena::new(board, args.bots.clone(), args.games);
    arena.seed = args.seed;
    arena.rotate_seats = !args.fixed_seats;

    println!(
        "Playing {} games on a {}x{} board, {} in a row to win",
        args.games, board.width, board.height, board.win_length
    );

    let start = Instant::now();
    let progress = ProgressBar::new(args.games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let tally = arena.run(|| progress.inc(1))?;
    progress.finish();

    println!("Arena completed in {}", HumanDuration(start.elapsed()));
    for (bot, wins) in args.bots.iter().zip(tally.wins.iter()) {
        println!(
            "{:>32}: {} wins ({:.1}%)",
            describe(bot),
            wins,
            100.0 * *wins as f64 / tally.games.max(1) as f64
        );
    }
    println!(
        "{:>32}: {} ({:.1}%)",
        "draws",
        tally.draws,
        100.0 * tally.draws as f64 / tally.games.max(1) as f64
    );
    Ok(())
}
