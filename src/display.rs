use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectn_ai::{Board, PlayerId};

const PLAYER_COLORS: [Color; 8] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::DarkRed,
    Color::DarkGreen,
];

pub fn player_color(player: PlayerId) -> Color {
    PLAYER_COLORS[player as usize % PLAYER_COLORS.len()]
}

// screen position of a tile, counting rows up from the line above `origin`;
// boards taller than the terminal lose their top rows
fn tile_position((origin_x, origin_y): (u16, u16), column: usize, row: usize) -> (u16, u16) {
    (
        origin_x.saturating_add(column as u16),
        origin_y.saturating_sub(1 + row as u16),
    )
}

/// Draws the board below the cursor, one coloured tile per cell
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    // column numbers, wrapping past 9 so every label is one character wide
    let cols: String = (1..=board.width()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;
    for _ in 0..board.height() {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..board.height() {
        for column in 0..board.width() {
            let (pos_x, pos_y) = tile_position((origin_x, origin_y), column, row);
            let color = match board.get(column, row) {
                Some(player) => player_color(player),
                None => Color::DarkBlue,
            };

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(color),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
