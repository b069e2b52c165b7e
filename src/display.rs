use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use tablut_ai::{
    board::{is_throne_area, Board, THRONE},
    piece::Piece,
    square::Square,
    SIZE,
};

/// Draws `board` to stdout with coloured pieces, ranks down the left and files along the bottom
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for row in (0..SIZE).rev() {
        stdout.queue(PrintStyledContent(style(format!("{:2} ", row + 1))))?;
        for col in 0..SIZE {
            let square = Square::at(col, row);
            let piece = board.get(square);
            let background = if square == THRONE {
                Color::DarkRed
            } else if is_throne_area(square) || square.is_edge() {
                Color::DarkGrey
            } else {
                Color::DarkYellow
            };
            stdout.queue(PrintStyledContent(
                style(format!("{} ", piece.symbol()))
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(match piece {
                        Piece::Attacker => Color::Black,
                        Piece::Defender => Color::White,
                        Piece::King => Color::Yellow,
                        Piece::Empty => background,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let files: String = (0..SIZE).map(|col| format!("{} ", (b'a' + col as u8) as char)).collect();
    stdout.queue(PrintStyledContent(style(format!("   {}\n", files))))?;
    stdout.flush()?;
    Ok(())
}
