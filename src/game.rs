use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4::{Board, Player, Side, HEIGHT, WIDTH};

/// Alternates two players against one board until a winning push or board
/// exhaustion.
pub struct Game {
    board: Board,
    players: [Box<dyn Player>; 2],
}

impl Game {
    pub fn new(player_one: Box<dyn Player>, player_two: Box<dyn Player>) -> Self {
        Self {
            board: Board::new(),
            players: [player_one, player_two],
        }
    }

    /// Play one game through, returning the winner's name or `None` for a
    /// draw.
    pub fn play(&mut self) -> Result<Option<String>> {
        self.players[0].start_game(Side::One);
        self.players[1].start_game(Side::Two);

        let mut to_move = 0;
        while !self.board.legal_moves().is_empty() {
            display(&self.board)?;

            let side = if to_move == 0 { Side::One } else { Side::Two };
            let column = self.players[to_move].select_move(&self.board)?;
            println!("{} plays {}\n", self.players[to_move].name(), column + 1);

            if self.board.play(side, column)? {
                display(&self.board)?;
                return Ok(Some(self.players[to_move].name().to_string()));
            }
            to_move = 1 - to_move;
        }

        display(&self.board)?;
        Ok(None)
    }
}

/// Draw the board top row first, one coloured glyph per cell, with the
/// freshest token in bold and a 1-based column footer.
fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    for row in (0..HEIGHT).rev() {
        for column in 0..WIDTH {
            let fresh = board.last_move() == Some((column, row));
            let (glyph, color) = match board.cell(column, row) {
                Some(Side::One) => (if fresh { "X" } else { "x" }, Color::Red),
                Some(Side::Two) => (if fresh { "O" } else { "o" }, Color::Yellow),
                None => (".", Color::DarkBlue),
            };
            let mut content = style(glyph).with(color);
            if fresh {
                content = content.attribute(Attribute::Bold);
            }
            stdout
                .queue(PrintStyledContent(content))?
                .queue(PrintStyledContent(style(" ")))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }

    let footer: String = (1..=WIDTH).map(|column| format!("{} ", column)).collect();
    stdout.queue(PrintStyledContent(style(footer + "\n\n")))?;
    stdout.flush()?;
    Ok(())
}
