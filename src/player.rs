use std::io::{stdin, stdout, BufRead, Write};

use crate::board::{Board, Side};
use crate::error::GameError;
use crate::lookahead::LookaheadPlayer;
use crate::mcts::MctsPlayer;

/// The contract shared by every move strategy.
///
/// A driver calls [`Player::start_game`] once before the first move request
/// of a game, then [`Player::select_move`] once per turn with the current
/// position. Implementations must return a currently-legal column or fail.
pub trait Player {
    /// Short identifying string used in game output.
    fn name(&self) -> &str;

    /// Reset per-game state and record which side this player owns.
    fn start_game(&mut self, side: Side);

    /// Choose a column to play in the given position.
    fn select_move(&mut self, board: &Board) -> Result<usize, GameError>;
}

/// A player driven by line-based text input: 1-based column numbers, one
/// per line. Invalid or unparsable input is retried until the stream runs
/// out.
pub struct HumanPlayer<R> {
    name: String,
    input: R,
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn new<S: Into<String>>(name: S, input: R) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

impl<R: BufRead> Player for HumanPlayer<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_game(&mut self, _side: Side) {}

    fn select_move(&mut self, board: &Board) -> Result<usize, GameError> {
        loop {
            print!("Player [{}]: ", self.name);
            stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::NoMoveProvided);
            }

            match line.trim().parse::<usize>() {
                Ok(column_one_indexed) if column_one_indexed >= 1 => {
                    let column = column_one_indexed - 1;
                    if board.is_legal_move(column) {
                        return Ok(column);
                    }
                }
                _ => {}
            }
            println!("Invalid move, try again.\n");
        }
    }
}

/// Build a player from a short spec string: a kind letter with an optional
/// `:name` suffix.
///
/// - `h`: human on stdin
/// - `b`: bounded-depth lookahead (depth 5, sharpness 0.9999, discount 0.999)
/// - `m`: Monte Carlo tree search (10 000 rollouts, exploration sqrt(2))
pub fn from_spec(spec: &str) -> Result<Box<dyn Player>, GameError> {
    let mut characters = spec.chars();
    let Some(kind) = characters.next() else {
        return Err(GameError::UnknownPlayerSpec(spec.to_string()));
    };
    let name = match characters.as_str() {
        "" => None,
        rest => match rest.strip_prefix(':') {
            Some(name) if !name.is_empty() => Some(name),
            _ => return Err(GameError::UnknownPlayerSpec(spec.to_string())),
        },
    };

    match kind {
        'h' => Ok(Box::new(HumanPlayer::new(
            name.unwrap_or("Human"),
            stdin().lock(),
        ))),
        'b' => Ok(Box::new(LookaheadPlayer::new(
            name.unwrap_or("Lookahead"),
            5,
            0.9999,
            0.999,
        )?)),
        'm' => Ok(Box::new(MctsPlayer::new(
            name.unwrap_or("Monte Carlo"),
            10_000,
            std::f64::consts::SQRT_2,
        )?)),
        _ => Err(GameError::UnknownPlayerSpec(spec.to_string())),
    }
}
