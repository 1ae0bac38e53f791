use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Side};
use crate::error::{ensure_in_open_range, GameError};
use crate::player::Player;
use crate::WIDTH;

/// A bounded-depth recursive evaluator with a stochastic move choice.
///
/// Every legal column is scored, then the actual move is drawn from a
/// weighted distribution over those scores rather than taken greedily, so
/// the player favours strong columns without becoming fully predictable.
#[derive(Debug)]
pub struct LookaheadPlayer {
    name: String,
    max_depth: u32,
    sharpness: f64,
    discount: f64,
    side: Side,
    rng: StdRng,
}

impl LookaheadPlayer {
    /// Validated bounds: `0 < max_depth < 10` (the branching factor is the
    /// board width, so the search is exponential in depth), and
    /// `0 < sharpness < 1`, `0 < discount < 1`.
    pub fn new<S: Into<String>>(
        name: S,
        max_depth: u32,
        sharpness: f64,
        discount: f64,
    ) -> Result<Self, GameError> {
        ensure_in_open_range("max_depth", 0.0, max_depth as f64, 10.0)?;
        ensure_in_open_range("sharpness", 0.0, sharpness, 1.0)?;
        ensure_in_open_range("discount", 0.0, discount, 1.0)?;
        Ok(Self {
            name: name.into(),
            max_depth,
            sharpness,
            discount,
            side: Side::One,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Replace the internal RNG with a seeded one for reproducible play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Score every column for `side` with `depth` plies of lookahead left.
    ///
    /// An immediately winning column scores `sharpness`; with no depth
    /// budget left a quiet column is neutral (0.5); otherwise the column is
    /// scored against the opponent's best reply one ply deeper:
    /// `1 - worst_case * discount`. Illegal columns score 0.
    pub fn policy(
        &self,
        board: &Board,
        side: Side,
        depth: u32,
    ) -> Result<[f64; WIDTH], GameError> {
        let mut weights = [0.0; WIDTH];
        for column in board.legal_moves() {
            let mut hypothetical = board.clone();
            if hypothetical.play(side, column)? {
                weights[column] = self.sharpness;
            } else if depth == 0 {
                weights[column] = 0.5;
            } else {
                let replies = self.policy(&hypothetical, side.flip(), depth - 1)?;
                let worst_case = replies.iter().cloned().fold(0.0, f64::max);
                weights[column] = 1.0 - worst_case * self.discount;
            }
        }
        Ok(weights)
    }
}

impl Player for LookaheadPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_game(&mut self, side: Side) {
        self.side = side;
    }

    fn select_move(&mut self, board: &Board) -> Result<usize, GameError> {
        if board.legal_moves().is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        let weights = self.policy(board, self.side, self.max_depth)?;
        // every legal column has positive weight, so this only fails when
        // there are none
        let distribution =
            WeightedIndex::new(&weights).map_err(|_| GameError::NoLegalMoves)?;
        Ok(distribution.sample(&mut self.rng))
    }
}
