use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::board::{Board, Side};
use crate::error::GameError;
use crate::player::Player;

// forces every unvisited child to be explored once before any exploitation
const UNVISITED_SCORE: f64 = 1000.0;

/// Statistics for one position in the search tree.
///
/// Nodes are keyed by board encoding rather than by move path, so two move
/// orders reaching the same position share one node and its accumulated
/// statistics. Rewards are stored from this player's perspective: 1 is a
/// win for us, 0 a loss, 0.5 a draw. A terminal node's reward is that
/// absolute outcome; a non-terminal node's reward is a running sum over
/// its visits.
#[derive(Default, Debug)]
pub(crate) struct Node {
    pub(crate) visits: u32,
    pub(crate) reward: f64,
    pub(crate) terminal: bool,
    // child board encodings, one per legal move, in column order
    pub(crate) children: Vec<u64>,
}

/// A Monte Carlo Tree Search player with a transposition table.
///
/// Each decision runs `num_rollouts` cycles of selection, expansion,
/// simulation and backpropagation from the current position. The table
/// maps board encodings to nodes; it persists across the moves of one game
/// and is cleared when a new game starts.
#[derive(Debug)]
pub struct MctsPlayer {
    name: String,
    num_rollouts: u32,
    exploration: f64,
    side: Side,
    rng: StdRng,
    pub(crate) tree: HashMap<u64, Node>,
}

impl MctsPlayer {
    /// `num_rollouts` must be positive and `exploration` non-negative
    /// (sqrt(2) is the usual choice).
    pub fn new<S: Into<String>>(
        name: S,
        num_rollouts: u32,
        exploration: f64,
    ) -> Result<Self, GameError> {
        if num_rollouts == 0 {
            return Err(GameError::ParameterOutOfRange {
                name: "num_rollouts",
                value: num_rollouts as f64,
                bounds: "num_rollouts > 0".to_string(),
            });
        }
        if exploration < 0.0 || exploration.is_nan() {
            return Err(GameError::ParameterOutOfRange {
                name: "exploration",
                value: exploration,
                bounds: "exploration >= 0".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            num_rollouts,
            exploration,
            side: Side::One,
            rng: StdRng::from_os_rng(),
            tree: HashMap::new(),
        })
    }

    /// Replace the internal RNG with a seeded one for reproducible play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// One selection/expansion/simulation/backpropagation cycle rooted at
    /// `key`. `is_opponent` is true when the side to move at this node is
    /// our opponent. Returns the outcome propagated back up this path.
    fn simulate(&mut self, key: u64, to_move: Side, is_opponent: bool) -> Result<f64, GameError> {
        if self.tree.entry(key).or_default().visits == 0 {
            self.expand(key, to_move, is_opponent)?;
        }

        let (visits, terminal, reward) = {
            let node = self.tree.entry(key).or_default();
            node.visits += 1;
            (node.visits, node.terminal, node.reward)
        };
        if terminal {
            return Ok(reward);
        }

        let child_index = self.select_child(key, is_opponent);
        let child_key = self.tree[&key].children[child_index];

        // the first visit below a node estimates it with a random playout,
        // later visits descend the tree instead
        let outcome = if visits == 1 {
            self.random_playout(child_key, to_move.flip())?
        } else {
            self.simulate(child_key, to_move.flip(), !is_opponent)?
        };

        self.tree.entry(key).or_default().reward += outcome;
        Ok(outcome)
    }

    /// First-visit expansion: enumerate the legal moves from `key` and
    /// record the child encodings. A childless position becomes a terminal
    /// draw; a move that wins on the spot eagerly creates a terminal child
    /// scored from the mover's perspective.
    fn expand(&mut self, key: u64, to_move: Side, is_opponent: bool) -> Result<(), GameError> {
        // a node already marked terminal (an eagerly-scored winning child)
        // holds a finished game and must not be expanded
        if self.tree.entry(key).or_default().terminal {
            return Ok(());
        }
        let mut board = Board::decode(key);
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            let node = self.tree.entry(key).or_default();
            node.terminal = true;
            node.reward = 0.5;
            return Ok(());
        }

        let mut children = Vec::with_capacity(legal_moves.len());
        for column in legal_moves {
            let (won, child_key) = board.play_hypothetical(to_move, column)?;
            if won {
                let child = self.tree.entry(child_key).or_default();
                child.terminal = true;
                child.reward = if is_opponent { 0.0 } else { 1.0 };
            }
            children.push(child_key);
        }
        self.tree.entry(key).or_default().children = children;
        Ok(())
    }

    /// Pick the UCT-maximal child of `key`, breaking ties uniformly at
    /// random. Panics if the node has no children: callers must check
    /// terminality first, so reaching this is a logic error.
    pub(crate) fn select_child(&mut self, key: u64, parent_is_opponent: bool) -> usize {
        let (parent_visits, children) = {
            let node = &self.tree[&key];
            (node.visits, node.children.clone())
        };
        let scores: Vec<f64> = children
            .iter()
            .map(|&child| self.uct_score(child, parent_visits, !parent_is_opponent))
            .collect();
        self.pick_best(&scores)
    }

    /// UCT score of a child node as seen from its parent.
    ///
    /// `exploit` is the child's mean reward (terminal nodes already hold an
    /// absolute outcome, so no division), mirrored to `1 - exploit` when
    /// the child is a position where we are to move, because then the
    /// opponent made the selecting decision and wants our reward low.
    fn uct_score(&self, key: u64, parent_visits: u32, child_is_opponent: bool) -> f64 {
        let Some(node) = self.tree.get(&key) else {
            return UNVISITED_SCORE;
        };
        if node.visits == 0 {
            return UNVISITED_SCORE;
        }
        let mut exploit = node.reward;
        if !node.terminal {
            exploit /= node.visits as f64;
        }
        if !child_is_opponent {
            exploit = 1.0 - exploit;
        }
        let explore =
            self.exploration * ((parent_visits as f64).ln() / node.visits as f64).sqrt();
        exploit + explore
    }

    /// Index of the highest score, ties broken uniformly at random.
    fn pick_best(&mut self, scores: &[f64]) -> usize {
        let highest = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let best: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|&(_, &score)| score == highest)
            .map(|(index, _)| index)
            .collect();
        match best.choose(&mut self.rng) {
            Some(&index) => index,
            None => panic!("attempted to select the next node from a terminal position"),
        }
    }

    /// Uniform-random rollout from `key` to a terminal outcome, scored
    /// from this player's perspective.
    fn random_playout(&mut self, key: u64, first_to_move: Side) -> Result<f64, GameError> {
        let mut board = Board::decode(key);
        let mut to_move = first_to_move;
        loop {
            let legal_moves = board.legal_moves();
            let Some(&column) = legal_moves.choose(&mut self.rng) else {
                return Ok(0.5);
            };
            if board.play(to_move, column)? {
                return Ok(if to_move == self.side { 1.0 } else { 0.0 });
            }
            to_move = to_move.flip();
        }
    }
}

impl Player for MctsPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn start_game(&mut self, side: Side) {
        self.side = side;
        self.tree.clear();
    }

    fn select_move(&mut self, board: &Board) -> Result<usize, GameError> {
        let legal_moves = board.legal_moves();
        if legal_moves.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        let root = board.encode();
        for _ in 0..self.num_rollouts {
            self.simulate(root, self.side, false)?;
        }

        // the robust criterion: choose by raw visit count, not UCT score
        let children = self.tree[&root].children.clone();
        let visit_counts: Vec<f64> = children
            .iter()
            .map(|child| self.tree.get(child).map_or(0.0, |node| node.visits as f64))
            .collect();
        let index = self.pick_best(&visit_counts);
        Ok(legal_moves[index])
    }
}
