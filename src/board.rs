use crate::error::GameError;
use crate::scan;
use crate::{COLUMN_BITS, HEIGHT, WIDTH};

/// The canonical encoding of an empty board: every column lane (including
/// the unused eighth lane) holds its marker bit at row 0. `Board::encode`
/// never produces 0, so 0 is accepted as an alias for this value.
pub const EMPTY_ENCODING: u64 = 0x0101_0101_0101_0101;

// marker bit for the lane above the last real column
const SPARE_LANE_MARKER: u64 = 1 << (WIDTH * COLUMN_BITS);

/// One of the two token owners.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn flip(self) -> Self {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn token(self) -> bool {
        self == Side::One
    }
}

/// One column of the board, packed into a byte.
///
/// Bits below the highest set bit are tokens (set for [`Side::One`]), the
/// highest set bit itself is a marker recording the stack height. An empty
/// column is `0b1`: marker at row 0, nothing below it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct ColumnBits(u8);

impl ColumnBits {
    const EMPTY: Self = Self(0b1);

    fn height(self) -> usize {
        (7 - self.0.leading_zeros()) as usize
    }

    fn token(self, row: usize) -> bool {
        self.0 & (1 << row) != 0
    }

    fn push(&mut self, token: bool) {
        let marker = 1u8 << self.height();
        if !token {
            self.0 ^= marker;
        }
        self.0 |= marker << 1;
    }

    fn pop(&mut self) {
        debug_assert!(self.height() > 0);
        let marker = 1u8 << self.height();
        self.0 ^= marker;
        self.0 |= marker >> 1;
    }

    /// Occupancy bitmap of this column for one owner: bit `row` is set iff
    /// the cell is filled and belongs to `owner`. The marker bit is
    /// cancelled out, so bit tests double as bounds checks against the
    /// current stack height.
    fn bitmap(self, owner: bool) -> u8 {
        let marker = 1u8 << self.height();
        let mut bits = self.0 ^ marker;
        if !owner {
            bits ^= marker - 1;
        }
        bits
    }
}

fn pack(columns: &[ColumnBits; WIDTH]) -> u64 {
    let mut encoded = SPARE_LANE_MARKER;
    for (index, column) in columns.iter().enumerate() {
        encoded |= (column.0 as u64) << (index * COLUMN_BITS);
    }
    encoded
}

fn unpack(encoded: u64) -> [ColumnBits; WIDTH] {
    let mut columns = [ColumnBits::EMPTY; WIDTH];
    if encoded == 0 {
        // 0 is the uninitialised alias for the empty board
        return columns;
    }
    for (index, column) in columns.iter_mut().enumerate() {
        let lane = (encoded >> (index * COLUMN_BITS)) as u8;
        if lane != 0 {
            *column = ColumnBits(lane);
        }
    }
    columns
}

/// A 7x6 Connect 4 position.
///
/// The whole position packs into a `u64` via [`Board::encode`] /
/// [`Board::decode`], which is also the key used by the tree-search
/// player's transposition table.
#[derive(Clone, Debug)]
pub struct Board {
    columns: [ColumnBits; WIDTH],
    // only used to highlight the freshest token when rendering
    last_move: Option<(usize, usize)>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            columns: [ColumnBits::EMPTY; WIDTH],
            last_move: None,
        }
    }

    /// Reconstruct a board from its packed encoding. The literal value 0
    /// decodes to the empty board, the same state as
    /// [`EMPTY_ENCODING`].
    pub fn decode(encoded: u64) -> Self {
        Self {
            columns: unpack(encoded),
            last_move: None,
        }
    }

    pub fn encode(&self) -> u64 {
        pack(&self.columns)
    }

    pub fn is_legal_move(&self, column: usize) -> bool {
        column < WIDTH && self.columns[column].height() < HEIGHT
    }

    /// All playable columns in ascending order. Empty means the board is
    /// full and the game is a draw.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&c| self.is_legal_move(c)).collect()
    }

    /// Drop a token for `side` into `column`. Returns whether the move
    /// completed four in a row through the placed cell.
    pub fn play(&mut self, side: Side, column: usize) -> Result<bool, GameError> {
        if column >= WIDTH {
            return Err(GameError::ColumnOutOfRange { column });
        }
        let row = self.columns[column].height();
        if row >= HEIGHT {
            return Err(GameError::ColumnFull { column });
        }
        self.columns[column].push(side.token());
        self.last_move = Some((column, row));
        Ok(scan::connects_four(self, column, row))
    }

    /// Play a move, capture the outcome and the resulting encoding, then
    /// take the move back. The board is unchanged on return.
    pub fn play_hypothetical(
        &mut self,
        side: Side,
        column: usize,
    ) -> Result<(bool, u64), GameError> {
        let previous_last_move = self.last_move;
        let won = self.play(side, column)?;
        let encoded = self.encode();
        self.columns[column].pop();
        self.last_move = previous_last_move;
        Ok((won, encoded))
    }

    pub fn column_height(&self, column: usize) -> usize {
        self.columns[column].height()
    }

    /// The owner of the token at (`column`, `row`), or `None` for an empty
    /// or out-of-range cell.
    pub fn cell(&self, column: usize, row: usize) -> Option<Side> {
        if column >= WIDTH || row >= self.columns[column].height() {
            return None;
        }
        if self.columns[column].token(row) {
            Some(Side::One)
        } else {
            Some(Side::Two)
        }
    }

    /// Position of the most recently played token, if any.
    pub fn last_move(&self) -> Option<(usize, usize)> {
        self.last_move
    }

    pub(crate) fn side_bitmaps(&self, side: Side) -> [u8; WIDTH] {
        let mut bitmaps = [0; WIDTH];
        for (bitmap, column) in bitmaps.iter_mut().zip(self.columns.iter()) {
            *bitmap = column.bitmap(side.token());
        }
        bitmaps
    }

    /// Human-readable grid, top row first: `x`/`o` for the two sides,
    /// uppercased for the most recently placed token, `.` for empty.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in (0..HEIGHT).rev() {
            for column in 0..WIDTH {
                if column != 0 {
                    out.push(' ');
                }
                let fresh = self.last_move == Some((column, row));
                out.push(match (self.cell(column, row), fresh) {
                    (Some(Side::One), true) => 'X',
                    (Some(Side::One), false) => 'x',
                    (Some(Side::Two), true) => 'O',
                    (Some(Side::Two), false) => 'o',
                    (None, _) => '.',
                });
            }
            if row != 0 {
                out.push('\n');
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// the last-move marker is cosmetic and not part of the position
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.columns == other.columns
    }
}

impl Eq for Board {}
