use thiserror::Error;

use crate::WIDTH;

/// Everything that can go wrong when driving the engine.
///
/// Apart from [`GameError::NoMoveProvided`] and [`GameError::Io`], which an
/// interactive front-end may hit on a closed input stream, these all
/// indicate a caller bug or an invalid configuration and are surfaced
/// immediately rather than recovered from.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("column {column} is out of range, columns are 0..{}", WIDTH)]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("invalid value [{name}={value}]: expected {bounds}")]
    ParameterOutOfRange {
        name: &'static str,
        value: f64,
        bounds: String,
    },

    #[error("no legal moves remain")]
    NoLegalMoves,

    #[error("bad player spec '{0}', expected h[:name], b[:name] or m[:name]")]
    UnknownPlayerSpec(String),

    #[error("input stream closed before a move was provided")]
    NoMoveProvided,

    #[error("failed to read move input: {0}")]
    Io(#[from] std::io::Error),
}

/// Open-interval range check used to validate search parameters at
/// construction time.
pub(crate) fn ensure_in_open_range(
    name: &'static str,
    min: f64,
    value: f64,
    max: f64,
) -> Result<(), GameError> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(GameError::ParameterOutOfRange {
            name,
            value,
            bounds: format!("{} < {} < {}", min, name, max),
        })
    }
}
