use thiserror::Error;

/// Board-size validation failures, one variant per diagnostic the size
/// prompt prints.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Dimension is too big or too small.")]
    DimensionOutOfRange,
    #[error("At least 1 mine must be present.")]
    NoMines,
    #[error("Too many mines.")]
    TooManyMines,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position is outside the board")]
    OutOfBounds,
    #[error("Round already ended, no new moves are accepted")]
    RoundOver,
}

/// Move-grammar failures; the prompt prints these and asks again.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid position.")]
    Invalid,
    #[error("Position out of range.")]
    OutOfRange,
}

pub type Result<T> = core::result::Result<T, GameError>;
