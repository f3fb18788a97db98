use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Unknown difficulty, expected beginner, intermediate or expert")]
    UnknownDifficulty,
}

/// Why a `(rows, cols, hazards)` triple was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: Coord, cols: Coord },
    #[error("{hazards} hazards do not fit a board of {cells} cells, at least one cell must stay safe")]
    TooManyHazards { hazards: CellCount, cells: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
