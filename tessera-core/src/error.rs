//! Error types for the core engine

use crate::game::Phase;
use crate::grid::Direction;

/// Errors raised by catalog lookups and the random source
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Min \"{min}\" greater than max \"{max}\"")]
    InvalidRange { min: i64, max: i64 },

    #[error("Unknown tile name: {0}")]
    UnknownTileName(String),

    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Tile catalog has no drawable templates")]
    EmptyCatalog,

    #[error("A game needs at least one player")]
    NoPlayers,
}

/// Why a tile may not occupy a cell.
///
/// Rejections are an expected part of play and leave the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    #[error("Cell is already occupied")]
    Occupied,

    #[error("Cell has no occupied neighbor")]
    NoNeighbors,

    #[error("Edge features do not match the {direction:?} neighbor")]
    Mismatch { direction: Direction },
}

/// Misuse of the turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("Action needs phase {expected}, game is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("Rotation must be 0-3, got {0}")]
    InvalidRotation(u8),

    #[error("No tile waiting to be placed")]
    NoTileToPlace,
}

pub type CoreResult<T> = Result<T, CoreError>;
