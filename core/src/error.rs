use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be positive, got {rows} rows and {columns} columns")]
    InvalidDimensions { rows: Coord, columns: Coord },
    #[error("Too many mines: requested {mines} but the grid only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u64),
    #[error("Snapshot settings are invalid: {0}")]
    Settings(#[from] GameError),
    #[error("Snapshot is inconsistent: {0}")]
    Inconsistent(&'static str),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
