use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use flag::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use snapshot::*;
pub use types::*;
pub use view::*;

mod cell;
mod error;
mod flag;
mod generator;
mod grid;
mod reveal;
mod session;
mod snapshot;
mod types;
mod view;

/// Board dimensions and mine count, fixed for the lifetime of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct Settings {
    rows: Coord,
    columns: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawSettings {
    rows: Coord,
    columns: Coord,
    mines: CellCount,
}

impl TryFrom<RawSettings> for Settings {
    type Error = GameError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        Self::new(raw.rows, raw.columns, raw.mines)
    }
}

impl Settings {
    /// Rejects empty grids and any mine count that would not leave at least one safe cell.
    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidDimensions { rows, columns });
        }
        let cells = mult(columns, rows);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }
        Ok(Self {
            rows,
            columns,
            mines,
        })
    }

    pub const fn beginner() -> Self {
        Self {
            rows: 8,
            columns: 10,
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            rows: 14,
            columns: 18,
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            rows: 20,
            columns: 24,
            mines: 99,
        }
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// `(columns, rows)`, the bounds of every [`Coord2`].
    pub const fn size(&self) -> Coord2 {
        (self.columns, self.rows)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.columns, self.rows)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::beginner()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
    Won,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
