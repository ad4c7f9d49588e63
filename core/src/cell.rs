use serde::{Deserialize, Serialize};

use crate::Coord2;

/// What a cell shows once revealed: the mine marker, or how many of its neighbors are mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    Count(u8),
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Per-position state owned by the [`Grid`](crate::Grid).
///
/// `value` is written only while the grid is built, and a cell can be flagged only while hidden.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coords: Coord2,
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    pub(crate) value: CellValue,
}

impl Cell {
    pub(crate) const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            value: CellValue::Count(0),
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn value(&self) -> CellValue {
        self.value
    }

    /// Hidden and not flagged, the only state `reveal` acts on.
    pub const fn is_hidden(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn is_zero(&self) -> bool {
        matches!(self.value, CellValue::Count(0))
    }
}
