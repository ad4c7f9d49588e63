use serde::{Deserialize, Serialize};

use crate::*;

/// Player-facing status of a session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a renderer may show for one cell. Mines are only disclosed once revealed or once the game
/// is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
    /// A flag on a safe cell, only shown after a loss.
    WrongFlag,
}

impl CellView {
    pub fn of(cell: &Cell, status: Status, triggered: bool) -> Self {
        use CellView::*;

        match (cell.is_revealed(), cell.is_flagged(), cell.value()) {
            (true, _, CellValue::Mine) if triggered => Exploded,
            (true, _, CellValue::Mine) => Mine,
            (true, _, CellValue::Count(count)) => Revealed(count),
            (false, true, _) if status == Status::Lost && !cell.is_mine() => WrongFlag,
            (false, true, _) => Flagged,
            (false, false, _) if status.is_finished() && cell.is_mine() => Mine,
            (false, false, _) => Hidden,
        }
    }

    /// Whether the cell still looks closed to the player.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged | Self::WrongFlag)
    }
}

/// Session-level values a renderer pulls after each action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub status: Status,
    pub moves: CellCount,
    /// Mines minus placed flags, the counter shown to the player. Not used to decide a win.
    pub mines_remaining: i64,
    /// The first reveal has happened, the point where an elapsed-time display starts.
    pub started: bool,
}
