use serde::{Deserialize, Serialize};

use crate::*;

/// Running tally of flags, split by whether the flagged cell really holds a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTracker {
    detected: CellCount,
    mistaken: CellCount,
}

impl FlagTracker {
    /// Recounts from the flags currently on `grid`.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut tracker = Self::default();
        for cell in grid.iter().filter(|cell| cell.is_flagged()) {
            tracker.count(cell, true);
        }
        tracker
    }

    /// Correctly flagged mines.
    pub fn detected(&self) -> CellCount {
        self.detected
    }

    /// Flags sitting on safe cells.
    pub fn mistaken(&self) -> CellCount {
        self.mistaken
    }

    /// Flips the flag on a hidden cell. Revealed cells are left alone.
    pub fn toggle(&mut self, cell: &mut Cell) -> MarkOutcome {
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        cell.is_flagged = !cell.is_flagged;
        self.count(cell, cell.is_flagged);

        if cell.is_flagged {
            MarkOutcome::Flagged
        } else {
            MarkOutcome::Unflagged
        }
    }

    fn count(&mut self, cell: &Cell, flagged: bool) {
        let counter = if cell.is_mine {
            &mut self.detected
        } else {
            &mut self.mistaken
        };
        if flagged {
            *counter += 1;
        } else {
            *counter = counter.saturating_sub(1);
        }
    }

    /// Mines minus every placed flag, negative once the player over-flags.
    pub fn remaining_estimate(&self, mines: CellCount) -> i64 {
        i64::from(mines) - i64::from(self.detected) - i64::from(self.mistaken)
    }

    /// Every mine flagged and no flag wasted.
    pub fn is_solved(&self, mines: CellCount) -> bool {
        self.detected == mines && self.mistaken == 0
    }
}
