use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::*;

pub const SNAPSHOT_VERSION: u64 = 1;

/// Per-cell record in a snapshot. Values are left out, they follow from the mine layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
}

/// Self-describing copy of a whole session, independent of how the session stores its state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u64,
    pub settings: Settings,
    /// One entry per row, top to bottom, each holding one record per column.
    pub cells: Vec<Vec<CellRecord>>,
    pub detected: CellCount,
    pub mistaken: CellCount,
    pub moves: CellCount,
    pub status: Status,
    pub first_reveal_done: bool,
    #[serde(default)]
    pub triggered_mine: Option<Coord2>,
}

impl Snapshot {
    pub(crate) fn cells_of(grid: &Grid) -> Vec<Vec<CellRecord>> {
        let (columns, rows) = grid.size();
        (0..rows)
            .map(|y| {
                (0..columns)
                    .map(|x| {
                        let cell = &grid[(x, y)];
                        CellRecord {
                            mine: cell.is_mine(),
                            revealed: cell.is_revealed(),
                            flagged: cell.is_flagged(),
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> core::result::Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a snapshot, checking the version before the rest of the layout.
    pub fn from_json(json: &str) -> core::result::Result<Self, SnapshotError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        match value.get("version").and_then(serde_json::Value::as_u64) {
            Some(SNAPSHOT_VERSION) => Ok(serde_json::from_value(value)?),
            Some(version) => Err(SnapshotError::UnsupportedVersion(version)),
            None => Err(SnapshotError::Inconsistent("missing version")),
        }
    }

    /// Rebuilds the grid and checks that every counter agrees with it.
    pub(crate) fn to_grid(&self) -> core::result::Result<(Grid, FlagTracker), SnapshotError> {
        use SnapshotError::Inconsistent;

        let settings = self.settings;
        if self.cells.len() != usize::from(settings.rows())
            || self
                .cells
                .iter()
                .any(|row| row.len() != usize::from(settings.columns()))
        {
            return Err(Inconsistent("grid shape does not match settings"));
        }

        let mut grid = Grid::empty(settings.size());
        for (y, row) in self.cells.iter().enumerate() {
            for (x, record) in row.iter().enumerate() {
                if record.revealed && record.flagged {
                    return Err(Inconsistent("cell both revealed and flagged"));
                }
                let coords = (x as Coord, y as Coord);
                if record.mine {
                    grid.place_mine(coords);
                }
                let cell = grid.cell_mut(coords);
                cell.is_revealed = record.revealed;
                cell.is_flagged = record.flagged;
            }
        }
        grid.derive_values();

        if grid.mine_count() != settings.mines() {
            return Err(Inconsistent("mine count does not match settings"));
        }

        let flags = FlagTracker::from_grid(&grid);
        if flags.detected() != self.detected || flags.mistaken() != self.mistaken {
            return Err(Inconsistent("flag counters do not match flagged cells"));
        }

        if !self.first_reveal_done
            && (self.status == Status::Lost || grid.iter().any(|cell| cell.is_revealed()))
        {
            return Err(Inconsistent("revealed cells before the first reveal"));
        }

        let mine_revealed = grid.iter().any(|cell| cell.is_mine() && cell.is_revealed());
        match self.status {
            Status::Playing if mine_revealed => {
                return Err(Inconsistent("revealed mine in a game still playing"));
            }
            Status::Won if !flags.is_solved(settings.mines()) => {
                return Err(Inconsistent("won without every mine flagged"));
            }
            _ => {}
        }
        if let Some(coords) = self.triggered_mine {
            if !grid.get(coords).is_some_and(|cell| cell.is_mine() && cell.is_revealed()) {
                return Err(Inconsistent("triggered mine is not a revealed mine"));
            }
        }

        Ok((grid, flags))
    }
}

/// Persistence collaborator offered a snapshot after every state change.
///
/// Failures never reach the player, the session logs them and keeps going in memory.
pub trait SnapshotStore: fmt::Debug {
    fn load(&mut self) -> core::result::Result<Option<Snapshot>, StoreError>;
    fn save(&mut self, snapshot: &Snapshot) -> core::result::Result<(), StoreError>;
    fn clear(&mut self) -> core::result::Result<(), StoreError>;
}

/// Keeps the last snapshot as JSON in memory. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Rc<RefCell<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self) -> Option<String> {
        self.saved.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> core::result::Result<Option<Snapshot>, StoreError> {
        match self.saved.borrow().as_deref() {
            Some(json) => Ok(Some(Snapshot::from_json(json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &Snapshot) -> core::result::Result<(), StoreError> {
        let json = snapshot.to_json()?;
        *self.saved.borrow_mut() = Some(json);
        Ok(())
    }

    fn clear(&mut self) -> core::result::Result<(), StoreError> {
        self.saved.borrow_mut().take();
        Ok(())
    }
}
