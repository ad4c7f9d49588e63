use core::num::Saturating;

use serde::{Deserialize, Serialize};

use crate::*;

/// Random regenerations tried for an unlucky first reveal before the mine is moved away instead.
const MAX_REGENERATIONS: u32 = 64;

/// Valid transitions:
/// - Initializing -> Playing
/// - Playing -> Restarting -> Initializing (first reveal landed on a mine)
/// - Playing -> Won
/// - Playing -> Lost
///
/// `Initializing` and `Restarting` never outlive a single call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Initializing,
    Playing,
    Restarting,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn status(self) -> Status {
        match self {
            Self::Won => Status::Won,
            Self::Lost => Status::Lost,
            Self::Initializing | Self::Playing | Self::Restarting => Status::Playing,
        }
    }
}

impl From<Status> for SessionState {
    fn from(status: Status) -> Self {
        match status {
            Status::Playing => Self::Playing,
            Status::Won => Self::Won,
            Status::Lost => Self::Lost,
        }
    }
}

/// One game from board generation to win or loss.
///
/// Every action resolves cells through the owned [`Grid`], no other component keeps a reference
/// into it.
#[derive(Debug)]
pub struct Session<G = RandomGenerator> {
    settings: Settings,
    grid: Grid,
    flags: FlagTracker,
    generator: G,
    state: SessionState,
    moves: Saturating<CellCount>,
    first_reveal_done: bool,
    restarts: u32,
    triggered_mine: Option<Coord2>,
    store: Option<Box<dyn SnapshotStore>>,
}

impl Session<RandomGenerator> {
    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        Self::new(settings, RandomGenerator::new(seed))
    }
}

impl<G: MinefieldGenerator> Session<G> {
    pub fn new(settings: Settings, mut generator: G) -> Self {
        log::debug!("Session {:?}", SessionState::Initializing);
        let grid = generator.generate(&settings);
        Self {
            settings,
            grid,
            flags: FlagTracker::default(),
            generator,
            state: SessionState::Playing,
            moves: Saturating(0),
            first_reveal_done: false,
            restarts: 0,
            triggered_mine: None,
            store: None,
        }
    }

    /// Starts from an existing board, settings are taken from its size and mine count.
    pub fn from_grid(grid: Grid, generator: G) -> Result<Self> {
        let (columns, rows) = grid.size();
        let settings = Settings::new(rows, columns, grid.mine_count())?;
        let flags = FlagTracker::from_grid(&grid);
        Ok(Self {
            settings,
            grid,
            flags,
            generator,
            state: SessionState::Playing,
            moves: Saturating(0),
            first_reveal_done: false,
            restarts: 0,
            triggered_mine: None,
            store: None,
        })
    }

    /// Rebuilds a session from a snapshot. `generator` is only used by later regenerations.
    pub fn restore(
        snapshot: &Snapshot,
        generator: G,
    ) -> core::result::Result<Self, SnapshotError> {
        let (grid, flags) = snapshot.to_grid()?;
        Ok(Self::from_parts(snapshot, grid, flags, generator))
    }

    /// Restores the stored session when there is a usable one for `settings`, otherwise starts a
    /// new game. The store stays attached either way.
    pub fn resume(settings: Settings, generator: G, mut store: Box<dyn SnapshotStore>) -> Self {
        let restored = match store.load() {
            Ok(Some(snapshot)) if snapshot.settings == settings => match snapshot.to_grid() {
                Ok((grid, flags)) => Some((snapshot, grid, flags)),
                Err(err) => {
                    log::warn!("Discarding stored session: {}", err);
                    None
                }
            },
            Ok(Some(_)) => {
                log::debug!("Stored session uses other settings, starting a new game");
                None
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("Could not load stored session: {}", err);
                None
            }
        };

        let mut session = match restored {
            Some((snapshot, grid, flags)) => {
                log::debug!("Resumed session after {} moves", snapshot.moves);
                Self::from_parts(&snapshot, grid, flags, generator)
            }
            None => Self::new(settings, generator),
        };
        session.store = Some(store);
        session.persist();
        session
    }

    fn from_parts(snapshot: &Snapshot, grid: Grid, flags: FlagTracker, generator: G) -> Self {
        Self {
            settings: snapshot.settings,
            grid,
            flags,
            generator,
            state: snapshot.status.into(),
            moves: Saturating(snapshot.moves),
            first_reveal_done: snapshot.first_reveal_done,
            restarts: 0,
            triggered_mine: snapshot.triggered_mine,
            store: None,
        }
    }

    pub fn attach_store(&mut self, store: Box<dyn SnapshotStore>) {
        self.store = Some(store);
        self.persist();
    }

    pub fn detach_store(&mut self) -> Option<Box<dyn SnapshotStore>> {
        self.store.take()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn moves(&self) -> CellCount {
        self.moves.0
    }

    pub fn detected(&self) -> CellCount {
        self.flags.detected()
    }

    pub fn mistaken(&self) -> CellCount {
        self.flags.mistaken()
    }

    pub fn mines_remaining(&self) -> i64 {
        self.flags.remaining_estimate(self.settings.mines())
    }

    /// Times the board was thrown away because the first reveal hit a mine.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Whether the first reveal has happened, the event an elapsed-time display starts on.
    pub fn has_started(&self) -> bool {
        self.first_reveal_done
    }

    pub fn view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(CellView::of(
            &self.grid[coords],
            self.status(),
            self.triggered_mine == Some(coords),
        ))
    }

    pub fn summary(&self) -> Summary {
        Summary {
            status: self.status(),
            moves: self.moves(),
            mines_remaining: self.mines_remaining(),
            started: self.has_started(),
        }
    }

    /// Throws the board away and starts over with a fresh layout and every counter at zero.
    ///
    /// The stored copy of the abandoned game is cleared before the new one is saved.
    pub fn new_game(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.clear() {
                log::warn!("Could not clear stored session: {}", err);
            }
        }
        self.regenerate();
        self.moves = Saturating(0);
        self.first_reveal_done = false;
        self.restarts = 0;
        self.persist();
    }

    /// Reveals a cell, cascading through cells without adjacent mines.
    ///
    /// Stale input is absorbed: revealing a revealed or flagged cell, or acting after the game
    /// ended, returns [`RevealOutcome::NoChange`]. Only out-of-range coordinates are an error.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.count_move(coords) {
            return Ok(NoChange);
        }

        if self.grid[coords].is_flagged() {
            self.persist();
            return Ok(NoChange);
        }

        if !self.first_reveal_done {
            self.ensure_safe_start(coords);
            self.first_reveal_done = true;
        }

        let outcome = if self.grid[coords].is_mine() {
            self.lose(coords);
            HitMine
        } else {
            let cascade = reveal_from(&mut self.grid, coords);
            log::debug!("Revealed {} cells from {:?}", cascade.revealed, coords);
            match self.evaluate() {
                SessionState::Won => Won,
                _ => Revealed,
            }
        };

        self.persist();
        Ok(outcome)
    }

    /// Flags or unflags a hidden cell.
    ///
    /// The status is evaluated after flagging but not after unflagging, so removing the last
    /// wrong flag does not win on its own; the next action does.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.grid.validate_coords(coords)?;
        if !self.count_move(coords) {
            return Ok(NoChange);
        }

        let outcome = match self.flags.toggle(self.grid.cell_mut(coords)) {
            Flagged => match self.evaluate() {
                SessionState::Won => Won,
                _ => Flagged,
            },
            other => other,
        };

        self.persist();
        Ok(outcome)
    }

    /// Moves to `Won` once every mine is flagged and no flag is wrong. Losing is decided by
    /// [`reveal`](Self::reveal) alone.
    pub fn evaluate(&mut self) -> SessionState {
        if self.state.is_playing() && self.flags.is_solved(self.settings.mines()) {
            self.state = SessionState::Won;
            log::debug!("Session won after {} moves", self.moves());
        }
        self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            settings: self.settings,
            cells: Snapshot::cells_of(&self.grid),
            detected: self.flags.detected(),
            mistaken: self.flags.mistaken(),
            moves: self.moves(),
            status: self.status(),
            first_reveal_done: self.first_reveal_done,
            triggered_mine: self.triggered_mine,
        }
    }

    /// The gate player input passes before reaching the board: the game is on and the target is
    /// not revealed yet. Counts the move when it passes.
    fn count_move(&mut self, coords: Coord2) -> bool {
        if !self.state.is_playing() || self.grid[coords].is_revealed() {
            return false;
        }
        self.moves += 1;
        true
    }

    fn regenerate(&mut self) {
        self.state = SessionState::Initializing;
        log::debug!("Session {:?}", self.state);
        self.grid = self.generator.generate(&self.settings);
        self.flags = FlagTracker::default();
        self.triggered_mine = None;
        self.state = SessionState::Playing;
    }

    /// Regenerates until `coords` is safe, so the first reveal is never spent on a mine.
    fn ensure_safe_start(&mut self, coords: Coord2) {
        while self.grid[coords].is_mine() {
            self.state = SessionState::Restarting;
            log::debug!("First reveal at {:?} hit a mine, {:?}", coords, self.state);

            if self.restarts < MAX_REGENERATIONS {
                self.regenerate();
            } else {
                self.move_mine_away(coords);
            }
            self.restarts += 1;
            // the discarded board took its moves with it, only this reveal counts
            self.moves = Saturating(1);
        }
    }

    /// Rebuilds the board with the mine at `coords` moved to the first free cell.
    fn move_mine_away(&mut self, coords: Coord2) {
        let mut mines: Vec<Coord2> = self
            .grid
            .iter()
            .filter(|cell| cell.is_mine() && cell.coords() != coords)
            .map(Cell::coords)
            .collect();
        if let Some(free) = self
            .grid
            .iter()
            .find(|cell| !cell.is_mine() && cell.coords() != coords)
        {
            mines.push(free.coords());
        }

        let mut grid = Grid::empty(self.settings.size());
        for mine in mines {
            grid.place_mine(mine);
        }
        grid.derive_values();

        self.grid = grid;
        self.flags = FlagTracker::default();
        self.state = SessionState::Playing;
    }

    fn lose(&mut self, coords: Coord2) {
        self.grid.cell_mut(coords).is_revealed = true;
        self.triggered_mine = Some(coords);
        self.state = SessionState::Lost;
        let shown = reveal_mines(&mut self.grid);
        log::debug!("Hit mine at {:?}, showing {} more mines", coords, shown);
    }

    fn persist(&mut self) {
        if self.store.is_none() {
            return;
        }
        let snapshot = self.snapshot();
        if let Some(store) = self.store.as_mut() {
            if let Err(err) = store.save(&snapshot) {
                log::warn!("Could not save session, continuing in memory: {}", err);
            }
        }
    }
}
