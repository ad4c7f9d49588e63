use crate::*;
pub use layout::*;
pub use random::*;

mod layout;
mod random;

/// Source of mine layouts. Called once when a session starts and again whenever the board has to
/// be regenerated, so implementations keep their own state between calls.
pub trait MinefieldGenerator {
    /// Produces a grid with exactly `settings.mines()` mines and every value derived.
    fn generate(&mut self, settings: &Settings) -> Grid;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Draw random positions and reject the ones already holding a mine.
    #[default]
    Rejection,
    /// Shuffle every position and mine the first ones, cost never depends on density.
    Shuffle,
}
