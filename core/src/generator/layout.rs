use std::collections::VecDeque;

use super::*;

/// Replays hand-picked mine layouts in order and keeps repeating the last one.
///
/// Used for fixtures and for sessions restored from a snapshot, where the board already exists.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutGenerator {
    layouts: VecDeque<Vec<Coord2>>,
}

impl LayoutGenerator {
    pub fn new<I>(layouts: I) -> Self
    where
        I: IntoIterator<Item = Vec<Coord2>>,
    {
        Self {
            layouts: layouts.into_iter().collect(),
        }
    }

    pub fn single(mines: &[Coord2]) -> Self {
        Self::new([mines.to_vec()])
    }
}

impl MinefieldGenerator for LayoutGenerator {
    fn generate(&mut self, settings: &Settings) -> Grid {
        let mines = if self.layouts.len() > 1 {
            self.layouts.pop_front().unwrap_or_default()
        } else {
            self.layouts.front().cloned().unwrap_or_default()
        };

        let mut grid = Grid::empty(settings.size());
        for coords in mines {
            if grid.contains(coords) {
                grid.place_mine(coords);
            } else {
                log::warn!("Ignoring out of bounds mine at {:?}", coords);
            }
        }
        grid.derive_values();
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_layouts_then_repeats_last() {
        let settings = Settings::new(2, 2, 1).unwrap();
        let mut generator = LayoutGenerator::new([vec![(0, 0)], vec![(1, 1)]]);

        assert!(generator.generate(&settings)[(0, 0)].is_mine());
        assert!(generator.generate(&settings)[(1, 1)].is_mine());
        assert!(generator.generate(&settings)[(1, 1)].is_mine());
    }
}
