use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random layouts from a seeded generator, the same seed always yields the same
/// sequence of boards.
#[derive(Clone, Debug)]
pub struct RandomGenerator {
    seed: u64,
    rng: SmallRng,
    placement: Placement,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_placement(seed, Placement::default())
    }

    pub fn with_placement(seed: u64, placement: Placement) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
            placement,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    fn place_by_rejection(&mut self, grid: &mut Grid, mines: CellCount) {
        let (columns, rows) = grid.size();
        let mut rejected = 0u32;
        while grid.mine_count() < mines {
            let x = self.rng.random_range(0..columns);
            let y = self.rng.random_range(0..rows);
            if !grid.place_mine((x, y)) {
                rejected += 1;
            }
        }
        log::trace!("Rejection sampling discarded {} duplicate positions", rejected);
    }

    fn place_by_shuffle(&mut self, grid: &mut Grid, mines: CellCount) {
        let (columns, rows) = grid.size();
        let mut positions: Vec<Coord2> = (0..rows)
            .flat_map(|y| (0..columns).map(move |x| (x, y)))
            .collect();
        positions.shuffle(&mut self.rng);
        for &coords in positions.iter().take(mines as usize) {
            grid.place_mine(coords);
        }
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(&mut self, settings: &Settings) -> Grid {
        let mut grid = Grid::empty(settings.size());

        match self.placement {
            Placement::Rejection => self.place_by_rejection(&mut grid, settings.mines()),
            Placement::Shuffle => self.place_by_shuffle(&mut grid, settings.mines()),
        }
        grid.derive_values();

        log::debug!(
            "Generated {}x{} minefield with {} mines ({:?}, seed {})",
            settings.columns(),
            settings.rows(),
            grid.mine_count(),
            self.placement,
            self.seed
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_well_formed(grid: &Grid, settings: &Settings) {
        assert_eq!(grid.size(), settings.size());
        let mines = grid.iter().filter(|cell| cell.is_mine()).count();
        assert_eq!(mines as CellCount, settings.mines());
        assert_eq!(grid.mine_count(), settings.mines());

        for cell in grid.iter() {
            let expected = if cell.is_mine() {
                CellValue::Mine
            } else {
                let count = neighbors_of(cell.coords(), grid.size())
                    .filter(|&pos| grid[pos].is_mine())
                    .count();
                CellValue::Count(count as u8)
            };
            assert_eq!(cell.value(), expected, "value mismatch at {:?}", cell.coords());
            assert!(cell.is_hidden());
        }
    }

    #[test]
    fn generates_exact_mine_count_and_values() {
        let presets = [
            Settings::beginner(),
            Settings::intermediate(),
            Settings::expert(),
        ];
        for settings in presets {
            for seed in 0..20 {
                for placement in [Placement::Rejection, Placement::Shuffle] {
                    let grid = RandomGenerator::with_placement(seed, placement).generate(&settings);
                    assert_well_formed(&grid, &settings);
                }
            }
        }
    }

    #[test]
    fn near_full_and_empty_boards() {
        let full = Settings::new(3, 3, 8).unwrap();
        let empty = Settings::new(3, 3, 0).unwrap();
        for seed in 0..10 {
            assert_well_formed(&RandomGenerator::new(seed).generate(&full), &full);
            assert_well_formed(&RandomGenerator::new(seed).generate(&empty), &empty);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let settings = Settings::intermediate();
        let mut a = RandomGenerator::new(42);
        let mut b = RandomGenerator::new(42);

        assert_eq!(a.generate(&settings), b.generate(&settings));
        assert_eq!(a.generate(&settings), b.generate(&settings));
    }

    #[test]
    fn regeneration_draws_a_new_layout() {
        let settings = Settings::expert();
        let mut generator = RandomGenerator::new(7);

        let first = generator.generate(&settings);
        let second = generator.generate(&settings);
        assert_ne!(first, second);
    }
}
