use crate::*;

/// Result of one reveal step on the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cascade {
    /// Cells that went from hidden to revealed, the starting cell included.
    pub revealed: CellCount,
}

/// Reveals `start` and, when it has no adjacent mines, every connected zero-valued cell plus the
/// numbered cells bordering that region.
///
/// Uses an explicit worklist so the depth of the flood never depends on the call stack. Revealed
/// and flagged cells are skipped, which also bounds the work by the number of cells. Mines are
/// never revealed here: the caller deals with a mine at `start` before calling this.
pub fn reveal_from(grid: &mut Grid, start: Coord2) -> Cascade {
    let mut cascade = Cascade::default();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        let cell = grid.cell_mut(coords);
        if !cell.is_hidden() || cell.is_mine {
            continue;
        }
        cell.is_revealed = true;
        cascade.revealed += 1;

        if cell.is_zero() {
            let before = to_visit.len();
            to_visit.extend(grid.neighbors(coords).filter(|&pos| grid[pos].is_hidden()));
            log::trace!(
                "Cascade from {:?} queued {} neighbors",
                coords,
                to_visit.len() - before
            );
        }
    }

    cascade
}

/// Reveals every hidden mine at once, without cascading. Flagged mines stay flagged.
pub fn reveal_mines(grid: &mut Grid) -> CellCount {
    let mut revealed = 0;
    for cell in grid.iter_mut() {
        if cell.is_mine && cell.is_hidden() {
            cell.is_revealed = true;
            revealed += 1;
        }
    }
    revealed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn revealed(grid: &Grid) -> Vec<Coord2> {
        grid.iter()
            .filter(|cell| cell.is_revealed())
            .map(Cell::coords)
            .collect()
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut grid = Grid::from_mine_coords((3, 3), &[(2, 2)]).unwrap();

        let cascade = reveal_from(&mut grid, (1, 1));

        assert_eq!(cascade.revealed, 1);
        assert_eq!(revealed(&grid), vec![(1, 1)]);
    }

    #[test]
    fn zero_cell_floods_region_and_border() {
        // 0 0 0 1 1
        // 0 0 0 1 *
        // 1 1 0 1 1
        // * 1 0 0 0
        let mut grid = Grid::from_mine_coords((5, 4), &[(4, 1), (0, 3)]).unwrap();

        let cascade = reveal_from(&mut grid, (0, 0));

        let hidden: Vec<_> = grid
            .iter()
            .filter(|cell| !cell.is_revealed())
            .map(Cell::coords)
            .collect();
        assert_eq!(hidden, vec![(4, 0), (4, 1), (0, 3)]);
        assert_eq!(cascade.revealed, 17);
        assert!(grid.iter().all(|cell| !(cell.is_mine() && cell.is_revealed())));
    }

    #[test]
    fn cascade_stops_at_flags_and_separate_regions() {
        // 0 0 1 . . .
        // 0 0 1 * . .
        // 0 0 1 . . .
        let mut grid = Grid::from_mine_coords((6, 3), &[(3, 1)]).unwrap();
        grid.cell_mut((1, 1)).is_flagged = true;

        reveal_from(&mut grid, (0, 0));

        assert!(grid[(1, 1)].is_flagged());
        assert!(!grid[(1, 1)].is_revealed());
        assert!(grid[(2, 2)].is_revealed());
        // the zero region to the right of the mine is not connected
        assert!(!grid[(5, 0)].is_revealed());
        assert!(!grid[(3, 1)].is_revealed());
    }

    #[test]
    fn revealing_again_is_a_no_op() {
        let mut grid = Grid::from_mine_coords((4, 4), &[]).unwrap();

        assert_eq!(reveal_from(&mut grid, (2, 2)).revealed, 16);
        assert_eq!(reveal_from(&mut grid, (0, 0)).revealed, 0);
    }

    #[test]
    fn large_board_cascade_does_not_recurse() {
        let mut grid = Grid::empty((300, 300));

        assert_eq!(reveal_from(&mut grid, (150, 150)).revealed, 90_000);
    }

    #[test]
    fn show_all_skips_flagged_mines() {
        let mut grid = Grid::from_mine_coords((3, 3), &[(0, 0), (2, 2), (2, 0)]).unwrap();
        grid.cell_mut((2, 0)).is_flagged = true;

        assert_eq!(reveal_mines(&mut grid), 2);
        assert!(grid[(0, 0)].is_revealed());
        assert!(grid[(2, 2)].is_revealed());
        assert!(grid[(2, 0)].is_flagged() && !grid[(2, 0)].is_revealed());
        assert!(!grid[(1, 1)].is_revealed());
    }
}
