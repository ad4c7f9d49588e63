use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Rectangular matrix of [`Cell`]s, addressed only by coordinates.
///
/// Neighbor relations are never stored, they are recomputed from the grid size on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Grid {
    /// A grid of hidden cells without any mines.
    pub fn empty((columns, rows): Coord2) -> Self {
        let cells = Array2::from_shape_fn((usize::from(columns), usize::from(rows)), |(x, y)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self {
            cells,
            mine_count: 0,
        }
    }

    /// Builds a grid with mines at exactly `mine_coords`, with every value derived.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::empty(size);
        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.place_mine(coords);
        }
        grid.derive_values();
        Ok(grid)
    }

    /// `(columns, rows)`
    pub fn size(&self) -> Coord2 {
        let (columns, rows) = self.cells.dim();
        (columns as Coord, rows as Coord)
    }

    pub fn columns(&self) -> Coord {
        self.size().0
    }

    pub fn rows(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (columns, rows) = self.size();
        mult(columns, rows)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (columns, rows) = self.size();
        x < columns && y < rows
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords(coords))
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        neighbors_of(coords, self.size())
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, fits in u8
        self.neighbors(coords).filter(|&pos| self[pos].is_mine).count() as u8
    }

    /// Cells in row-major order, row by row from the top.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.t().into_iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    /// Marks a mine, returning `false` when the cell already held one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = self.cell_mut(coords);
        if cell.is_mine {
            return false;
        }
        cell.is_mine = true;
        cell.value = CellValue::Mine;
        self.mine_count += 1;
        true
    }

    /// Writes every cell's value from the current mine layout.
    pub(crate) fn derive_values(&mut self) {
        let (columns, rows) = self.size();
        for x in 0..columns {
            for y in 0..rows {
                let coords = (x, y);
                let value = if self[coords].is_mine {
                    CellValue::Mine
                } else {
                    CellValue::Count(self.adjacent_mine_count(coords))
                };
                self.cell_mut(coords).value = value;
            }
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_grid_cells_know_their_coordinates() {
        let grid = Grid::empty((4, 3));

        assert_eq!(grid.size(), (4, 3));
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid[(3, 2)].coords(), (3, 2));
        assert!(grid.iter().all(|cell| cell.is_hidden() && !cell.is_mine()));
    }

    #[test]
    fn values_count_adjacent_mines() {
        // . * .
        // . . .
        // * . *
        let grid = Grid::from_mine_coords((3, 3), &[(1, 0), (0, 2), (2, 2)]).unwrap();

        assert_eq!(grid.mine_count(), 3);
        assert_eq!(grid[(1, 0)].value(), CellValue::Mine);
        assert_eq!(grid[(0, 0)].value(), CellValue::Count(1));
        assert_eq!(grid[(1, 1)].value(), CellValue::Count(3));
        assert_eq!(grid[(1, 2)].value(), CellValue::Count(2));
        assert_eq!(grid[(0, 1)].value(), CellValue::Count(2));
    }

    #[test]
    fn duplicate_mine_coords_count_once() {
        let grid = Grid::from_mine_coords((2, 2), &[(0, 0), (0, 0)]).unwrap();
        assert_eq!(grid.mine_count(), 1);
    }

    #[test]
    fn out_of_bounds_mine_is_rejected() {
        assert_eq!(
            Grid::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::InvalidCoords((2, 0)))
        );
        assert!(Grid::empty((2, 2)).get((0, 2)).is_none());
    }

    #[test]
    fn iter_is_row_major() {
        let grid = Grid::empty((2, 2));
        let order: Vec<_> = grid.iter().map(Cell::coords).collect();
        assert_eq!(order, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
