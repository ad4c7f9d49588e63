/// Single coordinate axis used for grid width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts, move counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`: `x` is the column, `y` the row.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (i32, i32), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx.try_into().ok()?)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy.try_into().ok()?)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Every in-bounds position touching `center`, diagonals included.
///
/// Pure function of the grid size and the coordinates: edges and corners are
/// clipped, there is no wraparound, and `center` itself is never yielded.
pub fn neighbors_of(center: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(center, size)
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
