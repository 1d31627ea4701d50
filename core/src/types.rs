use ndarray::Array2;

/// Single board axis used for row/column indices and width/height.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Board position as `(row, column)`, both 0-based.
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

pub const fn cell_count(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}

const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets `center` by `delta`, returning the neighbor only while it
/// stays on the board.
fn offset(center: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let row = center.0.checked_add_signed(delta.0)?;
    let col = center.1.checked_add_signed(delta.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterator over the in-bounds 8-neighborhood of a cell.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(usize::from(self.next)) {
            self.next += 1;
            if let Some(pos) = offset(self.center, delta, self.bounds) {
                return Some(pos);
            }
        }
        None
    }
}
