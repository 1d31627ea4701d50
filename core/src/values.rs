use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Sentinel stored for mine cells, distinct from every 0-8 adjacency
/// count.
pub const MINE: i8 = -1;

/// Per-cell values derived once from a mine placement: `MINE` for mine
/// cells, the 8-neighbor mine count for everything else. Off-board
/// neighbors contribute nothing, so edge cells just see a smaller
/// neighborhood.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueGrid {
    values: Array2<i8>,
}

impl ValueGrid {
    pub fn from_mines(mines: &MineGrid) -> Self {
        let (rows, cols) = mines.size();
        let values = Array2::from_shape_fn((rows as usize, cols as usize), |(r, c)| {
            let pos = (r as Coord, c as Coord);
            if mines.contains_mine(pos) {
                MINE
            } else {
                mines.adjacent_mine_count(pos) as i8
            }
        });
        Self { values }
    }

    pub fn validate_coords(&self, pos: Coord2) -> Result<Coord2> {
        let size = self.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn size(&self) -> Coord2 {
        let dim = self.values.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn value_at(&self, pos: Coord2) -> i8 {
        self.values[pos.to_nd_index()]
    }

    pub fn is_mine(&self, pos: Coord2) -> bool {
        self.value_at(pos) == MINE
    }

    pub(crate) fn iter_neighbors(&self, pos: Coord2) -> NeighborIter {
        self.values.iter_neighbors(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_is_all_zero() {
        let mines = MineGrid::from_mine_coords((4, 4), &[]).unwrap();
        let values = ValueGrid::from_mines(&mines);
        for r in 0..4 {
            for c in 0..4 {
                assert_eq!(values.value_at((r, c)), 0);
            }
        }
    }

    #[test]
    fn single_mine_marks_exactly_its_neighborhood() {
        let mines = MineGrid::from_mine_coords((4, 5), &[(1, 2)]).unwrap();
        let values = ValueGrid::from_mines(&mines);

        assert_eq!(values.value_at((1, 2)), MINE);
        assert!(values.is_mine((1, 2)));
        for r in 0..4u8 {
            for c in 0..5u8 {
                if (r, c) == (1, 2) {
                    continue;
                }
                let adjacent = r.abs_diff(1) <= 1 && c.abs_diff(2) <= 1;
                assert_eq!(
                    values.value_at((r, c)),
                    if adjacent { 1 } else { 0 },
                    "wrong count at {:?}",
                    (r, c)
                );
            }
        }
    }

    #[test]
    fn corner_mine_counts_clip_at_edges() {
        let mines = MineGrid::from_mine_coords((3, 3), &[(0, 0), (0, 1)]).unwrap();
        let values = ValueGrid::from_mines(&mines);
        assert_eq!(values.value_at((1, 0)), 2);
        assert_eq!(values.value_at((0, 2)), 1);
        assert_eq!(values.value_at((2, 2)), 0);
    }
}
