#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use coords::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use tile::*;
pub use types::*;
pub use values::*;

mod board;
mod coords;
mod error;
mod game;
mod generator;
mod tile;
mod types;
mod values;

/// Largest accepted board side length.
pub const MAX_SIZE: Coord = 100;

/// A board must have more than `MINE_FACTOR * mines` cells.
pub const MINE_FACTOR: CellCount = 2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Validates player-supplied board parameters. The last bound keeps
    /// room for the 3x3 first-move safe zone even on narrow boards.
    pub fn new(
        width: Coord,
        height: Coord,
        mines: CellCount,
    ) -> core::result::Result<Self, ConfigError> {
        if width == 0 || width > MAX_SIZE || height == 0 || height > MAX_SIZE {
            return Err(ConfigError::DimensionOutOfRange);
        }
        if mines == 0 {
            return Err(ConfigError::NoMines);
        }
        let total = cell_count(width, height);
        let side = 3.min(width.min(height)) as CellCount;
        if total <= mines.saturating_mul(MINE_FACTOR) || mines > total.saturating_sub(3 * side) {
            return Err(ConfigError::TooManyMines);
        }
        Ok(Self::new_unchecked(width, height, mines))
    }

    /// Grid dimensions as `(rows, columns)`.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.width, self.height)
    }
}

/// Mine placement for one round. Created once at the first move and
/// immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineGrid {
    mask: Array2<bool>,
    mines: CellCount,
}

impl MineGrid {
    pub fn from_mask(mask: Array2<bool>) -> Self {
        let mines = mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self { mask, mines }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &pos in mine_coords {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mask))
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
        let dim = self.mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn contains_mine(&self, pos: Coord2) -> bool {
        self[pos]
    }

    pub fn adjacent_mine_count(&self, pos: Coord2) -> u8 {
        self.mask
            .iter_neighbors(pos)
            .filter(|&neighbor| self[neighbor])
            .count()
            .try_into()
            .unwrap()
    }
}

impl Index<Coord2> for MineGrid {
    type Output = bool;

    fn index(&self, pos: Coord2) -> &Self::Output {
        &self.mask[pos.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_accepts_classic_boards() {
        for (w, h, m) in [(9, 9, 10), (16, 16, 40), (30, 16, 99), (100, 100, 2000)] {
            assert!(GameConfig::new(w, h, m).is_ok(), "rejected {w}x{h}/{m}");
        }
    }

    #[test]
    fn config_rejects_bad_dimensions() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(ConfigError::DimensionOutOfRange));
        assert_eq!(GameConfig::new(5, 0, 1), Err(ConfigError::DimensionOutOfRange));
        assert_eq!(
            GameConfig::new(101, 5, 1),
            Err(ConfigError::DimensionOutOfRange)
        );
    }

    #[test]
    fn config_rejects_missing_or_excess_mines() {
        assert_eq!(GameConfig::new(5, 5, 0), Err(ConfigError::NoMines));
        // half the board or more
        assert_eq!(GameConfig::new(5, 4, 10), Err(ConfigError::TooManyMines));
        // would crowd out the safe zone: 5*3 - 3*3 = 6
        assert_eq!(GameConfig::new(5, 3, 7), Err(ConfigError::TooManyMines));
        assert!(GameConfig::new(5, 3, 6).is_ok());
        // a 3x3 board leaves no room at all next to the safe zone
        assert_eq!(GameConfig::new(3, 3, 1), Err(ConfigError::TooManyMines));
    }

    #[test]
    fn mine_grid_counts_and_bounds() {
        let grid = MineGrid::from_mine_coords((4, 5), &[(0, 0), (3, 4)]).unwrap();
        assert_eq!(grid.size(), (4, 5));
        assert_eq!(grid.mine_count(), 2);
        assert_eq!(grid.safe_cell_count(), 18);
        assert!(grid.contains_mine((0, 0)));
        assert!(!grid.contains_mine((1, 1)));
        assert_eq!(grid.adjacent_mine_count((1, 1)), 1);
        assert_eq!(
            MineGrid::from_mine_coords((4, 5), &[(4, 0)]),
            Err(GameError::OutOfBounds)
        );
    }
}
