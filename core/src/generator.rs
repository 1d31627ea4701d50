use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Strategy seam for producing a mine placement from a config.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineGrid;
}

/// Uniform random placement that keeps the 3x3 zone around the first
/// move free of mines. Seeded, so a round is reproducible.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    safe_center: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, safe_center: Coord2) -> Self {
        Self { seed, safe_center }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineGrid {
        use rand::prelude::*;

        let mut mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // pre-mark the safe zone so the sampling below skips it, as if
        // those cells were already mined
        let safe_zone: Vec<Coord2> = mask.iter_neighbors(self.safe_center).collect();
        mask[self.safe_center.to_nd_index()] = true;
        for &pos in &safe_zone {
            mask[pos.to_nd_index()] = true;
        }

        // config validation guarantees enough free cells for the mines
        let mut free_cells = config.total_cells() - 1 - safe_zone.len() as CellCount;
        let mut placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mask.as_slice_mut().expect("standard layout");
            while placed < config.mines && free_cells > 0 {
                // skip-count to the n-th still-free cell
                let mut target: CellCount = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if target == 0 {
                        *cell = true;
                        placed += 1;
                        free_cells -= 1;
                        break;
                    }
                    target -= 1;
                }
            }
        }

        mask[self.safe_center.to_nd_index()] = false;
        for &pos in &safe_zone {
            mask[pos.to_nd_index()] = false;
        }

        let grid = MineGrid::from_mask(mask);
        if grid.mine_count() != config.mines {
            log::warn!(
                "generated mine count mismatch, placed {} of {}",
                grid.mine_count(),
                config.mines
            );
        }
        grid
    }
}
