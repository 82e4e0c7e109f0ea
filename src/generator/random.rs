use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{assign_adjacency, MineGenerator};
use crate::cell::CellKind;
use crate::error::{GameError, Result};
use crate::grid::Grid;
use crate::types::{mult, CellCount, Coord2};

/// Purely random placement that keeps the starting cell mine-free. The safe
/// zone is the single origin cell, not its neighborhood.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
    origin: Coord2,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, origin: Coord2) -> Self {
        Self { seed, origin }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn populate(self, grid: &mut Grid, mine_count: CellCount) -> Result<()> {
        let (width, height) = grid.size();
        let total_cells = mult(width, height);

        // At least the origin must stay free; rejection sampling below relies
        // on this to terminate.
        if mine_count >= total_cells {
            return Err(GameError::TooManyMines);
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;

        while placed < mine_count {
            let coords = (rng.random_range(0..width), rng.random_range(0..height));
            if coords == self.origin {
                continue;
            }

            let mut cell = grid.cell_at(coords);
            if cell.is_mine() {
                continue;
            }

            cell.kind = CellKind::Mine;
            grid.set_cell_at(coords, cell);
            placed += 1;
        }

        assign_adjacency(grid);
        log::debug!(
            "Placed {} mines on {}x{} grid, origin {:?} kept safe",
            placed,
            width,
            height,
            self.origin
        );
        Ok(())
    }
}
