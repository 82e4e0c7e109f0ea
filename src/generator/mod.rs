use crate::cell::CellKind;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::CellCount;

pub use random::*;

mod random;

/// Fills an all-Empty grid with mines and derives the adjacency numbers.
pub trait MineGenerator {
    fn populate(self, grid: &mut Grid, mine_count: CellCount) -> Result<()>;
}

/// Derives kind/number for every non-mine cell from its up-to-8 neighbors.
/// Numbers are computed, never set independently: a cell stays `Empty` when no
/// mine is adjacent and becomes `Number` otherwise.
pub(crate) fn assign_adjacency(grid: &mut Grid) {
    let positions: Vec<_> = grid.cells().map(|(coords, _)| coords).collect();
    for coords in positions {
        let mut cell = grid.cell_at(coords);
        if cell.is_mine() {
            continue;
        }

        let count = grid
            .iter_neighbors(coords)
            .filter(|&pos| grid.cell_at(pos).is_mine())
            .count() as u8;

        cell.adjacent_mines = count;
        cell.kind = if count > 0 {
            CellKind::Number
        } else {
            CellKind::Empty
        };
        grid.set_cell_at(coords, cell);
    }
}
