use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::types::{Coord, Coord2, NeighborIter, ToNdIndex};

/// Owned 2D board of cells. Pure data container: no game rules live here,
/// only bounds-checked storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Builds an all-Empty grid of the given dimensions.
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            cells: Array2::default((width, height).to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let (width, height) = self.size();
        coords.0 < width && coords.1 < height
    }

    /// Defensive read: out-of-bounds queries resolve to an `Invalid`-kind cell
    /// instead of an error, so neighbor probes at the board edge are harmless.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        if self.in_bounds(coords) {
            self.cells[coords.to_nd_index()]
        } else {
            Cell::INVALID
        }
    }

    /// Out-of-bounds writes are dropped; callers must not rely on them.
    pub fn set_cell_at(&mut self, coords: Coord2, cell: Cell) {
        if self.in_bounds(coords) {
            self.cells[coords.to_nd_index()] = cell;
        }
    }

    /// Row-major iteration over `(coords, cell)`, deterministic so generation
    /// and win scans are reproducible for a fixed seed.
    pub fn cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let (width, height) = self.size();
        (0..width).flat_map(move |x| {
            (0..height).map(move |y| ((x, y), self.cells[(x, y).to_nd_index()]))
        })
    }

    /// The up-to-8 surrounding in-bounds positions.
    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::adjacent(coords, self.size())
    }

    /// The up-to-4 orthogonal in-bounds positions.
    pub fn iter_orthogonal_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::orthogonal(coords, self.size())
    }
}
