use std::collections::VecDeque;

use crate::cell::{Cell, CellKind};
use crate::grid::Grid;
use crate::types::Coord2;

/// Outcome of a reveal input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed the board.
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}

/// Outcome of a flag input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Toggled => true,
        }
    }
}

/// Reveals the cell at `coords` on an already-generated board.
///
/// Redundant or out-of-bounds targets are silent no-ops: revealing an already
/// revealed or flagged cell changes nothing, and boundary misses from the
/// caller's coordinate mapping resolve to the `Invalid` sentinel.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> RevealOutcome {
    let cell = grid.cell_at(coords);
    if !cell.is_openable() {
        return RevealOutcome::NoChange;
    }

    match cell.kind {
        CellKind::Mine => {
            explode(grid, coords);
            RevealOutcome::Exploded
        }
        CellKind::Empty | CellKind::Number => {
            flood_fill(grid, coords);
            if check_win_condition(grid) {
                RevealOutcome::Won
            } else {
                RevealOutcome::Revealed
            }
        }
        // is_openable filtered this out already
        CellKind::Invalid => RevealOutcome::NoChange,
    }
}

/// Toggles the flag at `coords`; no-op on revealed or out-of-bounds cells.
pub fn flag(grid: &mut Grid, coords: Coord2) -> FlagOutcome {
    let mut cell = grid.cell_at(coords);
    if !cell.is_valid() || cell.revealed {
        return FlagOutcome::NoChange;
    }

    cell.flagged = !cell.flagged;
    grid.set_cell_at(coords, cell);
    FlagOutcome::Toggled
}

/// Marks the triggered mine revealed+exploded, then sweeps the board: wrong
/// flags are exposed as `failed` and every unflagged mine is shown.
fn explode(grid: &mut Grid, coords: Coord2) {
    let mut triggered = grid.cell_at(coords);
    triggered.revealed = true;
    triggered.exploded = true;
    grid.set_cell_at(coords, triggered);
    log::debug!("Mine triggered at {:?}", coords);

    let (width, height) = grid.size();
    for x in 0..width {
        for y in 0..height {
            let mut cell = grid.cell_at((x, y));
            if !cell.is_mine() && cell.flagged {
                cell.flagged = false;
                cell.failed = true;
                grid.set_cell_at((x, y), cell);
            } else if cell.is_mine() && !cell.flagged {
                cell.revealed = true;
                grid.set_cell_at((x, y), cell);
            }
        }
    }
}

/// Work-list flood fill, 4-directional. Expansion only continues through
/// zero-adjacency cells; numbered cells are revealed but form the region
/// border. Flagged cells are left untouched so a cell is never both revealed
/// and flagged.
fn flood_fill(grid: &mut Grid, coords: Coord2) {
    let mut to_visit = VecDeque::from([coords]);

    while let Some(visit_coords) = to_visit.pop_front() {
        let mut cell = grid.cell_at(visit_coords);
        if cell.revealed || cell.flagged {
            continue;
        }
        if matches!(cell.kind, CellKind::Mine | CellKind::Invalid) {
            continue;
        }

        cell.revealed = true;
        grid.set_cell_at(visit_coords, cell);
        log::trace!("Flood revealed {:?} ({:?})", visit_coords, cell.kind);

        // marking before expanding keeps every cell in the queue at most a
        // bounded number of times, so this terminates on any finite grid
        if cell.kind == CellKind::Empty {
            to_visit.extend(grid.iter_orthogonal_neighbors(visit_coords));
        }
    }
}

/// True when every non-mine cell is revealed. Winning flags all mines as a
/// cosmetic end state; a non-winning board is left untouched.
pub fn check_win_condition(grid: &mut Grid) -> bool {
    if grid
        .cells()
        .any(|(_, cell)| !cell.is_mine() && !cell.revealed)
    {
        return false;
    }

    let (width, height) = grid.size();
    for x in 0..width {
        for y in 0..height {
            let mut cell = grid.cell_at((x, y));
            if cell.is_mine() && !cell.flagged {
                cell.flagged = true;
                grid.set_cell_at((x, y), cell);
            }
        }
    }
    true
}
