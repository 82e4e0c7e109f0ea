use serde::{Deserialize, Serialize};

/// What a board position fundamentally is, independent of what the player has
/// done to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellKind {
    /// Sentinel for out-of-bounds queries, never stored in a grid.
    Invalid,
    Empty,
    Number,
    Mine,
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Full per-position state: the kind plus the player-driven flags.
///
/// Invariants upheld by the engine:
/// - never both `revealed` and `flagged`
/// - `exploded` implies `kind == Mine` and `revealed`
/// - `flagged` and `failed` are mutually exclusive
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Mines among the up-to-8 neighbors, meaningful only for `Number` cells.
    pub adjacent_mines: u8,
    pub revealed: bool,
    pub flagged: bool,
    pub exploded: bool,
    pub failed: bool,
}

impl Cell {
    /// Zero-value cell returned for out-of-bounds reads.
    pub const INVALID: Self = Self {
        kind: CellKind::Invalid,
        adjacent_mines: 0,
        revealed: false,
        flagged: false,
        exploded: false,
        failed: false,
    };

    pub const fn is_mine(self) -> bool {
        matches!(self.kind, CellKind::Mine)
    }

    pub const fn is_valid(self) -> bool {
        !matches!(self.kind, CellKind::Invalid)
    }

    /// Whether a reveal can still open this cell.
    pub const fn is_openable(self) -> bool {
        self.is_valid() && !self.revealed && !self.flagged
    }
}
