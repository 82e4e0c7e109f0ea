//! Logic core for a grid-based mine-clearing puzzle game.
//!
//! Owns board state, deferred first-click-safe mine placement, adjacency
//! counting, flood-fill reveal propagation, and win/loss determination. The
//! presentation layer is an external collaborator: it pushes discrete inputs
//! ([`GameSession::on_reveal`], [`GameSession::on_flag`],
//! [`GameSession::new_game`]) and pulls a read-only [`Snapshot`] to render.

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod grid;
mod session;
mod types;

pub const MIN_DIMENSION: Coord = 9;
pub const MAX_DIMENSION: Coord = 32;

/// Validated board parameters: dimensions in `[MIN_DIMENSION, MAX_DIMENSION]`
/// and strictly fewer mines than cells. Constructing one through
/// [`GameConfig::new`] is the only precondition check the crate needs; every
/// gameplay operation afterwards is total.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let dimension_range = MIN_DIMENSION..=MAX_DIMENSION;
        if !dimension_range.contains(&width) || !dimension_range.contains(&height) {
            return Err(GameError::InvalidDimensions);
        }
        if mines >= mult(width, height) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn beginner() -> Self {
        Self {
            width: 9,
            height: 9,
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            width: 16,
            height: 16,
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            width: 30,
            height: 16,
            mines: 99,
        }
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_full_dimension_range() {
        assert!(GameConfig::new(9, 9, 10).is_ok());
        assert!(GameConfig::new(32, 32, 200).is_ok());
        assert!(GameConfig::new(9, 32, 0).is_ok());
    }

    #[test]
    fn rejects_out_of_range_dimensions() {
        assert_eq!(
            GameConfig::new(8, 9, 10),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            GameConfig::new(9, 33, 10),
            Err(GameError::InvalidDimensions)
        );
    }

    #[test]
    fn rejects_mine_counts_that_fill_the_board() {
        assert_eq!(GameConfig::new(9, 9, 81), Err(GameError::TooManyMines));
        assert_eq!(GameConfig::new(9, 9, 500), Err(GameError::TooManyMines));
        assert!(GameConfig::new(9, 9, 80).is_ok());
    }

    #[test]
    fn presets_pass_their_own_validation() {
        for preset in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            let rebuilt = GameConfig::new(preset.width(), preset.height(), preset.mines());
            assert_eq!(rebuilt, Ok(preset));
        }
    }
}
