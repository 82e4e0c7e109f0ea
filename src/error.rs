use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions out of range")]
    InvalidDimensions,
    #[error("Too many mines")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
