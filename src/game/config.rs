use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest playable grid in either dimension
pub const MIN_GRID_SIZE: usize = 10;

/// Fatal configuration problems caught before any game is constructed
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid too small: {width}x{height} (both sides must be at least {MIN_GRID_SIZE})")]
    GridTooSmall { width: usize, height: usize },
}

/// Grid dimensions for a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid in cells, walls included
    pub width: usize,
    /// Height of the game grid in cells, walls included
    pub height: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Reject grids below the 10x10 minimum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIZE || self.height < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
