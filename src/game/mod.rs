//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be used programmatically for both human play and agent training.

pub mod action;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, TurnCommand};
pub use config::{ConfigError, GameConfig, MIN_GRID_SIZE};
pub use engine::{GameEngine, StepInfo};
pub use grid::{Cell, Grid};
pub use state::{CollisionType, GameState, Position, Snake};
