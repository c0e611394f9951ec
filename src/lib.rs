//! Q Snake - A Snake game with a tabular Q-learning agent
//!
//! This library provides:
//! - Core game logic (game module)
//! - Tabular Q-learning: state encoding, SQLite value store, agent (rl module)
//! - TUI rendering (render module)
//! - Keyboard input handling (input module)
//! - Session and training statistics (metrics module)
//! - Execution modes: human play, headless training, watching the agent (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;
