//! Reinforcement learning module for the Snake game
//!
//! Provides:
//! - Exact state encoding (food position + full body) into table keys
//! - SQLite-backed persistence of per-state action-value triplets
//! - A greedy tabular Q-learning agent with online TD(0) updates

pub mod agent;
pub mod config;
pub mod encoder;
pub mod store;

pub use agent::{QAgent, TickOutcome};
pub use config::AgentConfig;
pub use encoder::{encode_state, StateKey};
pub use store::{MemoryStore, QTriplet, SqliteStore, ValueStore};
