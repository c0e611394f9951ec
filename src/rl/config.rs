//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

/// Hyperparameters for the tabular Q-learning agent.
///
/// The defaults are the settings the persisted tables were trained
/// with; other values are legal but mix two learning regimes in the
/// same database.
///
/// # Example
///
/// ```rust
/// use q_snake::rl::AgentConfig;
///
/// let config = AgentConfig {
///     stall_limit: 25,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate (alpha) for the temporal-difference update.
    ///
    /// Default: 0.1
    pub alpha: f64,

    /// Discount factor (gamma) weighting future reward against immediate.
    ///
    /// Default: 0.9
    pub gamma: f64,

    /// Ticks without eating before every further tick is penalized.
    /// Discourages endless circling far away from the food.
    ///
    /// Default: 10
    pub stall_limit: u32,
}

impl AgentConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every hyperparameter against its legal range.
    pub fn validate(&self) -> Result<(), String> {
        if self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(format!("alpha must be in (0, 1], got {}", self.alpha));
        }

        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(format!("gamma must be in [0, 1], got {}", self.gamma));
        }

        if self.stall_limit == 0 {
            return Err("stall_limit must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            stall_limit: 10,
        }
    }
}
