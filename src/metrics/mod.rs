pub mod game_metrics;
pub mod training_stats;

pub use game_metrics::{format_clock, GameMetrics};
pub use training_stats::TrainingStats;
