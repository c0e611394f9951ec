//! Rolling statistics for training runs
//!
//! Headless training prints one summary line every few hundred episodes;
//! this module aggregates the numbers behind that line.

use std::collections::VecDeque;

/// A fixed-capacity window of recent values.
///
/// Pushing past capacity evicts the oldest value, so means computed
/// over the window always reflect recent episodes.
#[derive(Debug, Clone)]
struct Window<T> {
    values: VecDeque<T>,
    cap: usize,
}

impl<T: Copy> Window<T> {
    fn new(cap: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(cap),
            cap,
        }
    }

    fn push(&mut self, value: T) {
        if self.values.len() >= self.cap {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Mean of the window contents under `as_f64`, 0.0 when empty.
    fn mean_by(&self, as_f64: impl Fn(T) -> f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.values.iter().copied().map(as_f64).sum::<f64>() / self.values.len() as f64
    }
}

/// Aggregate statistics over a training run.
///
/// Per-episode numbers (reward, length, score) are windowed so the
/// summary tracks recent behavior rather than the lifetime average;
/// episode and tick totals and the high score span the whole run.
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(-1.3, 42, 2);
///
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    rewards: Window<f64>,
    lengths: Window<usize>,
    scores: Window<u32>,
    total_episodes: usize,
    total_ticks: usize,
    high_score: u32,
}

impl TrainingStats {
    /// Create a tracker that averages over the last `window_size` episodes.
    pub fn new(window_size: usize) -> Self {
        Self {
            rewards: Window::new(window_size),
            lengths: Window::new(window_size),
            scores: Window::new(window_size),
            total_episodes: 0,
            total_ticks: 0,
            high_score: 0,
        }
    }

    /// Fold one finished episode into the statistics.
    ///
    /// `reward` is the summed per-tick reward, `length` the tick count,
    /// and `score` the food eaten before the episode ended.
    pub fn record_episode(&mut self, reward: f64, length: usize, score: u32) {
        self.rewards.push(reward);
        self.lengths.push(length);
        self.scores.push(score);
        self.total_episodes += 1;
        self.total_ticks += length;
        self.high_score = self.high_score.max(score);
    }

    /// Mean reward over the window, 0.0 before any episode.
    pub fn mean_episode_reward(&self) -> f64 {
        self.rewards.mean_by(|r| r)
    }

    /// Mean episode length in ticks over the window.
    pub fn mean_episode_length(&self) -> f64 {
        self.lengths.mean_by(|l| l as f64)
    }

    /// Mean score over the window.
    pub fn mean_episode_score(&self) -> f64 {
        self.scores.mean_by(f64::from)
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_ticks(&self) -> usize {
        self.total_ticks
    }

    /// Best score seen anywhere in the run, including episodes the
    /// window has already evicted.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn window_size(&self) -> usize {
        self.rewards.cap
    }

    /// One-line progress summary for the training log.
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Ticks: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Highest: {}",
            self.total_episodes,
            self.total_ticks,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.high_score,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tracker_reads_zero() {
        let stats = TrainingStats::new(100);

        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.total_ticks(), 0);
        assert_eq!(stats.high_score(), 0);
        assert_eq!(stats.mean_episode_reward(), 0.0);
        assert_eq!(stats.mean_episode_length(), 0.0);
        assert_eq!(stats.mean_episode_score(), 0.0);
    }

    #[test]
    fn test_single_episode_sets_every_stat() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(-0.4, 17, 2);

        assert_eq!(stats.total_episodes(), 1);
        assert_eq!(stats.total_ticks(), 17);
        assert_eq!(stats.high_score(), 2);
        assert!((stats.mean_episode_reward() + 0.4).abs() < 1e-9);
        assert!((stats.mean_episode_length() - 17.0).abs() < 1e-9);
        assert!((stats.mean_episode_score() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut stats = TrainingStats::new(2);

        stats.record_episode(4.0, 10, 1);
        stats.record_episode(8.0, 30, 2);
        assert!((stats.mean_episode_reward() - 6.0).abs() < 1e-9);

        // Third episode pushes the 4.0 out of the window.
        stats.record_episode(0.0, 20, 0);
        assert!((stats.mean_episode_reward() - 4.0).abs() < 1e-9);
        assert!((stats.mean_episode_length() - 25.0).abs() < 1e-9);

        // Totals keep counting past the window.
        assert_eq!(stats.total_episodes(), 3);
        assert_eq!(stats.total_ticks(), 60);
    }

    #[test]
    fn test_high_score_outlives_the_window() {
        let mut stats = TrainingStats::new(2);

        stats.record_episode(5.0, 60, 7);
        stats.record_episode(0.0, 10, 0);
        stats.record_episode(0.0, 10, 0);

        // The 7-score episode left the window but stays the high score.
        assert_eq!(stats.high_score(), 7);
        assert!((stats.mean_episode_score() - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_line_fields() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(-2.35, 41, 2);

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Ticks: 41"));
        assert!(summary.contains("Reward: -2.35"));
        assert!(summary.contains("Score: 2.00"));
        assert!(summary.contains("Len: 41.0"));
        assert!(summary.contains("Highest: 2"));
    }
}
