use std::time::{Duration, Instant};

/// Scoreboard shared by the interactive modes: wall-clock time, games
/// finished, and the best score seen so far.
pub struct GameMetrics {
    started: Instant,
    pub elapsed: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            elapsed: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Refresh the elapsed clock. Called once per rendered frame.
    pub fn update(&mut self) {
        self.elapsed = self.started.elapsed();
    }

    /// Restart the clock for a fresh game.
    pub fn on_game_start(&mut self) {
        self.started = Instant::now();
        self.elapsed = Duration::ZERO;
    }

    /// Record a finished game.
    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        format_clock(self.elapsed)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a duration as MM:SS, minutes unbounded.
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
