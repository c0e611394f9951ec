//! Training mode for the Q-learning agent
//!
//! Runs headless episodes as fast as they will go, updating the SQLite
//! value table after every tick. Training accumulates: every run opens
//! the same database and keeps refining whatever is already there, so
//! the useful way to train is many short sessions or one long one
//! stopped with Ctrl+C.
//!
//! # Example
//!
//! ```rust,ignore
//! use q_snake::modes::{TrainMode, TrainConfig};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(5000, PathBuf::from("rl.db"));
//! let mut train_mode = TrainMode::new(config)?;
//! train_mode.run().await?;
//! ```

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::game::{GameConfig, GameEngine};
use crate::metrics::{TrainingStats, format_clock};
use crate::rl::{AgentConfig, QAgent, SqliteStore};

/// Options for a training run
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Number of episodes to train; 0 means run until interrupted
    pub episodes: usize,

    /// Log training progress every N episodes; 0 silences progress lines
    pub log_frequency: usize,

    /// Path of the SQLite file holding the value table
    pub db_path: PathBuf,

    /// Game configuration (grid size)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub agent_config: AgentConfig,

    /// Fixed RNG seed for food placement, for reproducible runs
    pub seed: Option<u64>,
}

impl TrainConfig {
    /// Training options with everything but episode count and database
    /// path defaulted.
    ///
    /// ```rust
    /// use q_snake::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new(5000, PathBuf::from("rl.db"));
    /// assert_eq!(config.log_frequency, 100);
    /// ```
    pub fn new(episodes: usize, db_path: PathBuf) -> Self {
        Self {
            episodes,
            log_frequency: 100,
            db_path,
            game_config: GameConfig::default(),
            agent_config: AgentConfig::default(),
            seed: None,
        }
    }
}

/// Training mode for the Q-learning agent
///
/// Runs the episode loop, folding every tick's reward back into the
/// persistent value table and logging progress periodically.
pub struct TrainMode {
    /// Agent being trained, writing through to SQLite
    agent: QAgent<SqliteStore>,

    /// Game engine shared by all episodes
    engine: GameEngine,

    /// Rolling numbers behind the progress lines
    stats: TrainingStats,

    /// Options this run was started with
    config: TrainConfig,
}

impl TrainMode {
    pub fn new(config: TrainConfig) -> Result<Self> {
        let store = SqliteStore::open(&config.db_path)?;

        let mut engine = GameEngine::new(config.game_config.clone())
            .context("invalid game configuration")?;
        if let Some(seed) = config.seed {
            engine = engine.with_seed(seed);
        }

        let agent = QAgent::new(store, config.agent_config.clone());

        // 100-episode rolling window for progress lines
        let stats = TrainingStats::new(100);

        Ok(Self {
            agent,
            engine,
            stats,
            config,
        })
    }

    /// Train for the configured number of episodes, or forever when the
    /// count is 0. Ctrl+C stops at the next tick boundary, after the
    /// in-flight value update has been written.
    pub async fn run(&mut self) -> Result<()> {
        let stop = Arc::new(AtomicBool::new(false));
        {
            let stop = Arc::clone(&stop);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    stop.store(true, Ordering::Relaxed);
                }
            });
        }

        self.print_header();
        let started = Instant::now();

        let mut episode = 0;
        let interrupted = loop {
            match self.run_episode(&stop)? {
                Some((reward, ticks, score)) => {
                    episode += 1;
                    self.stats.record_episode(reward, ticks, score);

                    if self.config.log_frequency > 0 && episode % self.config.log_frequency == 0 {
                        self.print_progress(episode);
                    }

                    if self.config.episodes != 0 && episode >= self.config.episodes {
                        break false;
                    }
                }
                None => break true,
            }
        };

        if interrupted {
            println!("\nTraining interrupted.");
        } else {
            println!("\nTraining complete.");
        }
        println!("Q-values saved to: {:?}", self.config.db_path);
        println!("States learned: {}", self.agent.store().len()?);
        println!("Elapsed: {}", format_clock(started.elapsed()));
        println!("\nFinal statistics:");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Play one episode to its end.
    ///
    /// Returns the accumulated reward, tick count, and final score, or
    /// `None` when the stop flag interrupted the episode.
    fn run_episode(&mut self, stop: &AtomicBool) -> Result<Option<(f64, usize, u32)>> {
        let mut state = self.engine.reset();
        let mut episode_reward = 0.0;
        let mut episode_ticks = 0;

        while !state.game_over {
            if stop.load(Ordering::Relaxed) {
                return Ok(None);
            }

            let outcome = self.agent.tick(&mut self.engine, &mut state)?;
            episode_reward += outcome.reward;
            episode_ticks += 1;
        }

        Ok(Some((episode_reward, episode_ticks, state.score)))
    }

    /// Banner printed once before the first episode
    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Q-learning Training - Snake");
        println!("{}", "=".repeat(70));
        if self.config.episodes == 0 {
            println!("Episodes: until interrupted (Ctrl+C)");
        } else {
            println!("Episodes: {}", self.config.episodes);
        }
        println!(
            "Grid: {}x{}",
            self.config.game_config.width, self.config.game_config.height
        );
        println!("Hyperparameters:");
        println!("  Alpha: {}", self.config.agent_config.alpha);
        println!("  Gamma: {}", self.config.agent_config.gamma);
        println!(
            "  Stall limit: {} ticks",
            self.config.agent_config.stall_limit
        );
        println!("Database: {:?}", self.config.db_path);
        if self.config.log_frequency > 0 {
            println!("Progress line every {} episodes", self.config.log_frequency);
        }
        println!("{}", "=".repeat(70));
        println!();
    }

    /// One progress line per `log_frequency` episodes
    fn print_progress(&self, episode: usize) {
        if self.config.episodes == 0 {
            println!("[Episode {}] {}", episode, self.stats.format_summary());
        } else {
            println!(
                "[Episode {}/{}] {}",
                episode,
                self.config.episodes,
                self.stats.format_summary()
            );
        }
    }
}
