use anyhow::Result;
use clap::{Parser, ValueEnum};
use q_snake::game::GameConfig;
use q_snake::modes::{HumanMode, TrainConfig, TrainMode, WatchMode};
use q_snake::rl::AgentConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake game with a tabular Q-learning agent")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width (including border walls)
    #[arg(long, default_value = "10")]
    width: usize,

    /// Grid height (including border walls)
    #[arg(long, default_value = "10")]
    height: usize,

    /// SQLite database holding the learned Q-values
    #[arg(long, default_value = "rl.db")]
    db: PathBuf,

    /// Number of training episodes (0 = train until Ctrl+C)
    #[arg(long, default_value = "0")]
    episodes: usize,

    /// Print training progress every N episodes (0 = silent)
    #[arg(long, default_value = "100")]
    log_every: usize,

    /// Seed for food placement (omit for entropy)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Steer the snake yourself
    Human,
    /// Train the agent headless against the database
    Train,
    /// Watch the agent play (and keep learning)
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = GameConfig::new(cli.width, cli.height);

    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.seed)?;
            human_mode.run().await?;
        }
        Mode::Train => {
            let mut train_config = TrainConfig::new(cli.episodes, cli.db);
            train_config.log_frequency = cli.log_every;
            train_config.game_config = config;
            train_config.seed = cli.seed;
            let mut train_mode = TrainMode::new(train_config)?;
            train_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode =
                WatchMode::new(&cli.db, config, AgentConfig::default(), cli.seed)?;
            watch_mode.run().await?;
        }
    }

    Ok(())
}
