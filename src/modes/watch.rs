//! Watch mode for observing the learning agent
//!
//! Runs the Q-learning agent against the live value table and draws
//! the game as it plays. Learning does not stop while watching: every
//! tick still writes its update back to the database, so a long watch
//! session is slow-motion training. Episodes chain automatically.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures::StreamExt;
use std::{path::Path, time::Duration};
use tokio::time::{Interval, interval};

use super::{ModeTerminal, restore_terminal, setup_terminal};
use crate::game::{GameConfig, GameEngine, GameState};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::rl::{AgentConfig, QAgent, SqliteStore};

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    /// Slow: 2 Hz (500ms per tick)
    Slow,
    /// Normal: 8 Hz (125ms per tick) - same as human mode
    Normal,
    /// Fast: 20 Hz (50ms per tick)
    Fast,
    /// Very Fast: 60 Hz (16ms per tick)
    VeryFast,
}

impl WatchSpeed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Watch mode for observing the learning agent
pub struct WatchMode {
    /// Agent playing and learning against the SQLite table
    agent: QAgent<SqliteStore>,

    /// Game engine shared by all episodes
    engine: GameEngine,

    /// Live game state
    state: GameState,

    /// Episode counter, high score, session clock
    metrics: GameMetrics,

    /// Renderer for TUI display
    renderer: Renderer,

    /// Whether to quit the watch loop
    should_quit: bool,

    /// Whether playback is paused
    paused: bool,

    /// Current playback speed
    speed: WatchSpeed,
}

impl WatchMode {
    /// Create a new watch mode backed by the value table at `db_path`.
    ///
    /// The table is opened as is: an empty or missing file simply starts
    /// an untrained agent that learns while being watched.
    pub fn new(
        db_path: &Path,
        game_config: GameConfig,
        agent_config: AgentConfig,
        seed: Option<u64>,
    ) -> Result<Self> {
        let store = SqliteStore::open(db_path)
            .with_context(|| format!("Failed to open value table at {:?}", db_path))?;
        let states_learned = store.len()?;

        // Print table info before the alternate screen takes over
        println!("{}", "=".repeat(60));
        println!("Loaded Value Table");
        println!("{}", "=".repeat(60));
        println!("Database: {:?}", db_path);
        println!("States learned: {}", states_learned);
        println!(
            "Grid size: {}x{}",
            game_config.width, game_config.height
        );
        println!("{}", "=".repeat(60));
        println!();
        println!("Starting watch mode...");
        println!();

        let mut engine = GameEngine::new(game_config).context("invalid game configuration")?;
        if let Some(seed) = seed {
            engine = engine.with_seed(seed);
        }
        let state = engine.reset();
        let agent = QAgent::new(store, agent_config);

        Ok(Self {
            agent,
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            should_quit: false,
            paused: false,
            speed: WatchSpeed::Normal,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.watch_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn watch_loop(&mut self, terminal: &mut ModeTerminal) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(Duration::from_millis(33));

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render_watch(
                            frame,
                            &self.state,
                            &self.metrics,
                            self.speed.as_str(),
                            self.paused,
                        );
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    /// One playback tick: let the agent act, or start the next episode
    /// if the previous one just ended. The final position stays on
    /// screen for one tick before the board resets.
    fn advance(&mut self) -> Result<()> {
        if self.state.game_over {
            self.state = self.engine.reset();
            return Ok(());
        }

        let outcome = self.agent.tick(&mut self.engine, &mut self.state)?;
        if outcome.game_over {
            self.metrics.on_game_over(self.state.score);
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        let Event::Key(key) = event else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            KeyCode::Char('1') => self.change_speed(WatchSpeed::Slow, tick_timer),
            KeyCode::Char('2') => self.change_speed(WatchSpeed::Normal, tick_timer),
            KeyCode::Char('3') => self.change_speed(WatchSpeed::Fast, tick_timer),
            KeyCode::Char('4') => self.change_speed(WatchSpeed::VeryFast, tick_timer),
            _ => {}
        }
    }

    /// Swap in a fresh interval so the new cadence applies immediately
    fn change_speed(&mut self, new_speed: WatchSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }
}
