use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use super::{ModeTerminal, restore_terminal, setup_terminal};
use crate::game::{GameConfig, GameEngine, GameState, TurnCommand};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-controlled play. Turns are buffered between ticks: the
/// most recent keypress wins, and a tick with no buffered turn keeps
/// the snake going straight.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_turn: Option<TurnCommand>,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let mut engine = GameEngine::new(config)?;
        if let Some(seed) = seed {
            engine = engine.with_seed(seed);
        }
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_turn: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;
        let result = self.game_loop(&mut terminal).await;
        restore_terminal(&mut terminal)?;
        result
    }

    async fn game_loop(&mut self, terminal: &mut ModeTerminal) -> Result<()> {
        let mut event_stream = EventStream::new();

        // 8 Hz game tick, 30 FPS render.
        let mut tick_timer = interval(Duration::from_millis(125));
        let mut render_timer = interval(Duration::from_millis(33));

        while !self.should_quit {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.state.game_over {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        // Repeat and release events would double-apply a turn.
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(command) => self.pending_turn = Some(command),
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let command = self.pending_turn.take().unwrap_or(TurnCommand::Straight);

        self.engine.step(&mut self.state, command);

        if self.state.game_over {
            self.metrics.on_game_over(self.state.score);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending_turn = None;
    }
}
