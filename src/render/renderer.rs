use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState, Position};
use crate::metrics::GameMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Frame for interactive play: stats header, grid or game-over panel,
    /// controls footer.
    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // stats bar
                Constraint::Min(0),    // board
                Constraint::Length(3), // key hints
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = self.center_game_area(chunks[1]);

        if state.game_over {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Frame for watching the agent: episode stats on top, live grid in
    /// the middle, playback controls below. Between episodes the grid
    /// simply resets, there is no game-over screen.
    pub fn render_watch(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        speed_label: &str,
        paused: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let stats = self.render_watch_stats(chunks[0], state, metrics, speed_label, paused);
        frame.render_widget(stats, chunks[0]);

        let game_area = self.center_game_area(chunks[1]);
        let grid = self.render_grid(game_area, state);
        frame.render_widget(grid, game_area);

        let controls = self.render_watch_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Center the game grid horizontally
    fn center_game_area(&self, area: Rect) -> Rect {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1]
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid.height() {
            let mut spans = Vec::new();

            for x in 0..state.grid.width() {
                let pos = Position::new(x as i32, y as i32);
                spans.push(cell_span(state.grid.get(pos)));
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut spans = Vec::new();
        spans.extend(stat("Score", state.score.to_string(), true));
        spans.extend(stat("Games", metrics.games_played.to_string(), false));
        spans.extend(stat("High", metrics.high_score.to_string(), false));
        spans.extend(stat("Time", metrics.format_time(), false));
        spans.pop(); // trailing separator

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_watch_stats(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
        speed_label: &str,
        paused: bool,
    ) -> Paragraph<'_> {
        let mut spans = Vec::new();
        spans.extend(stat("Episode", (metrics.games_played + 1).to_string(), false));
        spans.extend(stat("Score", state.score.to_string(), true));
        spans.extend(stat("Highest", metrics.high_score.to_string(), false));
        spans.extend(stat("Speed", speed_label.to_string(), false));
        if paused {
            spans.push(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.pop(); // trailing separator
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" restarts, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" quits", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("A/D", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_watch_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" to change speed | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Label and value in the stats-bar style, followed by a separator gap.
/// Callers pop the gap after the last entry.
fn stat(label: &str, value: String, bold: bool) -> Vec<Span<'static>> {
    let mut value_style = Style::default().fg(Color::White);
    if bold {
        value_style = value_style.add_modifier(Modifier::BOLD);
    }
    vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Yellow)),
        Span::styled(value, value_style),
        Span::raw("    "),
    ]
}

/// One grid cell as a two-column span, colored by kind.
fn cell_span(cell: Cell) -> Span<'static> {
    match cell {
        Cell::Wall => Span::styled("██", Style::default().fg(Color::Red)),
        Cell::Body => Span::styled("██", Style::default().fg(Color::Blue)),
        Cell::Head => Span::styled("██", Style::default().fg(Color::White)),
        Cell::Food => Span::styled(
            "● ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Empty => Span::raw("  "),
    }
}
