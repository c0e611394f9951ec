use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::TurnCommand;

/// Steering is player-relative: left and right turn the snake 90
/// degrees from its current heading, there is no absolute-direction
/// control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Turn(TurnCommand),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Turn(TurnCommand::TurnLeft)
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Turn(TurnCommand::TurnRight)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
