//! Key mapping from terminal events to game commands.

use crate::types::{Command, GamePhase};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a key press to a command.
///
/// `phase` is only consulted for Esc, which restarts a finished game and
/// toggles pause otherwise. Release events are ignored.
pub fn map_key_event(key: KeyEvent, phase: GamePhase) -> Option<Command> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::RotateClockwise),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('c' | 'C') => Some(Command::Hold),
        KeyCode::Char('p' | 'P') => Some(Command::Pause),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),
        KeyCode::Esc if phase == GamePhase::GameOver => Some(Command::Restart),
        KeyCode::Esc => Some(Command::Pause),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
