//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to an engine command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::MoveDown),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(Command::Rotate),

        KeyCode::Char(' ') => Some(Command::FastDrop),
        KeyCode::Enter | KeyCode::Char('n' | 'N') => Some(Command::Start),

        _ => None,
    }
}

/// Whether a key event of this kind should reach the engine.
///
/// Terminal auto-repeat is honoured for movement so holding an arrow keeps
/// the piece sliding; start and fast drop only fire on the initial press.
pub fn accepts_kind(kind: KeyEventKind, command: Command) -> bool {
    match kind {
        KeyEventKind::Press => true,
        KeyEventKind::Repeat => matches!(
            command,
            Command::MoveLeft | Command::MoveRight | Command::MoveDown | Command::Rotate
        ),
        KeyEventKind::Release => false,
    }
}

/// Map a full key event, filtering by event kind.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    handle_key_event(key).filter(|command| accepts_kind(key.kind, *command))
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
