//! Mapping from terminal events to board actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::cursor::Direction;

/// What a terminal event asks the game to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Left click at a terminal cell.
    Click { column: u16, row: u16 },
    Cursor(Direction),
    /// Click the cell under the keyboard cursor.
    Activate,
    NewGame,
    Quit,
}

pub fn map_event(event: &Event) -> Option<InputAction> {
    match event {
        Event::Key(key) => map_key_event(*key),
        Event::Mouse(mouse) => map_mouse_event(*mouse),
        _ => None,
    }
}

/// Map keyboard input to board actions. Release events are ignored.
pub fn map_key_event(key: KeyEvent) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputAction::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(InputAction::Cursor(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(InputAction::Cursor(Direction::Right))
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => {
            Some(InputAction::Cursor(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(InputAction::Cursor(Direction::Down))
        }
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputAction::Activate),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(InputAction::NewGame),
        _ => None,
    }
}

fn map_mouse_event(mouse: MouseEvent) -> Option<InputAction> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputAction::Click {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn left_press_is_a_click() {
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left), 7, 3)),
            Some(InputAction::Click { column: 7, row: 3 })
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Up(MouseButton::Left), 7, 3)),
            None
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Right), 7, 3)),
            None
        );
        assert_eq!(map_event(&mouse(MouseEventKind::Moved, 7, 3)), None);
    }

    #[test]
    fn cursor_keys() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Left)),
            Some(InputAction::Cursor(Direction::Left))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('j'))),
            Some(InputAction::Cursor(Direction::Down))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(InputAction::Activate)
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('n'))),
            Some(InputAction::NewGame)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut key = KeyEvent::from(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(key), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(InputAction::Quit)
        );
    }
}
