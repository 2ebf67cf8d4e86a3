/// Keyboard input for the terminal front-end
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::collections::HashSet;
use std::time::Duration;
use wire3d_core::{InputEvents, InputSource, MovementKey, Result};

/// Movement key state built from crossterm key events.
///
/// With keyboard enhancement the terminal reports releases, so keys stay held
/// until released. Without it only presses and repeats arrive, and a key counts
/// as held for the frame its event was read in.
pub struct TerminalInput {
    held: HashSet<MovementKey>,
    reports_release: bool,
}

impl TerminalInput {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: HashSet::new(),
            reports_release,
        }
    }

    /// Apply one key event; returns true when it asks to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = key;

        if kind != KeyEventKind::Release {
            match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
                _ => {}
            }
        }

        if let Some(movement) = movement_key(code) {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    self.held.insert(movement);
                }
                KeyEventKind::Release => {
                    self.held.remove(&movement);
                }
            }
        }
        false
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Result<InputEvents> {
        if !self.reports_release {
            self.held.clear();
        }

        let mut events = InputEvents::default();
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if self.handle_key(key) {
                        events.quit = true;
                    }
                }
                Event::Resize(cols, rows) => {
                    debug!("terminal resized to {cols}x{rows}; keeping the initial grid");
                }
                _ => {}
            }
        }
        Ok(events)
    }

    fn is_key_pressed(&self, key: MovementKey) -> bool {
        self.held.contains(&key)
    }
}

fn movement_key(code: KeyCode) -> Option<MovementKey> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => Some(MovementKey::Forward),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(MovementKey::Back),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(MovementKey::Left),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(MovementKey::Right),
        KeyCode::Up => Some(MovementKey::Up),
        KeyCode::Down => Some(MovementKey::Down),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_and_release() {
        let mut input = TerminalInput::new(true);
        assert!(!input.handle_key(key(KeyCode::Char('w'), KeyEventKind::Press)));
        assert!(!input.handle_key(key(KeyCode::Up, KeyEventKind::Press)));
        assert!(input.is_key_pressed(MovementKey::Forward));
        assert!(input.is_key_pressed(MovementKey::Up));
        assert!(!input.is_key_pressed(MovementKey::Back));

        input.handle_key(key(KeyCode::Char('w'), KeyEventKind::Release));
        assert!(!input.is_key_pressed(MovementKey::Forward));
        assert!(input.is_key_pressed(MovementKey::Up));
    }

    #[test]
    fn test_quit_keys() {
        let mut input = TerminalInput::new(false);
        assert!(input.handle_key(key(KeyCode::Char('q'), KeyEventKind::Press)));
        assert!(input.handle_key(key(KeyCode::Esc, KeyEventKind::Press)));
        assert!(!input.handle_key(key(KeyCode::Char('c'), KeyEventKind::Press)));
        assert!(input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!input.handle_key(key(KeyCode::Esc, KeyEventKind::Release)));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(movement_key(KeyCode::Char('a')), Some(MovementKey::Left));
        assert_eq!(movement_key(KeyCode::Char('D')), Some(MovementKey::Right));
        assert_eq!(movement_key(KeyCode::Down), Some(MovementKey::Down));
        assert_eq!(movement_key(KeyCode::Left), None);
    }
}
