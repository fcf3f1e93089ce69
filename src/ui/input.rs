use crate::{event::events::Event, ui::state::ViewState};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Global bindings, consulted only when the active view ignores a key.
pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Event::Quit),
            (KeyCode::Char('q'), _) => Some(Event::Quit),
            (KeyCode::Char(' '), _) => Some(Event::TogglePlayback),
            (KeyCode::Esc, _) => Some(Event::SetView(ViewState::Home)),
            (KeyCode::Char(c @ '1'..='4'), _) => {
                ViewState::from_index(c as usize - '1' as usize).map(Event::SetView)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_jump_to_views() {
        assert!(matches!(
            InputHandler::handle_key(key(KeyCode::Char('1'))),
            Some(Event::SetView(ViewState::Home))
        ));
        assert!(matches!(
            InputHandler::handle_key(key(KeyCode::Char('4'))),
            Some(Event::SetView(ViewState::AiDj))
        ));
        assert!(InputHandler::handle_key(key(KeyCode::Char('5'))).is_none());
    }

    #[test]
    fn control_c_quits() {
        let evt = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(InputHandler::handle_key(evt), Some(Event::Quit)));
    }
}
