use tracing::debug;

use crate::{chat::ChatSession, playback::PlaybackState};

/// Everything the listener can change. Owned by `App`; views only read it.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub navigator: Navigator,
    pub playback: PlaybackState,
    pub chat: ChatSession,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewState {
    #[default]
    Home,
    Search,
    Library,
    AiDj,
}

impl ViewState {
    pub const ALL: [ViewState; 4] = [
        ViewState::Home,
        ViewState::Search,
        ViewState::Library,
        ViewState::AiDj,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ViewState::Home => "Home",
            ViewState::Search => "Search",
            ViewState::Library => "Your Library",
            ViewState::AiDj => "AI DJ",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewState::Home => "󰋜",
            ViewState::Search => "",
            ViewState::Library => "󰌱",
            ViewState::AiDj => "󱙺",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: ViewState,
}

impl Navigator {
    pub fn current(&self) -> ViewState {
        self.current
    }

    pub fn set_view(&mut self, view: ViewState) {
        if self.current != view {
            debug!(from = ?self.current, to = ?view, "view_changed");
        }
        self.current = view;
    }

    pub fn next(&mut self) {
        let len = ViewState::ALL.len();
        self.set_view(ViewState::ALL[(self.current.index() + 1) % len]);
    }

    pub fn previous(&mut self) {
        let len = ViewState::ALL.len();
        self.set_view(ViewState::ALL[(self.current.index() + len - 1) % len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn set_view_is_idempotent() {
        let mut once = Navigator::default();
        once.set_view(ViewState::Library);
        once.set_view(ViewState::Home);

        let mut twice = once.clone();
        twice.set_view(ViewState::Home);
        assert_eq!(once, twice);
        assert_eq!(twice.current(), ViewState::Home);
    }

    #[test]
    fn next_and_previous_wrap() {
        let mut nav = Navigator::default();
        nav.previous();
        assert_eq!(nav.current(), ViewState::AiDj);
        nav.next();
        assert_eq!(nav.current(), ViewState::Home);
        nav.next();
        nav.next();
        assert_eq!(nav.current(), ViewState::Library);
    }

    #[test]
    fn indices_round_trip() {
        for view in ViewState::ALL {
            assert_eq!(ViewState::from_index(view.index()), Some(view));
        }
        assert_eq!(ViewState::from_index(4), None);
    }

    #[test]
    fn navigation_keeps_chat_and_playback() {
        let mut state = AppState::default();
        state
            .playback
            .play_playlist(&Catalog::mock().playlists[0]);
        state.chat.set_input("city pop");
        state.chat.submit();
        let playback = state.playback.clone();
        let transcript = state.chat.messages().to_vec();

        for view in ViewState::ALL {
            state.navigator.set_view(view);
        }
        assert_eq!(state.playback, playback);
        assert_eq!(state.chat.messages(), transcript.as_slice());
        assert!(state.chat.is_busy());
    }
}
