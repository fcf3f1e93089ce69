use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    catalog::{Playlist, Song},
    event::events::Event,
    ui::{context::AppContext, state::AppState},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    PlayPause,
    PlaySong(Song),
    PlayPlaylist(Playlist),
    ChatInput(char),
    ChatBackspace,
    ChatSubmit,
    /// Key consumed, nothing to do.
    None,
}

#[async_trait]
pub trait View: Send {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(&mut self, _event: &Event, _ctx: &AppContext) {}
}
