use crate::{
    catalog::{Playlist, Song},
    http::AdviceUnavailable,
    ui::state::ViewState,
};

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Events
    AdviceSettled(Result<String, AdviceUnavailable>),

    // Commands
    SetView(ViewState),
    PlaySong(Song),
    PlayPlaylist(Playlist),
    TogglePlayback,
    SubmitChat,
    Quit,
}
