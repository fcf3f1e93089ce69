use tracing::info;

use crate::catalog::{Playlist, Song};

/// What the player bar shows. There is no audio behind `playing`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    current: Option<Song>,
    playing: bool,
}

impl PlaybackState {
    pub fn current(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_current(&self, song: &Song) -> bool {
        self.current.as_ref().is_some_and(|s| s.id == song.id)
    }

    /// Always ends up playing, even if `song` is already current.
    pub fn select_and_play(&mut self, song: Song) {
        info!(id = song.id.as_str(), title = song.title.as_str(), "song_selected");
        self.current = Some(song);
        self.playing = true;
    }

    /// Plays the first track. Returns false for an empty playlist.
    pub fn play_playlist(&mut self, playlist: &Playlist) -> bool {
        match playlist.first_track() {
            Some(song) => {
                self.select_and_play(song.clone());
                true
            }
            None => {
                info!(id = playlist.id.as_str(), "playlist_empty");
                false
            }
        }
    }

    pub fn toggle(&mut self) {
        if self.current.is_some() {
            self.playing = !self.playing;
        }
    }
}
