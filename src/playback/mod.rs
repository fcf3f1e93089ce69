mod state;

pub use state::PlaybackState;
