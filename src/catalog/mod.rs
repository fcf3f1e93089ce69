mod data;

use std::time::Duration;

use lazy_static::lazy_static;
use ratatui::style::Color;

lazy_static! {
    static ref MOCK_CATALOG: Catalog = data::build();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    pub duration: Duration,
}

impl Song {
    /// Duration as `m:ss`.
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub description: String,
    pub cover_url: String,
    pub songs: Vec<Song>,
}

impl Playlist {
    pub fn first_track(&self) -> Option<&Song> {
        self.songs.first()
    }

    pub fn total_duration(&self) -> Duration {
        self.songs.iter().map(|s| s.duration).sum()
    }
}

/// A tile on the search view. Purely decorative: selecting one does nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseStyle {
    pub name: &'static str,
    pub gradient: (Color, Color),
    pub cover_url: String,
}

pub const BROWSE_STYLES: [&str; 10] = [
    "Suno Top 50",
    "New Gens",
    "Trending",
    "Synthwave",
    "Cinematic",
    "Lofi",
    "Metal",
    "Experimental",
    "Ambient",
    "Vocal Tracks",
];

const GRADIENTS: [(Color, Color); 4] = [
    (Color::from_u32(0x009333ea), Color::from_u32(0x002563eb)),
    (Color::from_u32(0x00ef4444), Color::from_u32(0x00f97316)),
    (Color::from_u32(0x0022c55e), Color::from_u32(0x00047857)),
    (Color::from_u32(0x00ec4899), Color::from_u32(0x00e11d48)),
];

/// Read-only store backing every view.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub playlists: Vec<Playlist>,
    pub recently_played: Vec<Playlist>,
    pub mixes: Vec<Playlist>,
}

impl Catalog {
    pub fn mock() -> &'static Catalog {
        &MOCK_CATALOG
    }

    /// First five library playlists, newest first.
    pub fn latest(&self) -> Vec<&Playlist> {
        self.playlists.iter().take(5).rev().collect()
    }

    pub fn browse_styles(&self) -> Vec<BrowseStyle> {
        BROWSE_STYLES
            .iter()
            .enumerate()
            .map(|(i, name)| BrowseStyle {
                name: *name,
                gradient: GRADIENTS[i % GRADIENTS.len()],
                cover_url: if self.playlists.is_empty() {
                    String::new()
                } else {
                    self.playlists[i % self.playlists.len()].cover_url.clone()
                },
            })
            .collect()
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_is_first_five_reversed() {
        let catalog = Catalog::mock();
        let latest: Vec<_> = latest_ids(catalog);
        let mut expected: Vec<_> = catalog
            .playlists
            .iter()
            .take(5)
            .map(|p| p.id.clone())
            .collect();
        expected.reverse();
        assert_eq!(latest, expected);
    }

    fn latest_ids(catalog: &Catalog) -> Vec<String> {
        catalog.latest().iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn browse_styles_cycle_covers_and_gradients() {
        let catalog = Catalog::mock();
        let styles = catalog.browse_styles();
        assert_eq!(styles.len(), 10);
        assert_eq!(styles[0].name, "Suno Top 50");
        assert_eq!(styles[4].gradient, styles[0].gradient);
        assert_ne!(styles[1].gradient, styles[0].gradient);
        let n = catalog.playlists.len();
        for (i, style) in styles.iter().enumerate() {
            assert_eq!(style.cover_url, catalog.playlists[i % n].cover_url);
        }
    }

    #[test]
    fn browse_styles_on_empty_catalog() {
        let styles = Catalog::default().browse_styles();
        assert!(styles.iter().all(|s| s.cover_url.is_empty()));
    }

    #[test]
    fn mock_contains_an_empty_playlist() {
        assert!(Catalog::mock().playlists.iter().any(|p| p.songs.is_empty()));
    }

    #[test]
    fn playlist_ids_are_unique() {
        let catalog = Catalog::mock();
        let mut ids: Vec<_> = catalog
            .playlists
            .iter()
            .chain(&catalog.recently_played)
            .chain(&catalog.mixes)
            .map(|p| p.id.as_str())
            .collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), len);
    }

    #[test]
    fn durations_format_as_minutes_and_seconds() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0:00");
        assert_eq!(format_duration(Duration::from_secs(65)), "1:05");
        assert_eq!(format_duration(Duration::from_secs(754)), "12:34");
    }
}
