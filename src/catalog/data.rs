use std::time::Duration;

use super::{Catalog, Playlist, Song};

fn cover(seed: &str) -> String {
    format!("https://picsum.photos/seed/{}/300/300", seed)
}

fn song(id: &str, title: &str, artist: &str, secs: u64) -> Song {
    Song {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        cover_url: cover(id),
        duration: Duration::from_secs(secs),
    }
}

fn playlist(id: &str, name: &str, owner: &str, description: &str, songs: Vec<Song>) -> Playlist {
    Playlist {
        id: id.to_string(),
        name: name.to_string(),
        owner: owner.to_string(),
        description: description.to_string(),
        cover_url: cover(id),
        songs,
    }
}

pub(super) fn build() -> Catalog {
    let neon_drive = vec![
        song("s1", "Neon Horizon", "Suno Synth Collective", 214),
        song("s2", "Midnight Arcade", "Retrowave AI", 187),
        song("s3", "Chrome Sunset", "Suno Synth Collective", 242),
    ];
    let lofi = vec![
        song("s4", "Rainy Window Study", "Lofi Generator", 156),
        song("s5", "Coffee at 3AM", "Chillhop Bot", 171),
        song("s6", "Late Bus Home", "Lofi Generator", 139),
    ];
    let cinematic = vec![
        song("s7", "Rise of the Machines", "Epic Orchestra AI", 268),
        song("s8", "Last Light", "Epic Orchestra AI", 301),
    ];
    let metal = vec![
        song("s9", "Iron Algorithm", "Neural Riffs", 233),
        song("s10", "Overclocked", "Neural Riffs", 198),
    ];
    let ambient = vec![
        song("s11", "Tidal Memory", "Drift Engine", 412),
        song("s12", "Glacier Radio", "Drift Engine", 367),
    ];
    let city_pop = vec![
        song("s13", "Plastic Love Letter", "Tokyo Prompt", 276),
        song("s14", "Sunday Drive '84", "Tokyo Prompt", 229),
    ];
    let vocals = vec![
        song("s15", "Paper Hearts", "Vox Model 3", 203),
        song("s16", "Echoes in Blue", "Vox Model 3", 221),
    ];

    let playlists = vec![
        playlist(
            "p1",
            "Neon Drive",
            "Suno AI",
            "Synthwave generated from a single prompt: night highway.",
            neon_drive.clone(),
        ),
        playlist(
            "p2",
            "Lofi Study Gens",
            "Suno AI",
            "Soft beats to focus to. Every track a fresh generation.",
            lofi.clone(),
        ),
        playlist(
            "p3",
            "Cinematic Dreams",
            "Numus Curators",
            "Orchestral swells and trailer hits.",
            cinematic.clone(),
        ),
        playlist(
            "p4",
            "Machine Metal",
            "Numus Curators",
            "Distorted guitars, zero humans.",
            metal.clone(),
        ),
        playlist(
            "p5",
            "Deep Ambient",
            "Suno AI",
            "Long-form textures for sleep and reading.",
            ambient.clone(),
        ),
        playlist(
            "p6",
            "City Pop Revival",
            "Tokyo Prompt",
            "80s Japanese city pop, regenerated.",
            city_pop.clone(),
        ),
        playlist(
            "p7",
            "Vocal Experiments",
            "Vox Model 3",
            "Full lyrics, fully synthetic.",
            vocals.clone(),
        ),
        playlist(
            "p8",
            "Drafts",
            "You",
            "Prompts waiting for their first generation.",
            Vec::new(),
        ),
    ];

    let recently_played = vec![
        playlist(
            "r1",
            "Night Drive Mix",
            "Suno AI",
            "Suno Mix",
            neon_drive.iter().chain(city_pop.iter()).cloned().collect(),
        ),
        playlist("r2", "Focus Flow", "Suno AI", "Suno Mix", lofi.clone()),
        playlist("r3", "Epic Moments", "Suno AI", "Suno Mix", cinematic.clone()),
        playlist("r4", "Heavy Rotation", "Suno AI", "Suno Mix", metal.clone()),
        playlist("r5", "Calm Waters", "Suno AI", "Suno Mix", ambient.clone()),
        playlist("r6", "Sing Along", "Suno AI", "Suno Mix", vocals.clone()),
    ];

    let mixes = vec![
        playlist(
            "m1",
            "Daily Mix 1",
            "Numus AI",
            "Synthwave, city pop and more.",
            neon_drive.into_iter().chain(city_pop).collect(),
        ),
        playlist(
            "m2",
            "Daily Mix 2",
            "Numus AI",
            "Lofi and ambient for slow days.",
            lofi.into_iter().chain(ambient).collect(),
        ),
        playlist(
            "m3",
            "Discover Weekly",
            "Numus AI",
            "Fresh generations picked for you.",
            vocals.into_iter().chain(cinematic).collect(),
        ),
        playlist("m4", "Release Radar", "Numus AI", "New gens from styles you follow.", metal),
        playlist(
            "m5",
            "On Repeat",
            "Numus AI",
            "Nothing here yet. Play something!",
            Vec::new(),
        ),
    ];

    Catalog {
        playlists,
        recently_played,
        mixes,
    }
}
