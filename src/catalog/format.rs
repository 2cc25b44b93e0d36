//! Display-shape formatting of cached tracks

use rand::Rng;
use serde::Serialize;

use crate::domain::{id::EntryId, model::Track};

/// Asset used when a record carries no cover art of its own.
pub const FALLBACK_IMAGE: &str = "assets/images/fallback.svg";

pub const SOURCE_LABEL: &str = "audiomack";

/// A track in its display shape: resolved image path, synthesized
/// identifiers, filled play count. Built from a cached [`Track`] without
/// mutating it.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedTrack {
    pub id: EntryId,
    /// Synthesized display identifier, `local_<id>`.
    pub display_id: String,
    /// Random per-call external identifier, `am/<13 alphanumerics>`.
    pub external_id: String,
    pub title: String,
    /// Alias of `title`, kept for consumers that key on `name`.
    pub name: String,
    pub artist: String,
    pub duration: String,
    pub genre: String,
    pub image: String,
    pub audio_src: Option<String>,
    pub source_label: &'static str,
    pub play_count: u64,
}

/// Resolves a cover art reference against the configured base path.
///
/// Absolute URLs pass through unchanged; relative references are joined
/// to the base; a missing reference resolves to the fallback asset.
pub fn resolve_image(base: &str, image: Option<&str>) -> String {
    let image = match image.filter(|s| !s.is_empty()) {
        Some(image) => image,
        None => return join_base(base, FALLBACK_IMAGE),
    };

    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }

    join_base(base, image.trim_start_matches('/'))
}

fn join_base(base: &str, rel: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{rel}")
    } else {
        format!("{base}/{rel}")
    }
}

/// 13 lowercase base-36 characters, fresh on every call.
pub fn random_external_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::thread_rng();
    (0..13)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

pub fn format_entry(image_base: &str, track: &Track) -> FormattedTrack {
    FormattedTrack {
        id: track.id.clone(),
        display_id: format!("local_{}", track.id),
        external_id: format!("am/{}", random_external_id()),
        title: track.title.clone(),
        name: track.title.clone(),
        artist: track.artist.clone(),
        duration: track.duration.clone().unwrap_or_else(|| "0:00".to_string()),
        genre: track.genre.clone().unwrap_or_else(|| "Unknown".to_string()),
        image: resolve_image(image_base, track.cover.as_deref()),
        audio_src: track.has_audio_source().then(|| track.audio_src.clone()).flatten(),
        source_label: SOURCE_LABEL,
        play_count: track
            .play_count
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..5_000)),
    }
}
