use serde::{Deserialize, Serialize};

use crate::domain::id::EntryId;

/// A track record as it appears in the dataset file.
///
/// `genre` and `play_count` may be absent in the raw file; the catalog
/// fills them in when the dataset is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: EntryId,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default, rename = "audioSrc")]
    pub audio_src: Option<String>,
    #[serde(default, rename = "nbPlays")]
    pub play_count: Option<u64>,
}

impl Track {
    /// A track is playable only when it carries a non-empty audio source.
    pub fn has_audio_source(&self) -> bool {
        self.audio_src.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// An artist record, cached verbatim from the dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Vec<EntryId>,
}

/// A playlist record: an ordered list of track ids.
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: EntryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tracks: Vec<EntryId>,
}

/// The simulated logged-in user. Lives only in memory for the lifetime
/// of the service instance; never persisted, never validated against
/// real credentials.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}
