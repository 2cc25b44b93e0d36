use chrono::Utc;
use log::{error, info};
use rand::{Rng, seq::SliceRandom};
use serde::Serialize;

use crate::{
    catalog::{
        error::CatalogError,
        format::{self, FALLBACK_IMAGE, FormattedTrack},
        source::{Dataset, DatasetSource},
    },
    config::Config,
    domain::{
        id::EntryId,
        model::{Artist, Playlist, SessionUser, Track},
    },
};

/// Display name used for playlist ownership when nobody is logged in.
const DEFAULT_OWNER: &str = "Mysic User";

/// The in-memory catalog, normalized at load time: every cached track
/// has a genre and a play count.
#[derive(Debug, Default)]
struct Catalog {
    tracks: Vec<Track>,
    artists: Vec<Artist>,
    playlists: Vec<Playlist>,
}

impl Catalog {
    fn normalize(dataset: Dataset) -> Self {
        let mut rng = rand::thread_rng();
        let tracks = dataset
            .tracks
            .into_iter()
            .map(|mut track| {
                if track.genre.is_none() {
                    track.genre = Some("Unknown".to_string());
                }
                if track.play_count.is_none() {
                    track.play_count = Some(rng.gen_range(0..10_000));
                }
                track
            })
            .collect();

        Self {
            tracks,
            artists: dataset.artists,
            playlists: dataset.playlists,
        }
    }
}

/// Read/query interface over the static dataset.
///
/// Owns the cache and the simulated session. The dataset is loaded at
/// most once per instance; every query lazily triggers the load when the
/// cache is still empty. `reload` drops the cache explicitly.
pub struct CatalogService {
    source: DatasetSource,
    image_base: String,
    cache: Option<Catalog>,
    session: Option<SessionUser>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub track_count: usize,
    pub image: String,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistHeader {
    pub id: EntryId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistTracks {
    pub playlist: PlaylistHeader,
    pub tracks: Vec<FormattedTrack>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedArtist {
    pub id: EntryId,
    pub name: String,
    pub genre: String,
    pub description: String,
    pub image: String,
    /// Fabricated per call; this mock has no real follower data.
    pub followers: u64,
    pub popularity: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistHeader {
    pub id: EntryId,
    pub name: String,
    pub genre: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistTracks {
    pub artist: ArtistHeader,
    pub tracks: Vec<FormattedTrack>,
}

/// Outcome of a play lookup: the formatted track when it is cached,
/// otherwise a bare acknowledgment that the play was logged.
#[derive(Debug)]
pub enum PlayAck {
    Track(FormattedTrack),
    Logged,
}

impl CatalogService {
    pub fn new(source: DatasetSource, image_base: String) -> Self {
        Self {
            source,
            image_base,
            cache: None,
            session: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            DatasetSource::from_config(&config.catalog),
            config.catalog.image_base.clone(),
        )
    }

    /// Eagerly loads the dataset. Failures are reported as `false`, never
    /// propagated.
    pub fn initialize(&mut self) -> bool {
        match self.ensure_loaded() {
            Ok(catalog) => {
                info!("catalog initialized with {} tracks", catalog.tracks.len());
                true
            }
            Err(e) => {
                error!("failed to initialize catalog: {e}");
                false
            }
        }
    }

    /// Drops the cache and loads the dataset again.
    pub fn reload(&mut self) -> Result<(), CatalogError> {
        self.cache = None;
        self.ensure_loaded().map(|_| ())
    }

    fn ensure_loaded(&mut self) -> Result<&Catalog, CatalogError> {
        if self.cache.is_none() {
            let dataset = self.source.load()?;
            self.cache = Some(Catalog::normalize(dataset));
        }
        match &self.cache {
            Some(catalog) => Ok(catalog),
            None => Err(CatalogError::Internal(anyhow::anyhow!(
                "catalog cache empty after load"
            ))),
        }
    }

    /// Case-insensitive substring search over title, artist and genre.
    /// An empty or whitespace query returns the full cache, truncated.
    pub fn search(&mut self, query: &str, limit: usize) -> Result<Vec<FormattedTrack>, CatalogError> {
        let image_base = self.image_base.clone();
        let needle = query.trim().to_lowercase();
        let catalog = self.ensure_loaded()?;

        let results = catalog
            .tracks
            .iter()
            .filter(|track| {
                needle.is_empty()
                    || track.title.to_lowercase().contains(&needle)
                    || track.artist.to_lowercase().contains(&needle)
                    || track
                        .genre
                        .as_deref()
                        .is_some_and(|g| g.to_lowercase().contains(&needle))
            })
            .take(limit)
            .map(|track| format::format_entry(&image_base, track))
            .collect();

        Ok(results)
    }

    /// A "trending" view with no real ranking behind it: a uniformly
    /// shuffled subset of the cache with inflated fabricated play counts.
    pub fn featured(&mut self, limit: usize) -> Result<Vec<FormattedTrack>, CatalogError> {
        let image_base = self.image_base.clone();
        let catalog = self.ensure_loaded()?;

        let mut picks: Vec<&Track> = catalog.tracks.iter().collect();
        let mut rng = rand::thread_rng();
        picks.shuffle(&mut rng);

        let results = picks
            .into_iter()
            .take(limit)
            .map(|track| {
                let mut formatted = format::format_entry(&image_base, track);
                formatted.play_count = rng.gen_range(10_000..60_000);
                formatted
            })
            .collect();

        Ok(results)
    }

    /// Summaries of every playlist in the catalog. No playlists at all is
    /// an empty success, not a failure.
    pub fn playlists(&mut self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        let image_base = self.image_base.clone();
        let owner = self.owner_name();
        let catalog = self.ensure_loaded()?;

        Ok(catalog
            .playlists
            .iter()
            .map(|playlist| PlaylistSummary {
                id: playlist.id.clone(),
                name: playlist.name.clone(),
                description: playlist.description.clone().unwrap_or_default(),
                track_count: playlist.tracks.len(),
                image: format::resolve_image(&image_base, None),
                owner: owner.clone(),
            })
            .collect())
    }

    /// The tracks of one playlist, joined by id. Track ids that resolve
    /// to nothing are silently dropped; an unknown playlist is a failure.
    pub fn playlist_tracks(&mut self, id: &EntryId) -> Result<PlaylistTracks, CatalogError> {
        let image_base = self.image_base.clone();
        let catalog = self.ensure_loaded()?;

        let playlist = catalog
            .playlists
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::PlaylistNotFound(id.clone()))?;

        let tracks = join_tracks(&catalog.tracks, &playlist.tracks, &image_base);

        Ok(PlaylistTracks {
            playlist: PlaylistHeader {
                id: playlist.id.clone(),
                name: playlist.name.clone(),
                description: playlist.description.clone().unwrap_or_default(),
            },
            tracks,
        })
    }

    /// Every artist in the catalog, with fabricated follower and
    /// popularity figures.
    pub fn artist_recommendations(&mut self) -> Result<Vec<RecommendedArtist>, CatalogError> {
        let image_base = self.image_base.clone();
        let catalog = self.ensure_loaded()?;
        let mut rng = rand::thread_rng();

        Ok(catalog
            .artists
            .iter()
            .map(|artist| RecommendedArtist {
                id: artist.id.clone(),
                name: artist.name.clone(),
                genre: artist.genre.clone().unwrap_or_default(),
                description: artist.description.clone().unwrap_or_default(),
                image: format::resolve_image(&image_base, None),
                followers: rng.gen_range(1_000..101_000),
                popularity: rng.gen_range(0..100),
            })
            .collect())
    }

    pub fn artist_tracks(&mut self, id: &EntryId) -> Result<ArtistTracks, CatalogError> {
        let image_base = self.image_base.clone();
        let catalog = self.ensure_loaded()?;

        let artist = catalog
            .artists
            .iter()
            .find(|a| &a.id == id)
            .ok_or_else(|| CatalogError::ArtistNotFound(id.clone()))?;

        let tracks = join_tracks(&catalog.tracks, &artist.tracks, &image_base);

        Ok(ArtistTracks {
            artist: ArtistHeader {
                id: artist.id.clone(),
                name: artist.name.clone(),
                genre: artist.genre.clone().unwrap_or_default(),
                description: artist.description.clone().unwrap_or_default(),
            },
            tracks,
        })
    }

    /// Acknowledged no-op: the playlist is described back to the caller
    /// but never enters the cache. There is no backing store to write to.
    pub fn create_playlist(
        &mut self,
        name: &str,
        description: &str,
    ) -> Result<PlaylistSummary, CatalogError> {
        Ok(PlaylistSummary {
            id: EntryId::from(Utc::now().timestamp_millis()),
            name: name.to_string(),
            description: description.to_string(),
            track_count: 0,
            image: format::resolve_image(&self.image_base, None),
            owner: self.owner_name(),
        })
    }

    /// Acknowledged no-op, same as [`Self::create_playlist`].
    pub fn add_track_to_playlist(
        &mut self,
        _playlist: &EntryId,
        _track: &EntryId,
    ) -> Result<String, CatalogError> {
        Ok("Track added to playlist".to_string())
    }

    /// Any non-empty email and password pair succeeds; the display name
    /// is the local part of the email. A failed attempt leaves the
    /// current session untouched.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser, CatalogError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CatalogError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = SessionUser {
            id: format!("user_{}", Utc::now().timestamp_millis()),
            name,
            email: email.to_string(),
        };
        self.session = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) -> bool {
        self.session = None;
        true
    }

    pub fn session(&self) -> Option<&SessionUser> {
        self.session.as_ref()
    }

    /// Looks up a track for playback. An id missing from the cache (or
    /// an unreachable dataset) still acknowledges the play as logged.
    pub fn record_play(&mut self, id: &EntryId) -> Result<PlayAck, CatalogError> {
        let image_base = self.image_base.clone();
        let catalog = match self.ensure_loaded() {
            Ok(catalog) => catalog,
            Err(_) => return Ok(PlayAck::Logged),
        };

        Ok(catalog
            .tracks
            .iter()
            .find(|t| &t.id == id)
            .map(|t| PlayAck::Track(format::format_entry(&image_base, t)))
            .unwrap_or(PlayAck::Logged))
    }

    /// Normalizes a raw track into its display shape.
    pub fn format_entry(&self, track: &Track) -> FormattedTrack {
        format::format_entry(&self.image_base, track)
    }

    fn owner_name(&self) -> String {
        self.session
            .as_ref()
            .map(|user| user.name.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string())
    }
}

fn join_tracks(tracks: &[Track], ids: &[EntryId], image_base: &str) -> Vec<FormattedTrack> {
    ids.iter()
        .filter_map(|id| tracks.iter().find(|t| &t.id == id))
        .map(|track| format::format_entry(image_base, track))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::HashSet, fs, path::PathBuf};
    use tempfile::{TempDir, tempdir};

    const DATA: &str = r#"{
        "tracks": [
            {"id": 1, "title": "Midnight Rain", "artist": "Nova", "genre": "Electronic", "duration": "3:05"},
            {"id": 2, "title": "Sunrise Drive", "artist": "Nova", "genre": "Electronic", "audioSrc": "audio/sunrise.mp3"},
            {"id": 3, "title": "Old Oak", "artist": "The Ramblers", "genre": "Folk"},
            {"id": 4, "title": "rainfall", "artist": "Quiet Corner"}
        ],
        "artists": [
            {"id": 10, "name": "Nova", "genre": "Electronic", "description": "Synth duo", "tracks": [1, 2]},
            {"id": 11, "name": "The Ramblers", "genre": "Folk", "tracks": [3]}
        ],
        "playlists": [
            {"id": "pl_1", "name": "Evening", "description": "Wind down", "tracks": [1, 3, 99]},
            {"id": 20, "name": "Empty", "tracks": []}
        ]
    }"#;

    fn setup_service() -> anyhow::Result<(TempDir, CatalogService)> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        fs::write(&path, DATA)?;
        let service = CatalogService::new(DatasetSource::new(vec![path]), "/".to_string());
        Ok((dir, service))
    }

    fn unreachable_service() -> CatalogService {
        CatalogService::new(
            DatasetSource::new(vec![PathBuf::from("/nowhere/data.json")]),
            "/".to_string(),
        )
    }

    #[test]
    fn initialize_reports_success_and_failure_as_bool() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;
        assert!(service.initialize());

        let mut broken = unreachable_service();
        assert!(!broken.initialize());
        Ok(())
    }

    #[test]
    fn first_query_loads_once_then_serves_from_cache() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        fs::write(&path, DATA)?;
        let mut service =
            CatalogService::new(DatasetSource::new(vec![path.clone()]), "/".to_string());

        assert_eq!(service.search("", 100)?.len(), 4);

        // Changing the file after the first query must not change answers:
        // the cache was populated exactly once.
        fs::write(&path, r#"{"tracks": []}"#)?;
        assert_eq!(service.search("", 100)?.len(), 4);

        // An explicit reload picks the new content up.
        service.reload()?;
        assert_eq!(service.search("", 100)?.len(), 0);
        Ok(())
    }

    #[test]
    fn empty_query_returns_full_cache_truncated() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        assert_eq!(service.search("", 100)?.len(), 4);
        assert_eq!(service.search("   ", 100)?.len(), 4);
        assert_eq!(service.search("", 2)?.len(), 2);
        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_on_all_three_fields() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        // title
        assert_eq!(service.search("MIDNIGHT", 10)?.len(), 1);
        // artist
        assert_eq!(service.search("nova", 10)?.len(), 2);
        // genre
        assert_eq!(service.search("electronic", 10)?.len(), 2);
        // normalized genre default is searchable too
        assert_eq!(service.search("unknown", 10)?.len(), 1);
        // no match
        assert!(service.search("zzz", 10)?.is_empty());
        Ok(())
    }

    #[test]
    fn featured_is_a_duplicate_free_subset_of_the_right_size() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let featured = service.featured(3)?;
        assert_eq!(featured.len(), 3);

        let ids: HashSet<String> = featured.iter().map(|t| t.id.canonical()).collect();
        assert_eq!(ids.len(), 3);

        // limit above cache size caps at cache size
        assert_eq!(service.featured(50)?.len(), 4);

        // inflated fabricated play counts
        for track in &featured {
            assert!(track.play_count >= 10_000);
        }
        Ok(())
    }

    #[test]
    fn featured_order_is_not_a_fixed_function_of_cache_order() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let order = |tracks: &[FormattedTrack]| -> Vec<String> {
            tracks.iter().map(|t| t.id.canonical()).collect()
        };

        let first = order(&service.featured(4)?);
        let mut saw_other_order = false;
        for _ in 0..64 {
            if order(&service.featured(4)?) != first {
                saw_other_order = true;
                break;
            }
        }
        // 64 identical shuffles of 4 elements would mean the shuffle is
        // degenerate (chance below 1e-80 for a uniform one)
        assert!(saw_other_order);
        Ok(())
    }

    #[test]
    fn playlists_are_summarized_with_owner_and_count() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let playlists = service.playlists()?;
        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].track_count, 3);
        assert_eq!(playlists[0].owner, "Mysic User");

        service.login("dj@example.com", "pw")?;
        let playlists = service.playlists()?;
        assert_eq!(playlists[0].owner, "dj");
        Ok(())
    }

    #[test]
    fn playlist_tracks_joins_by_id_and_drops_dangling_ids() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let result = service.playlist_tracks(&EntryId::from("pl_1"))?;
        assert_eq!(result.playlist.name, "Evening");
        // id 99 resolves to nothing and is dropped
        assert_eq!(result.tracks.len(), 2);
        assert_eq!(result.tracks[0].title, "Midnight Rain");
        Ok(())
    }

    #[test]
    fn playlist_ids_compare_across_numeric_and_string_forms() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        // playlist stored with numeric id 20, queried as text
        let result = service.playlist_tracks(&EntryId::from("20"))?;
        assert_eq!(result.playlist.name, "Empty");
        assert!(result.tracks.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_playlist_is_a_not_found_failure() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let err = service.playlist_tracks(&EntryId::from("missing")).unwrap_err();
        assert!(matches!(err, CatalogError::PlaylistNotFound(_)));
        Ok(())
    }

    #[test]
    fn artist_queries_join_and_fabricate_metrics() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let artists = service.artist_recommendations()?;
        assert_eq!(artists.len(), 2);
        for artist in &artists {
            assert!(artist.followers >= 1_000);
            assert!(artist.popularity < 100);
        }

        let nova = service.artist_tracks(&EntryId::from(10))?;
        assert_eq!(nova.artist.name, "Nova");
        assert_eq!(nova.tracks.len(), 2);

        let err = service.artist_tracks(&EntryId::from(999)).unwrap_err();
        assert!(matches!(err, CatalogError::ArtistNotFound(_)));
        Ok(())
    }

    #[test]
    fn playlist_mutations_acknowledge_but_change_nothing() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let before = service.playlists()?.len();

        let created = service.create_playlist("Roadtrip", "Long drives")?;
        assert_eq!(created.name, "Roadtrip");
        assert_eq!(created.track_count, 0);

        let message =
            service.add_track_to_playlist(&EntryId::from("pl_1"), &EntryId::from(2))?;
        assert_eq!(message, "Track added to playlist");

        // reads are unchanged: the mutations never reach the cache
        assert_eq!(service.playlists()?.len(), before);
        let evening = service.playlist_tracks(&EntryId::from("pl_1"))?;
        assert_eq!(evening.tracks.len(), 2);
        Ok(())
    }

    #[test]
    fn login_derives_display_name_from_email_local_part() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let user = service.login("user@x.com", "pw")?;
        assert_eq!(user.name, "user");
        assert!(user.id.starts_with("user_"));
        assert_eq!(service.session().map(|u| u.email.as_str()), Some("user@x.com"));

        assert!(service.logout());
        assert!(service.session().is_none());
        Ok(())
    }

    #[test]
    fn login_with_empty_field_fails_and_keeps_session() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        service.login("user@x.com", "pw")?;

        let err = service.login("", "pw").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));
        let err = service.login("other@x.com", "").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidCredentials));

        // the previous session survives failed attempts
        assert_eq!(service.session().map(|u| u.name.as_str()), Some("user"));
        Ok(())
    }

    #[test]
    fn record_play_returns_track_or_logged_ack() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        match service.record_play(&EntryId::from(1))? {
            PlayAck::Track(track) => assert_eq!(track.title, "Midnight Rain"),
            PlayAck::Logged => panic!("expected cached track"),
        }

        assert!(matches!(
            service.record_play(&EntryId::from(12345))?,
            PlayAck::Logged
        ));

        // an unreachable dataset still acknowledges the play
        let mut broken = unreachable_service();
        assert!(matches!(
            broken.record_play(&EntryId::from(1))?,
            PlayAck::Logged
        ));
        Ok(())
    }

    #[test]
    fn format_entry_resolves_against_the_configured_base() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        fs::write(&path, DATA)?;
        let service =
            CatalogService::new(DatasetSource::new(vec![path]), "/static/".to_string());

        let raw = Track {
            id: EntryId::from(7),
            title: "Loose".to_string(),
            artist: "Nobody".to_string(),
            duration: None,
            cover: Some("covers/loose.png".to_string()),
            genre: None,
            audio_src: None,
            play_count: Some(3),
        };

        let formatted = service.format_entry(&raw);
        assert_eq!(formatted.image, "/static/covers/loose.png");
        assert_eq!(formatted.display_id, "local_7");
        assert_eq!(formatted.duration, "0:00");
        Ok(())
    }

    #[test]
    fn normalization_fills_genre_and_play_count() -> anyhow::Result<()> {
        let (_dir, mut service) = setup_service()?;

        let results = service.search("rainfall", 10)?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].genre, "Unknown");
        // fabricated at load, then stable across calls
        let first = results[0].play_count;
        let again = service.search("rainfall", 10)?;
        assert_eq!(again[0].play_count, first);
        Ok(())
    }
}
