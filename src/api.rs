//! Envelope layer over the catalog service.
//!
//! Every call answers with a serializable `{success, data | error}`
//! envelope and never returns an error or panics: internal failures are
//! normalized into `success: false` with empty collections. This is the
//! surface a browsing UI talks to.

use serde::Serialize;

use crate::{
    catalog::{
        format::FormattedTrack,
        service::{
            ArtistHeader, CatalogService, PlayAck, PlaylistHeader, PlaylistSummary,
            PlaylistTracks, RecommendedArtist,
        },
    },
    config::Config,
    domain::{id::EntryId, model::SessionUser},
};

#[derive(Debug, Serialize)]
pub struct TracksResponse {
    pub success: bool,
    pub tracks: Vec<FormattedTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    pub success: bool,
    pub playlists: Vec<PlaylistSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistTracksResponse {
    pub success: bool,
    pub tracks: Vec<FormattedTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<PlaylistHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub success: bool,
    pub artists: Vec<RecommendedArtist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ArtistTracksResponse {
    pub success: bool,
    pub tracks: Vec<FormattedTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistHeader>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatePlaylistResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist: Option<PlaylistSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<FormattedTrack>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The mock remote-service facade. All its methods are infallible by
/// contract.
pub struct MockApi {
    service: CatalogService,
}

impl MockApi {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(CatalogService::from_config(config))
    }

    pub fn initialize(&mut self) -> bool {
        self.service.initialize()
    }

    pub fn search_tracks(&mut self, query: &str, limit: usize) -> TracksResponse {
        match self.service.search(query, limit) {
            Ok(tracks) => TracksResponse {
                success: true,
                tracks,
                error: None,
            },
            Err(e) => TracksResponse {
                success: false,
                tracks: vec![],
                error: Some(e.to_string()),
            },
        }
    }

    pub fn hot_tracks(&mut self, limit: usize) -> TracksResponse {
        match self.service.featured(limit) {
            Ok(tracks) => TracksResponse {
                success: true,
                tracks,
                error: None,
            },
            Err(_) => TracksResponse {
                success: false,
                tracks: vec![],
                error: Some("Failed to get hot tracks".to_string()),
            },
        }
    }

    pub fn user_playlists(&mut self) -> PlaylistsResponse {
        match self.service.playlists() {
            Ok(playlists) => PlaylistsResponse {
                success: true,
                playlists,
                error: None,
            },
            Err(_) => PlaylistsResponse {
                success: false,
                playlists: vec![],
                error: Some("Failed to get playlists".to_string()),
            },
        }
    }

    pub fn playlist_tracks(&mut self, id: &EntryId) -> PlaylistTracksResponse {
        match self.service.playlist_tracks(id) {
            Ok(PlaylistTracks { playlist, tracks }) => PlaylistTracksResponse {
                success: true,
                tracks,
                playlist: Some(playlist),
                error: None,
            },
            Err(e) => PlaylistTracksResponse {
                success: false,
                tracks: vec![],
                playlist: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn artist_recommendations(&mut self) -> ArtistsResponse {
        match self.service.artist_recommendations() {
            Ok(artists) => ArtistsResponse {
                success: true,
                artists,
                error: None,
            },
            Err(_) => ArtistsResponse {
                success: false,
                artists: vec![],
                error: Some("Failed to get artist recommendations".to_string()),
            },
        }
    }

    pub fn artist_tracks(&mut self, id: &EntryId) -> ArtistTracksResponse {
        match self.service.artist_tracks(id) {
            Ok(result) => ArtistTracksResponse {
                success: true,
                tracks: result.tracks,
                artist: Some(result.artist),
                error: None,
            },
            Err(e) => ArtistTracksResponse {
                success: false,
                tracks: vec![],
                artist: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn create_playlist(&mut self, name: &str, description: &str) -> CreatePlaylistResponse {
        match self.service.create_playlist(name, description) {
            Ok(playlist) => CreatePlaylistResponse {
                success: true,
                playlist: Some(playlist),
                error: None,
            },
            Err(e) => CreatePlaylistResponse {
                success: false,
                playlist: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn add_track_to_playlist(&mut self, playlist: &EntryId, track: &EntryId) -> AckResponse {
        match self.service.add_track_to_playlist(playlist, track) {
            Ok(message) => AckResponse {
                success: true,
                message: Some(message),
                error: None,
            },
            Err(e) => AckResponse {
                success: false,
                message: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn login(&mut self, email: &str, password: &str) -> LoginResponse {
        match self.service.login(email, password) {
            Ok(user) => LoginResponse {
                success: true,
                user: Some(user),
                error: None,
            },
            Err(e) => LoginResponse {
                success: false,
                user: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn logout(&mut self) -> bool {
        self.service.logout()
    }

    pub fn play_track(&mut self, id: &EntryId) -> PlayResponse {
        match self.service.record_play(id) {
            Ok(PlayAck::Track(track)) => PlayResponse {
                success: true,
                track: Some(track),
                message: None,
                error: None,
            },
            Ok(PlayAck::Logged) => PlayResponse {
                success: true,
                track: None,
                message: Some("Track play logged".to_string()),
                error: None,
            },
            Err(e) => PlayResponse {
                success: false,
                track: None,
                message: None,
                error: Some(e.to_string()),
            },
        }
    }
}
