use thiserror::Error;

use crate::domain::id::EntryId;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset unreachable: no candidate path could be read")]
    DatasetUnreachable,

    #[error("playlist {0} not found")]
    PlaylistNotFound(EntryId),

    #[error("artist {0} not found")]
    ArtistNotFound(EntryId),

    #[error("email and password must not be empty")]
    InvalidCredentials,

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("filesystem error: {0}")]
    Fs(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
