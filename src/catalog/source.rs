//! Module to locate and parse the dataset file on disk

use std::path::PathBuf;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::{
    catalog::error::CatalogError,
    config::CatalogSourceConfig,
    domain::model::{Artist, Playlist, Track},
};

/// The raw dataset document: three top-level collections, each optional.
#[derive(Debug, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
}

/// Knows the candidate locations of the dataset file.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    candidates: Vec<PathBuf>,
}

impl DatasetSource {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn from_config(config: &CatalogSourceConfig) -> Self {
        Self::new(config.data_paths.clone())
    }

    /// Tries the candidate paths in order; the first one that reads and
    /// parses wins. An unreadable or malformed candidate is skipped, not
    /// fatal; only exhausting the whole list is an error.
    pub fn load(&self) -> Result<Dataset, CatalogError> {
        for path in &self.candidates {
            let contents = match std::fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(e) => {
                    debug!("dataset candidate {} unreadable: {e}", path.display());
                    continue;
                }
            };

            match serde_json::from_str::<Dataset>(&contents) {
                Ok(dataset) => {
                    info!(
                        "loaded dataset from {} ({} tracks)",
                        path.display(),
                        dataset.tracks.len()
                    );
                    return Ok(dataset);
                }
                Err(e) => {
                    warn!("dataset candidate {} is not valid JSON: {e}", path.display());
                }
            }
        }

        Err(CatalogError::DatasetUnreachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const DATA: &str = r#"{
        "tracks": [
            {"id": 1, "title": "First", "artist": "A"},
            {"id": 2, "title": "Second", "artist": "B"}
        ],
        "artists": [{"id": 10, "name": "A"}],
        "playlists": []
    }"#;

    #[test]
    fn first_readable_candidate_wins() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let missing = dir.path().join("nope.json");
        let present = dir.path().join("data.json");
        fs::write(&present, DATA)?;

        let source = DatasetSource::new(vec![missing, present]);
        let dataset = source.load()?;

        assert_eq!(dataset.tracks.len(), 2);
        assert_eq!(dataset.artists.len(), 1);
        Ok(())
    }

    #[test]
    fn malformed_candidate_is_skipped() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let broken = dir.path().join("broken.json");
        let good = dir.path().join("good.json");
        fs::write(&broken, "{not json")?;
        fs::write(&good, DATA)?;

        let source = DatasetSource::new(vec![broken, good]);
        let dataset = source.load()?;

        assert_eq!(dataset.tracks.len(), 2);
        Ok(())
    }

    #[test]
    fn all_candidates_failing_reports_unreachable() {
        let source = DatasetSource::new(vec![
            PathBuf::from("/definitely/not/here.json"),
            PathBuf::from("/also/not/here.json"),
        ]);

        let err = source.load().unwrap_err();
        assert!(matches!(err, CatalogError::DatasetUnreachable));
    }

    #[test]
    fn missing_collections_default_to_empty() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"tracks": []}"#)?;

        let dataset = DatasetSource::new(vec![path]).load()?;
        assert!(dataset.artists.is_empty());
        assert!(dataset.playlists.is_empty());
        Ok(())
    }
}
