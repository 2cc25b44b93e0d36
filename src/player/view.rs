use crate::catalog::format::FormattedTrack;

/// The named UI regions a hosting view is expected to provide. Mirrors
/// the fixed element set the transport binds to at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    TrackTitle,
    TrackArtist,
    CoverThumb,
    PlayPause,
    PrevTrack,
    NextTrack,
    Progress,
    CurrentTime,
    TotalTime,
    PlaylistContainer,
    /// The volume slider is the one optional region.
    Volume,
}

pub const REQUIRED_REGIONS: &[Region] = &[
    Region::TrackTitle,
    Region::TrackArtist,
    Region::CoverThumb,
    Region::PlayPause,
    Region::PrevTrack,
    Region::NextTrack,
    Region::Progress,
    Region::CurrentTime,
    Region::TotalTime,
    Region::PlaylistContainer,
];

/// Rendering collaborator of the player. Implementations translate
/// these calls into whatever presentation they own (terminal lines,
/// DOM updates through a bridge, a test recording).
pub trait PlayerView {
    /// Regions this view failed to bind. Any required region listed
    /// here disables the whole controller.
    fn missing_regions(&self) -> Vec<Region>;

    fn render_playlist(&mut self, tracks: &[FormattedTrack]);
    fn show_empty_message(&mut self);
    /// Update the title/artist/cover regions for the loaded track.
    fn show_track(&mut self, track: &FormattedTrack);
    /// Informational labels for a track that can only be simulated.
    fn show_demo_notice(&mut self, track: &FormattedTrack);
    fn set_transport_enabled(&mut self, enabled: bool);
    fn set_playing(&mut self, playing: bool);
    fn set_progress(&mut self, fraction: f64, position: &str, total: &str);
    fn highlight(&mut self, index: usize);
}
