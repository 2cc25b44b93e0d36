use log::{error, warn};

use crate::{
    catalog::format::FormattedTrack,
    config::PlayerConfig,
    player::{
        audio::AudioOutput,
        timeline::{PlaybackSource, SimulatedTimeline, TickOutcome, format_time},
        view::{PlayerView, REQUIRED_REGIONS},
    },
};

/// Transport state machine over a working track list.
///
/// Owns the view-local copy of the list, the current index, and the
/// single active playback timeline. The audio output and the view are
/// injected collaborators; if the view is missing any required region
/// the whole controller is disabled at construction and every call
/// becomes a no-op.
pub struct Player {
    tracks: Vec<FormattedTrack>,
    index: usize,
    playing: bool,
    enabled: bool,
    volume: u8,
    simulated_duration: u32,
    source: Option<PlaybackSource>,
    audio: Box<dyn AudioOutput>,
    view: Box<dyn PlayerView>,
}

impl Player {
    pub fn new(audio: Box<dyn AudioOutput>, view: Box<dyn PlayerView>, config: &PlayerConfig) -> Self {
        let missing: Vec<_> = view
            .missing_regions()
            .into_iter()
            .filter(|region| REQUIRED_REGIONS.contains(region))
            .collect();
        let enabled = missing.is_empty();
        if !enabled {
            // all-or-nothing wiring: a partially bound view would leave
            // the transport in a confusing half-working state
            error!("player disabled, missing view regions: {missing:?}");
        }

        let mut player = Self {
            tracks: Vec::new(),
            index: 0,
            playing: false,
            enabled,
            volume: config.volume.min(100),
            simulated_duration: config.simulated_duration_secs,
            source: None,
            audio,
            view,
        };
        let gain = f64::from(player.volume) / 100.0;
        player.audio.set_volume(gain);
        player
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_track(&self) -> Option<&FormattedTrack> {
        self.tracks.get(self.index)
    }

    pub fn source(&self) -> Option<&PlaybackSource> {
        self.source.as_ref()
    }

    /// Replaces the working list and loads its first track. An empty
    /// replacement only shows the empty-state message; the previous
    /// list stays in place.
    pub fn set_track_list(&mut self, tracks: Vec<FormattedTrack>) {
        if !self.enabled {
            return;
        }
        if tracks.is_empty() {
            self.view.show_empty_message();
            return;
        }

        self.stop_timeline();
        self.playing = false;
        self.tracks = tracks;
        self.view.render_playlist(&self.tracks);
        self.load_track(0);
    }

    /// Loads the track at `index`, treating the list as circular: one
    /// step past either end wraps around.
    pub fn load_track(&mut self, index: isize) {
        if !self.enabled || self.tracks.is_empty() {
            return;
        }

        let len = self.tracks.len() as isize;
        self.index = if index < 0 {
            (len - 1) as usize
        } else if index >= len {
            0
        } else {
            index as usize
        };

        let track = self.tracks[self.index].clone();
        self.view.show_track(&track);

        match &track.audio_src {
            None => {
                // demo mode: nothing to hand the audio output, no
                // timeline until play() falls back to simulation
                self.view.show_demo_notice(&track);
                self.view.set_transport_enabled(false);
            }
            Some(src) => {
                self.view.set_transport_enabled(true);
                self.audio.load(src);
            }
        }
    }

    /// Starts playback of the current track. A track without an audio
    /// source, or a real output that refuses to start, runs on the
    /// simulated timeline instead.
    pub fn play(&mut self) {
        if !self.enabled || self.tracks.is_empty() {
            return;
        }

        if self.tracks[self.index].audio_src.is_none() {
            self.start_simulated();
            return;
        }

        // drop any leftover simulated timeline before the real output starts
        if matches!(self.source, Some(PlaybackSource::Simulated(_))) {
            self.source = None;
        }

        match self.audio.play() {
            Ok(()) => {
                self.source = Some(PlaybackSource::Real);
                self.playing = true;
                self.view.set_playing(true);
                self.view.highlight(self.index);
            }
            Err(e) => {
                warn!("playback start refused ({e}); falling back to simulation");
                self.start_simulated();
            }
        }
    }

    /// Stops the active timeline without resetting its position.
    pub fn pause(&mut self) {
        if !self.enabled {
            return;
        }
        if let Some(PlaybackSource::Real) = &self.source {
            self.audio.pause();
        }
        self.playing = false;
        self.view.set_playing(false);
    }

    pub fn toggle(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        if !self.enabled || self.tracks.is_empty() {
            return;
        }
        let was_playing = self.playing;
        self.stop_timeline();
        let target = self.index as isize + delta;
        self.load_track(target);
        if was_playing {
            self.play();
        }
    }

    /// Maps a normalized position (a click on the progress track) to the
    /// active timeline.
    pub fn seek(&mut self, fraction: f64) {
        if !self.enabled {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        match &mut self.source {
            Some(PlaybackSource::Real) => {
                if let Some(duration) = self.audio.duration() {
                    self.audio.seek(fraction * duration);
                }
            }
            Some(PlaybackSource::Simulated(timeline)) => {
                timeline.seek_fraction(fraction);
            }
            None => return,
        }
        self.push_progress();
    }

    /// 0-100 control range, mapped linearly to the real output's gain.
    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        self.audio.set_volume(f64::from(self.volume) / 100.0);
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// One timeline tick, nominally a second. Advances the simulated
    /// timeline, polls the real output, and auto-advances at the end of
    /// either. No-op while paused.
    pub fn tick(&mut self) {
        if !self.enabled || !self.playing {
            return;
        }

        let finished = match &mut self.source {
            Some(PlaybackSource::Simulated(timeline)) => {
                matches!(timeline.tick(), TickOutcome::Finished)
            }
            Some(PlaybackSource::Real) => self
                .audio
                .duration()
                .is_some_and(|duration| self.audio.position() >= duration),
            None => return,
        };

        self.push_progress();
        if finished {
            self.next();
        }
    }

    /// Hook for the real output's end-of-track event.
    pub fn on_track_ended(&mut self) {
        if !self.enabled {
            return;
        }
        if let Some(PlaybackSource::Real) = &self.source {
            self.next();
        }
    }

    fn start_simulated(&mut self) {
        self.stop_timeline();
        self.source = Some(PlaybackSource::Simulated(SimulatedTimeline::new(
            self.simulated_duration,
        )));
        self.playing = true;
        self.view.set_playing(true);
        self.view.highlight(self.index);
        self.push_progress();
    }

    /// Deterministically cancels whichever timeline is live. Dropping
    /// the simulated variant is its cancellation; the real output gets
    /// an explicit pause.
    fn stop_timeline(&mut self) {
        if let Some(PlaybackSource::Real) = self.source.take() {
            self.audio.pause();
        }
    }

    fn push_progress(&mut self) {
        let (fraction, position, total) = match &self.source {
            Some(PlaybackSource::Simulated(timeline)) => {
                (timeline.progress(), timeline.position, timeline.duration)
            }
            Some(PlaybackSource::Real) => {
                let duration = self.audio.duration().unwrap_or(0.0);
                let position = self.audio.position();
                let fraction = if duration > 0.0 { position / duration } else { 0.0 };
                (fraction, position as u32, duration as u32)
            }
            None => return,
        };

        self.view
            .set_progress(fraction, &format_time(position), &format_time(total));
    }
}
