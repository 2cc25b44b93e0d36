use thiserror::Error;

#[derive(Debug, Error)]
#[error("audio output refused to start: {0}")]
pub struct PlaybackStartError(pub String);

/// Seam to whatever audio element the host environment provides.
///
/// The controller only ever drives one output. `play` is allowed to
/// fail; the controller reacts by falling back to its simulated
/// timeline.
pub trait AudioOutput {
    fn load(&mut self, src: &str);
    fn play(&mut self) -> Result<(), PlaybackStartError>;
    fn pause(&mut self);
    /// Absolute position in seconds.
    fn seek(&mut self, seconds: f64);
    fn position(&self) -> f64;
    /// None until the loaded source reports a duration.
    fn duration(&self) -> Option<f64>;
    /// Gain in 0.0..=1.0.
    fn set_volume(&mut self, gain: f64);
}

/// Output with no device behind it. Never starts, which pushes every
/// track onto the simulated timeline.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn load(&mut self, src: &str) {
        log::debug!("null audio: load {src} ignored");
    }

    fn play(&mut self) -> Result<(), PlaybackStartError> {
        Err(PlaybackStartError("no audio device bound".to_string()))
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _seconds: f64) {}

    fn position(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> Option<f64> {
        None
    }

    fn set_volume(&mut self, _gain: f64) {}
}
