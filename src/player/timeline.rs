/// Timer-driven stand-in for a real audio timeline, advancing one unit
/// per tick up to a nominal duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedTimeline {
    pub position: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Advanced,
    Finished,
}

impl SimulatedTimeline {
    pub fn new(duration: u32) -> Self {
        Self {
            position: 0,
            duration,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.position += 1;
        if self.position >= self.duration {
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    pub fn seek_fraction(&mut self, fraction: f64) {
        let fraction = fraction.clamp(0.0, 1.0);
        self.position = (fraction * f64::from(self.duration)) as u32;
    }

    pub fn progress(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        f64::from(self.position) / f64::from(self.duration)
    }
}

/// The single active playback timeline. Only one variant exists at a
/// time, so two timelines can never drive the progress display at once.
#[derive(Debug)]
pub enum PlaybackSource {
    /// The real audio output owns the timeline.
    Real,
    Simulated(SimulatedTimeline),
}

/// Renders whole seconds as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
