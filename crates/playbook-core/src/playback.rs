//! Playback clock for the step animation.
//!
//! The host drives the clock with frame deltas (the browser original used an
//! animation-frame callback); the clock turns elapsed time into a normalized,
//! eased progress value and reports step transitions.

use crate::interpolate::ease_in_out_cubic;

/// What a playback tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Not playing.
    Idle,
    /// Still inside the current step.
    Playing,
    /// The current step finished; playback moves to the given step index.
    AdvanceTo(usize),
    /// The last step finished and looping is off; playback halted.
    Halted,
}

/// Cooperative playback clock.
#[derive(Debug, Clone, Default)]
pub struct Playback {
    playing: bool,
    looping: bool,
    /// Seconds elapsed inside the current step.
    elapsed: f64,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) playback.
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Pause, keeping the position inside the current step.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Stop and rewind to the start of the current step.
    pub fn stop(&mut self) {
        self.playing = false;
        self.elapsed = 0.0;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Normalized progress through the current step, eased.
    pub fn progress(&self, step_duration: f64) -> f64 {
        if step_duration <= 0.0 {
            return 1.0;
        }
        ease_in_out_cubic(self.elapsed / step_duration)
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// `current` and `step_count` describe the step sequence; `step_duration`
    /// is the current step's duration in seconds. On step completion the clock
    /// rewinds and reports where playback goes next.
    pub fn tick(
        &mut self,
        dt: f64,
        current: usize,
        step_count: usize,
        step_duration: f64,
    ) -> PlaybackEvent {
        if !self.playing {
            return PlaybackEvent::Idle;
        }

        self.elapsed += dt.max(0.0);
        if self.elapsed < step_duration {
            return PlaybackEvent::Playing;
        }

        self.elapsed = 0.0;
        if current + 1 < step_count {
            PlaybackEvent::AdvanceTo(current + 1)
        } else if self.looping {
            PlaybackEvent::AdvanceTo(0)
        } else {
            self.playing = false;
            PlaybackEvent::Halted
        }
    }
}
