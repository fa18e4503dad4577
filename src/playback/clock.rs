use crate::foundation::error::{ReplayError, ReplayResult};

/// Speed multipliers offered by the playback controls.
pub const SPEED_PRESETS: [f64; 4] = [0.5, 1.0, 2.0, 4.0];

/// Snapshot of the playback controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Seconds into the replay, within `[0, max_duration]`.
    pub current_time: f64,
    pub playing: bool,
    pub speed: f64,
}

/// What the host should do after delivering a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is paused; the tick was ignored and nothing is scheduled.
    Idle,
    /// Time advanced; redraw and schedule another tick.
    Continue,
    /// Time reached the end; redraw once more and stop scheduling.
    Finished,
}

/// Time-driven playback clock.
///
/// The clock integrates elapsed host time scaled by the speed multiplier, so
/// every trace advances on one shared time axis regardless of frame rate.
/// Host timestamps are milliseconds, as delivered by per-frame callbacks.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    max_duration: f64,
    current_time: f64,
    speed: f64,
    playing: bool,
    // Reference timestamp of the previous tick in the current playing
    // interval; `None` until the first tick after `play`.
    last_host_ms: Option<f64>,
    tick_pending: bool,
}

impl PlaybackClock {
    pub fn new(max_duration: f64) -> Self {
        Self {
            max_duration: sanitize_duration(max_duration),
            current_time: 0.0,
            speed: 1.0,
            playing: false,
            last_host_ms: None,
            tick_pending: false,
        }
    }

    /// Rewind for a newly loaded session. Keeps the speed multiplier.
    pub fn reset(&mut self, max_duration: f64) {
        *self = Self {
            speed: self.speed,
            ..Self::new(max_duration)
        };
    }

    pub fn play(&mut self) {
        if self.playing {
            return;
        }
        self.playing = true;
        self.last_host_ms = None;
        self.tick_pending = true;
    }

    /// Stop advancing and cancel the scheduled tick.
    pub fn pause(&mut self) {
        self.playing = false;
        self.last_host_ms = None;
        self.tick_pending = false;
    }

    /// Flip between playing and paused; returns the new `playing` flag.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
        self.playing
    }

    /// Advance by the host time elapsed since the previous tick.
    ///
    /// The first tick after `play` only records the reference timestamp so
    /// time spent paused never counts. A host clock that steps backwards
    /// contributes zero.
    pub fn tick(&mut self, host_ms: f64) -> TickOutcome {
        if !self.playing {
            return TickOutcome::Idle;
        }
        self.tick_pending = false;

        let delta_s = match self.last_host_ms {
            None => 0.0,
            Some(prev) => ((host_ms - prev).max(0.0) / 1000.0) * self.speed,
        };
        self.last_host_ms = Some(host_ms);
        self.current_time += delta_s;

        if self.current_time >= self.max_duration {
            self.current_time = self.max_duration;
            self.pause();
            return TickOutcome::Finished;
        }
        self.tick_pending = true;
        TickOutcome::Continue
    }

    /// Jump to `time` seconds, clamped into `[0, max_duration]`. Does not
    /// change the play state.
    pub fn seek(&mut self, time: f64) {
        self.current_time = if time.is_nan() {
            0.0
        } else {
            time.clamp(0.0, self.max_duration)
        };
    }

    /// Jump to a fraction of the replay (progress-bar click), clamped to `[0, 1]`.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let f = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek(f * self.max_duration);
    }

    /// Change the multiplier for subsequently measured deltas.
    pub fn set_speed(&mut self, speed: f64) -> ReplayResult<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ReplayError::validation(format!(
                "speed multiplier must be finite and > 0, got {speed}"
            )));
        }
        self.speed = speed;
        Ok(())
    }

    /// `true` while a tick is scheduled with the host.
    pub fn wants_tick(&self) -> bool {
        self.tick_pending
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// `current_time / max_duration`; zero for an empty replay.
    pub fn progress(&self) -> f64 {
        if self.max_duration > 0.0 {
            self.current_time / self.max_duration
        } else {
            0.0
        }
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_time: self.current_time,
            playing: self.playing,
            speed: self.speed,
        }
    }
}

fn sanitize_duration(d: f64) -> f64 {
    if d.is_finite() { d.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
