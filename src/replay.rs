//! Replay context: the one place where session, clock, rotation and surface
//! size live together.
//!
//! Host events (resize, rotate, play, tick, seek, a new visualize request)
//! are methods on [`Replay`]; [`Replay::draw`] composes the current frame.

pub mod export;

pub use export::{ExportStats, export_playback};

use crate::foundation::core::Canvas;
use crate::foundation::error::ReplayResult;
use crate::geometry::transform::{ScreenTransform, fit_transform};
use crate::model::session::VisualizationSession;
use crate::playback::clock::{PlaybackClock, PlaybackState, TickOutcome};
use crate::render::scene::{Scene, SceneRenderer};
use crate::rotation::control::{ROTATION_STEP, RotationControl};
use crate::rotation::store::RotationStore;

/// Circuit identity used to key the stored rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Circuit<'a> {
    pub year: &'a str,
    pub event: &'a str,
}

pub struct Replay<S> {
    session: Option<VisualizationSession>,
    clock: PlaybackClock,
    rotation: RotationControl<S>,
    canvas: Canvas,
    renderer: SceneRenderer,
    // Cleared on session, size or rotation change; ticks leave it alone.
    transform: Option<ScreenTransform>,
}

impl<S: RotationStore> Replay<S> {
    pub fn new(store: S, canvas: Canvas) -> Self {
        Self::with_renderer(store, canvas, SceneRenderer::default())
    }

    pub fn with_renderer(store: S, canvas: Canvas, renderer: SceneRenderer) -> Self {
        Self {
            session: None,
            clock: PlaybackClock::new(0.0),
            rotation: RotationControl::new(store),
            canvas,
            renderer,
            transform: None,
        }
    }

    /// Replace whatever was shown with `session`.
    ///
    /// Playback rewinds and pauses (the speed is kept). With a circuit the
    /// stored rotation for it is loaded; without one rotation starts at `0`
    /// and is not persisted.
    pub fn visualize(&mut self, session: VisualizationSession, circuit: Option<Circuit<'_>>) {
        self.clock.reset(session.max_duration());
        match circuit {
            Some(c) => {
                self.rotation.load(c.year, c.event);
            }
            None => self.rotation.detach(),
        }
        tracing::debug!(
            traces = session.traces().len(),
            max_duration = session.max_duration(),
            rotation = self.rotation.angle(),
            "visualizing session"
        );
        self.session = Some(session);
        self.transform = None;
    }

    pub fn session(&self) -> Option<&VisualizationSession> {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn resize(&mut self, canvas: Canvas) {
        if canvas != self.canvas {
            self.canvas = canvas;
            self.transform = None;
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation.angle()
    }

    pub fn rotation_control(&self) -> &RotationControl<S> {
        &self.rotation
    }

    pub fn rotate(&mut self, delta: f64) -> ReplayResult<f64> {
        self.transform = None;
        self.rotation.rotate(delta)
    }

    pub fn rotate_left(&mut self) -> ReplayResult<f64> {
        self.rotate(-ROTATION_STEP)
    }

    pub fn rotate_right(&mut self) -> ReplayResult<f64> {
        self.rotate(ROTATION_STEP)
    }

    pub fn reset_rotation(&mut self) -> ReplayResult<()> {
        self.transform = None;
        self.rotation.reset()
    }

    pub fn play(&mut self) {
        if self.session.is_some() {
            self.clock.play();
        }
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Returns the new `playing` flag. Without a session nothing starts.
    pub fn toggle(&mut self) -> bool {
        if self.session.is_none() {
            return false;
        }
        self.clock.toggle()
    }

    pub fn tick(&mut self, host_ms: f64) -> TickOutcome {
        self.clock.tick(host_ms)
    }

    pub fn seek(&mut self, time: f64) {
        self.clock.seek(time);
    }

    pub fn seek_fraction(&mut self, fraction: f64) {
        self.clock.seek_fraction(fraction);
    }

    pub fn set_speed(&mut self, speed: f64) -> ReplayResult<()> {
        self.clock.set_speed(speed)
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    pub fn renderer_mut(&mut self) -> &mut SceneRenderer {
        &mut self.renderer
    }

    /// `true` when the next draw will rebuild the screen transform.
    pub fn transform_is_stale(&self) -> bool {
        self.transform.is_none()
    }

    /// Current screen transform, rebuilt if an input changed. `None` without a
    /// session.
    pub fn transform(&mut self) -> Option<ScreenTransform> {
        let session = self.session.as_ref()?;
        let rotation = self.rotation.angle();
        let canvas = self.canvas;
        Some(
            *self
                .transform
                .get_or_insert_with(|| fit_transform(session.fit_points(), canvas, rotation)),
        )
    }

    /// Compose the frame for the current time. `None` while nothing is loaded.
    pub fn draw(&mut self) -> Option<Scene> {
        let transform = self.transform()?;
        let session = self.session.as_ref()?;
        Some(self.renderer.render(
            session,
            &transform,
            self.canvas,
            self.clock.current_time(),
            self.clock.progress(),
        ))
    }
}

#[cfg(test)]
#[path = "../tests/unit/replay/context.rs"]
mod tests;
