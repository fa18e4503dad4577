use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::model::trace::{CornerAnnotation, Trace, TrackOutline};
use crate::model::wire::{CornerDoc, PositionBundle};

/// Everything one replay shows: traces sharing a track and its corners.
///
/// Sessions are immutable values; loading new data builds a new session that
/// replaces the previous one wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizationSession {
    track: TrackOutline,
    corners: Vec<CornerAnnotation>,
    traces: Vec<Trace>,
    max_duration: f64,
}

impl VisualizationSession {
    pub fn new(
        track: TrackOutline,
        corners: Vec<CornerAnnotation>,
        traces: Vec<Trace>,
    ) -> ReplayResult<Self> {
        if traces.is_empty() {
            return Err(ReplayError::data_unavailable("session has no traces"));
        }
        let max_duration = traces
            .iter()
            .map(Trace::end_time)
            .fold(0.0_f64, f64::max);
        Ok(Self {
            track,
            corners,
            traces,
            max_duration,
        })
    }

    /// Build a session from data-service responses.
    ///
    /// The track and corners come from the first bundle. Drivers whose data is
    /// unusable are skipped with a warning; a session with no usable driver is
    /// `DataUnavailable`.
    #[tracing::instrument(skip(bundles), fields(bundles = bundles.len()))]
    pub fn from_bundles(bundles: &[PositionBundle]) -> ReplayResult<Self> {
        let first = bundles
            .first()
            .ok_or_else(|| ReplayError::data_unavailable("no position bundles"))?;
        let track = TrackOutline::new(&first.track.x, &first.track.y)?;
        let corners = first.corners.iter().map(corner_from_doc).collect();

        let mut traces = Vec::new();
        for doc in bundles.iter().flat_map(PositionBundle::driver_docs) {
            let color = Rgba8::from_hex_or_white(&doc.color);
            match Trace::new(doc.code.clone(), color, &doc.x, &doc.y, &doc.t) {
                Ok(trace) => traces.push(trace),
                Err(e) => tracing::warn!(driver = %doc.code, "skipping trace: {e}"),
            }
        }

        let session = Self::new(track, corners, traces)?;
        tracing::debug!(
            traces = session.traces.len(),
            max_duration = session.max_duration,
            "session loaded"
        );
        Ok(session)
    }

    pub fn track(&self) -> &TrackOutline {
        &self.track
    }

    pub fn corners(&self) -> &[CornerAnnotation] {
        &self.corners
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Latest final sample time over all traces (never negative).
    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    /// Every raw point that must stay on screen: outline, all trace samples
    /// and corner label positions.
    pub fn fit_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.track
            .points()
            .iter()
            .copied()
            .chain(self.traces.iter().flat_map(|t| t.points().iter().copied()))
            .chain(self.corners.iter().map(|c| c.label))
    }
}

fn corner_from_doc(doc: &CornerDoc) -> CornerAnnotation {
    CornerAnnotation {
        number: doc.number.clone(),
        track: Point::new(doc.track_x, doc.track_y),
        label: Point::new(doc.text_x, doc.text_y),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/session.rs"]
mod tests;
