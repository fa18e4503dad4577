use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::playback::frame::frame_for_time;

/// Closed reference path shared by every trace of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackOutline {
    points: Vec<Point>,
}

impl TrackOutline {
    pub fn new(x: &[f64], y: &[f64]) -> ReplayResult<Self> {
        if x.len() != y.len() {
            return Err(ReplayError::validation(format!(
                "track x/y length mismatch ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(ReplayError::data_unavailable("track outline has no points"));
        }
        let points = zip_points(x, y)?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// Labeled reference point on the outline plus its label position.
#[derive(Clone, Debug, PartialEq)]
pub struct CornerAnnotation {
    pub number: String,
    pub track: Point,
    pub label: Point,
}

/// One vehicle's recorded traversal.
///
/// Invariants: at least one sample, and sample times never decrease.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    code: String,
    color: Rgba8,
    points: Vec<Point>,
    times: Vec<f64>,
}

impl Trace {
    pub fn new(
        code: impl Into<String>,
        color: Rgba8,
        x: &[f64],
        y: &[f64],
        t: &[f64],
    ) -> ReplayResult<Self> {
        let code = code.into();
        if x.len() != y.len() || x.len() != t.len() {
            return Err(ReplayError::validation(format!(
                "trace '{code}': x/y/t lengths differ ({}, {}, {})",
                x.len(),
                y.len(),
                t.len()
            )));
        }
        if t.is_empty() {
            return Err(ReplayError::data_unavailable(format!(
                "trace '{code}' has no samples"
            )));
        }
        if t.iter().any(|v| !v.is_finite()) {
            return Err(ReplayError::validation(format!(
                "trace '{code}': non-finite sample time"
            )));
        }
        if let Some(i) = t.windows(2).position(|w| w[1] < w[0]) {
            return Err(ReplayError::validation(format!(
                "trace '{code}': time decreases at sample {}",
                i + 1
            )));
        }
        let points = zip_points(x, y)?;
        Ok(Self {
            code,
            color,
            points,
            times: t.to_vec(),
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn color(&self) -> Rgba8 {
        self.color
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the final sample.
    pub fn end_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// Sample index shown at playback time `time`.
    pub fn frame_at(&self, time: f64) -> usize {
        frame_for_time(&self.times, time)
    }

    pub fn position_at(&self, time: f64) -> Point {
        self.points[self.frame_at(time)]
    }
}

fn zip_points(x: &[f64], y: &[f64]) -> ReplayResult<Vec<Point>> {
    x.iter()
        .zip(y)
        .map(|(&x, &y)| {
            if x.is_finite() && y.is_finite() {
                Ok(Point::new(x, y))
            } else {
                Err(ReplayError::validation("non-finite coordinate"))
            }
        })
        .collect()
}
