use crate::foundation::core::{Affine, Canvas, Point, Rect};

/// Margin kept between the fitted point set and the surface edge on the
/// constraining axis.
pub const FIT_PADDING: f64 = 15.0;

// Extents below this are treated as a single point on that axis.
const DEGENERATE_EXTENT: f64 = 1e-12;

/// Raw track coordinates → surface pixels.
///
/// Rotation about the origin, uniform scale, vertical flip (track Y grows up,
/// surface Y grows down) and centering collapse into one affine map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTransform {
    affine: Affine,
    scale: f64,
    rotation: f64,
}

impl ScreenTransform {
    pub fn apply(&self, p: Point) -> Point {
        self.affine * p
    }

    pub fn apply_xy(&self, x: f64, y: f64) -> Point {
        self.apply(Point::new(x, y))
    }

    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// Uniform pixels-per-unit factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }
}

/// Rotate `p` about the origin by `theta` radians.
pub fn rotate_point(p: Point, theta: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    Point::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Fit `points`, rotated by `rotation`, into `canvas` with [`FIT_PADDING`].
///
/// The scale is `min(scale_x, scale_y)` so the aspect ratio is kept. An axis
/// with zero extent has no scale of its own and defers to the other axis; if
/// both are degenerate the scale is `1.0`. An empty point set centers the
/// origin.
pub fn fit_transform(
    points: impl IntoIterator<Item = Point>,
    canvas: Canvas,
    rotation: f64,
) -> ScreenTransform {
    let rotation = if rotation.is_finite() { rotation } else { 0.0 };
    let bounds = rotated_bounds(points, rotation).unwrap_or(Rect::ZERO);

    let w = canvas.width_f64();
    let h = canvas.height_f64();
    let avail_w = (w - 2.0 * FIT_PADDING).max(0.0);
    let avail_h = (h - 2.0 * FIT_PADDING).max(0.0);

    let axis_scale = |avail: f64, extent: f64| (extent > DEGENERATE_EXTENT).then(|| avail / extent);
    let scale = match (
        axis_scale(avail_w, bounds.width()),
        axis_scale(avail_h, bounds.height()),
    ) {
        (Some(sx), Some(sy)) => sx.min(sy),
        (Some(s), None) | (None, Some(s)) => s,
        (None, None) => 1.0,
    };

    let offset_x = (w - bounds.width() * scale) / 2.0 - bounds.x0 * scale;
    let offset_y = (h + (bounds.y1 + bounds.y0) * scale) / 2.0;

    let affine = Affine::translate((offset_x, offset_y))
        * Affine::scale_non_uniform(scale, -scale)
        * Affine::rotate(rotation);

    tracing::debug!(scale, rotation, w, h, "screen transform recomputed");
    ScreenTransform {
        affine,
        scale,
        rotation,
    }
}

fn rotated_bounds(points: impl IntoIterator<Item = Point>, rotation: f64) -> Option<Rect> {
    points
        .into_iter()
        .map(|p| rotate_point(p, rotation))
        .fold(None, |acc: Option<Rect>, p| {
            Some(match acc {
                None => Rect::from_points(p, p),
                Some(r) => r.union_pt(p),
            })
        })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/transform.rs"]
mod tests;
