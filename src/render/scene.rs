//! Frame composition: turns a session, a screen transform and a playback time
//! into a backend-independent display list.

use crate::foundation::core::{BezPath, Canvas, Point, Rect, Rgba8};
use crate::geometry::transform::ScreenTransform;
use crate::model::session::VisualizationSession;
use crate::model::trace::{CornerAnnotation, Trace, TrackOutline};

/// How a text label is positioned relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Centered horizontally and vertically on the anchor.
    Center,
    /// Centered horizontally, bottom edge on the anchor.
    Above,
}

/// One drawing command. Strokes use round joins and caps.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear(Rgba8),
    Stroke {
        path: BezPath,
        width: f64,
        color: Rgba8,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Rgba8,
    },
    FillRect {
        rect: Rect,
        color: Rgba8,
    },
    Text {
        text: String,
        anchor: Point,
        size: f32,
        bold: bool,
        color: Rgba8,
        align: TextAlign,
    },
}

/// Where a trace's marker sits in a rendered frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub code: String,
    /// Sample index shown.
    pub frame: usize,
    /// Marker center in surface pixels.
    pub position: Point,
}

/// A fully composed frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub ops: Vec<DrawOp>,
    pub markers: Vec<Marker>,
    /// `current_time / max_duration`, for the progress indicator.
    pub progress: f64,
}

/// Colors and sizes of every scene element.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneStyle {
    pub background: Rgba8,
    pub track_border: Rgba8,
    pub track_border_width: f64,
    pub track_surface: Rgba8,
    pub track_surface_width: f64,
    pub corner_connector: Rgba8,
    pub corner_disc: Rgba8,
    pub corner_disc_radius: f64,
    pub corner_text: Rgba8,
    pub corner_text_size: f32,
    pub trajectory_width: f64,
    pub marker_radius: f64,
    pub marker_outline: Rgba8,
    pub marker_outline_radius: f64,
    pub marker_outline_width: f64,
    pub marker_label: Rgba8,
    pub marker_label_size: f32,
    /// Gap between the marker center and its label's bottom edge.
    pub marker_label_gap: f64,
    pub progress_bar: bool,
    pub progress_bar_height: f64,
    pub progress_track: Rgba8,
    pub progress_fill: Rgba8,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(0x12, 0x12, 0x1a),
            track_border: Rgba8::rgb(0x88, 0x88, 0x88),
            track_border_width: 18.0,
            track_surface: Rgba8::rgb(0x2e, 0x2e, 0x2e),
            track_surface_width: 12.0,
            corner_connector: Rgba8::rgba(255, 255, 255, 64),
            corner_disc: Rgba8::rgb(0x44, 0x44, 0x44),
            corner_disc_radius: 10.0,
            corner_text: Rgba8::WHITE,
            corner_text_size: 9.0,
            trajectory_width: 2.0,
            marker_radius: 6.0,
            marker_outline: Rgba8::WHITE,
            marker_outline_radius: 7.0,
            marker_outline_width: 1.5,
            marker_label: Rgba8::WHITE,
            marker_label_size: 10.0,
            marker_label_gap: 9.0,
            progress_bar: true,
            progress_bar_height: 4.0,
            progress_track: Rgba8::rgb(0x22, 0x22, 0x22),
            progress_fill: Rgba8::rgb(0xff, 0x17, 0x44),
        }
    }
}

/// Composes frames. Holds only styling, so one renderer serves any session.
#[derive(Clone, Debug, Default)]
pub struct SceneRenderer {
    style: SceneStyle,
}

impl SceneRenderer {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut SceneStyle {
        &mut self.style
    }

    /// Draw background, track, corners and every trace as of `current_time`.
    pub fn render(
        &self,
        session: &VisualizationSession,
        transform: &ScreenTransform,
        canvas: Canvas,
        current_time: f64,
        progress: f64,
    ) -> Scene {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut ops = vec![DrawOp::Clear(self.style.background)];

        self.track_ops(session.track(), transform, &mut ops);
        for corner in session.corners() {
            self.corner_ops(corner, transform, &mut ops);
        }
        let markers = session
            .traces()
            .iter()
            .map(|trace| self.trace_ops(trace, transform, current_time, &mut ops))
            .collect();
        if self.style.progress_bar {
            self.progress_ops(canvas, progress, &mut ops);
        }

        Scene {
            canvas,
            ops,
            markers,
            progress,
        }
    }

    fn track_ops(&self, track: &TrackOutline, transform: &ScreenTransform, ops: &mut Vec<DrawOp>) {
        let mut path = polyline(track.points().iter().map(|p| transform.apply(*p)));
        path.close_path();
        ops.push(DrawOp::Stroke {
            path: path.clone(),
            width: self.style.track_border_width,
            color: self.style.track_border,
        });
        ops.push(DrawOp::Stroke {
            path,
            width: self.style.track_surface_width,
            color: self.style.track_surface,
        });
    }

    fn corner_ops(
        &self,
        corner: &CornerAnnotation,
        transform: &ScreenTransform,
        ops: &mut Vec<DrawOp>,
    ) {
        let on_track = transform.apply(corner.track);
        let label = transform.apply(corner.label);
        ops.push(DrawOp::Stroke {
            path: polyline([on_track, label]),
            width: 1.0,
            color: self.style.corner_connector,
        });
        ops.push(DrawOp::FillCircle {
            center: label,
            radius: self.style.corner_disc_radius,
            color: self.style.corner_disc,
        });
        ops.push(DrawOp::Text {
            text: corner.number.clone(),
            anchor: label,
            size: self.style.corner_text_size,
            bold: false,
            color: self.style.corner_text,
            align: TextAlign::Center,
        });
    }

    fn trace_ops(
        &self,
        trace: &Trace,
        transform: &ScreenTransform,
        current_time: f64,
        ops: &mut Vec<DrawOp>,
    ) -> Marker {
        let frame = trace.frame_at(current_time);
        let color = trace.color();

        if frame > 0 {
            ops.push(DrawOp::Stroke {
                path: polyline(trace.points()[..=frame].iter().map(|p| transform.apply(*p))),
                width: self.style.trajectory_width,
                color,
            });
        }

        let center = transform.apply(trace.points()[frame]);
        ops.push(DrawOp::FillCircle {
            center,
            radius: self.style.marker_radius,
            color,
        });
        ops.push(DrawOp::StrokeCircle {
            center,
            radius: self.style.marker_outline_radius,
            width: self.style.marker_outline_width,
            color: self.style.marker_outline,
        });
        ops.push(DrawOp::Text {
            text: trace.code().to_owned(),
            anchor: Point::new(center.x, center.y - self.style.marker_label_gap),
            size: self.style.marker_label_size,
            bold: true,
            color: self.style.marker_label,
            align: TextAlign::Above,
        });

        Marker {
            code: trace.code().to_owned(),
            frame,
            position: center,
        }
    }

    fn progress_ops(&self, canvas: Canvas, progress: f64, ops: &mut Vec<DrawOp>) {
        let w = canvas.width_f64();
        let h = canvas.height_f64();
        let top = (h - self.style.progress_bar_height).max(0.0);
        ops.push(DrawOp::FillRect {
            rect: Rect::new(0.0, top, w, h),
            color: self.style.progress_track,
        });
        if progress > 0.0 {
            ops.push(DrawOp::FillRect {
                rect: Rect::new(0.0, top, w * progress, h),
                color: self.style.progress_fill,
            });
        }
    }
}

fn polyline(points: impl IntoIterator<Item = Point>) -> BezPath {
    let mut path = BezPath::new();
    for (i, p) in points.into_iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
