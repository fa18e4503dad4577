use std::path::Path;

use vello_cpu::kurbo::Shape;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{ReplayError, ReplayResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::scene::{DrawOp, Scene, TextAlign};
use crate::render::text::{LabelLayoutEngine, TextBrushRgba8};

// Flattening tolerance for circles, in pixels.
const CIRCLE_TOLERANCE: f64 = 0.1;

/// Options for the CPU backend.
#[derive(Debug, Clone, Default)]
pub struct CpuBackendOpts {
    /// TTF/OTF used for corner numbers and driver codes. Without a font,
    /// labels are skipped.
    pub font_bytes: Option<Vec<u8>>,
}

impl CpuBackendOpts {
    pub fn with_font_file(mut self, path: impl AsRef<Path>) -> ReplayResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ReplayError::render(format!("failed to read font '{}': {e}", path.display()))
        })?;
        self.font_bytes = Some(bytes);
        Ok(self)
    }
}

struct LabelFont {
    engine: LabelLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// Scene rasterizer powered by `vello_cpu`.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    labels: Option<LabelFont>,
    warned_no_font: bool,
}

impl CpuBackend {
    pub fn new(opts: CpuBackendOpts) -> ReplayResult<Self> {
        let labels = match opts.font_bytes {
            Some(bytes) => {
                let engine = LabelLayoutEngine::new(&bytes)?;
                tracing::debug!(family = engine.family_name(), "label font registered");
                let font =
                    vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
                Some(LabelFont { engine, font })
            }
            None => None,
        };
        Ok(Self {
            ctx: None,
            labels,
            warned_no_font: false,
        })
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ReplayResult<R>,
    ) -> ReplayResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        w: f64,
        h: f64,
    ) -> ReplayResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            DrawOp::Clear(color) => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
            }
            DrawOp::Stroke { path, width, color } => {
                ctx.set_stroke(round_stroke(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&bezpath_to_cpu(path));
            }
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&circle_path(*center, *radius));
            }
            DrawOp::StrokeCircle {
                center,
                radius,
                width,
                color,
            } => {
                ctx.set_stroke(round_stroke(*width));
                ctx.set_paint(color_to_cpu(*color));
                ctx.stroke_path(&circle_path(*center, *radius));
            }
            DrawOp::FillRect { rect, color } => {
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawOp::Text {
                text,
                anchor,
                size,
                bold,
                color,
                align,
            } => self.draw_label(ctx, text, *anchor, *size, *bold, *color, *align)?,
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        size: f32,
        bold: bool,
        color: Rgba8,
        align: TextAlign,
    ) -> ReplayResult<()> {
        if self.labels.is_none() && !self.warned_no_font {
            tracing::warn!("no label font configured; skipping text");
            self.warned_no_font = true;
        }
        let Some(labels) = self.labels.as_mut() else {
            return Ok(());
        };
        if text.is_empty() {
            return Ok(());
        }

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = labels.engine.layout(text, size, bold, brush)?;
        let lw = f64::from(layout.width());
        let lh = f64::from(layout.height());
        let origin = match align {
            TextAlign::Center => Point::new(anchor.x - lw / 2.0, anchor.y - lh / 2.0),
            TextAlign::Above => Point::new(anchor.x - lw / 2.0, anchor.y - lh),
        };
        ctx.set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&labels.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render_scene(&mut self, scene: &Scene) -> ReplayResult<FrameRGBA> {
        let width: u16 = scene
            .canvas
            .width
            .try_into()
            .map_err(|_| ReplayError::render("canvas width exceeds u16"))?;
        let height: u16 = scene
            .canvas
            .height
            .try_into()
            .map_err(|_| ReplayError::render("canvas height exceeds u16"))?;
        let (w, h) = (f64::from(width), f64::from(height));

        let data = self.with_ctx_mut(width, height, |backend, ctx| {
            for op in &scene.ops {
                backend.draw_op(ctx, op, w, h)?;
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        Ok(FrameRGBA {
            width: u32::from(width),
            height: u32::from(height),
            data,
            premultiplied: true,
        })
    }
}

fn round_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_join(vello_cpu::kurbo::Join::Round)
        .with_caps(vello_cpu::kurbo::Cap::Round)
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius).to_path(CIRCLE_TOLERANCE)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
