//! PNG preview rasterizer.
//!
//! Paints the same scene descriptors the SVG serializer emits into a
//! `tiny-skia` pixmap: solid and gradient fills, rounded rectangles,
//! connector paths with their clip masks, and dashed guides. Arcs are
//! approximated with cubic Béziers. Text is not rasterized; the preview
//! carries no font stack.

use std::collections::HashMap;

use tiny_skia::{
    FillRule, GradientStop, LinearGradient, Mask, Paint, PathBuilder, Pixmap, Shader, SpreadMode,
    Stroke, StrokeDash, Transform,
};

use sleepline_chart::scene::{Fill, LineShape, PathShape, RectShape};
use sleepline_chart::{Color, PathData, PathSegment, Rect, Scene, Shape};

/// Cubic control distance for a quarter circle of unit radius.
const KAPPA: f32 = 0.552_284_8;

/// Errors that can occur while rasterizing a scene.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The scene size cannot back a pixmap.
    #[error("invalid canvas size {width}x{height}")]
    InvalidCanvas {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// The shared gradient could not be turned into a shader.
    #[error("gradient error: {0}")]
    Gradient(String),

    /// A connector's clip could not be turned into a mask.
    #[error("clip error: {0}")]
    Clip(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(String),
}

#[allow(clippy::cast_possible_truncation)]
fn px(value: f64) -> f32 {
    value as f32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn canvas_size(scene: &Scene) -> Result<(u32, u32), ExportError> {
    let invalid = || ExportError::InvalidCanvas {
        width: scene.width,
        height: scene.height,
    };
    let side = |v: f64| {
        if v.is_finite() && v >= 1.0 && v <= f64::from(u32::MAX) {
            Some(v.ceil() as u32)
        } else {
            None
        }
    };
    Ok((
        side(scene.width).ok_or_else(invalid)?,
        side(scene.height).ok_or_else(invalid)?,
    ))
}

fn skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn gradient_shader(scene: &Scene) -> Result<Shader<'static>, ExportError> {
    let gradient = &scene.gradient;
    let stops: Vec<GradientStop> = gradient
        .stops
        .iter()
        .map(|s| GradientStop::new(px(s.offset_percent / 100.0), skia_color(s.color)))
        .collect();
    LinearGradient::new(
        tiny_skia::Point::from_xy(0.0, px(gradient.y1)),
        tiny_skia::Point::from_xy(0.0, px(gradient.y2)),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| ExportError::Gradient(format!("cannot build shader for {:?}", gradient.id)))
}

/// Append a cubic approximation of an arc, at most a quarter turn per
/// curve.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn push_arc(pb: &mut PathBuilder, arc: &sleepline_chart::ArcSegment) {
    let sweep = arc.signed_sweep_angle();
    let pieces = (sweep.abs() / std::f64::consts::FRAC_PI_2).ceil().max(1.0) as u32;
    let step = sweep / f64::from(pieces);
    let k = 4.0 / 3.0 * (step / 4.0).tan() * arc.radius;

    let mut angle = arc.start_angle;
    for _ in 0..pieces {
        let next = angle + step;
        let p0 = arc.point_at(angle);
        let p3 = arc.point_at(next);
        let (sin0, cos0) = angle.sin_cos();
        let (sin1, cos1) = next.sin_cos();
        pb.cubic_to(
            px(k.mul_add(-sin0, p0.x)),
            px(k.mul_add(cos0, p0.y)),
            px(k.mul_add(sin1, p3.x)),
            px(k.mul_add(-cos1, p3.y)),
            px(p3.x),
            px(p3.y),
        );
        angle = next;
    }
}

fn build_path(path: &PathData) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => pb.move_to(px(p.x), px(p.y)),
            PathSegment::LineTo(p) => pb.line_to(px(p.x), px(p.y)),
            PathSegment::Arc(arc) => push_arc(&mut pb, arc),
            PathSegment::Close => pb.close(),
        }
    }
    pb.finish()
}

fn rounded_rect(rect: &Rect, radius: f64) -> Option<tiny_skia::Path> {
    let (x, y, w, h) = (px(rect.x), px(rect.y), px(rect.width), px(rect.height));
    let r = px(radius).min(w / 2.0).min(h / 2.0).max(0.0);
    if r <= 0.0 {
        return tiny_skia::Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }
    let c = r * (1.0 - KAPPA);
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.cubic_to(x + w - c, y, x + w, y + c, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.cubic_to(x + w, y + h - c, x + w - c, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.cubic_to(x + c, y + h, x, y + h - c, x, y + h - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + c, x + c, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Holds the per-scene state shared by every shape.
struct Painter<'a> {
    pixmap: Pixmap,
    gradient_id: &'a str,
    gradient: Shader<'static>,
    clips: HashMap<&'a str, &'a Rect>,
}

impl Painter<'_> {
    fn paint(&self, fill: &Fill) -> Result<Paint<'static>, ExportError> {
        let mut paint = Paint {
            anti_alias: true,
            ..Paint::default()
        };
        match fill {
            Fill::Solid(color) => paint.set_color(skia_color(*color)),
            Fill::Gradient(id) if id == self.gradient_id => paint.shader = self.gradient.clone(),
            Fill::Gradient(id) => {
                return Err(ExportError::Gradient(format!("unknown gradient {id:?}")));
            }
        }
        Ok(paint)
    }

    fn clip_mask(&self, clip_id: &str, transform: Transform) -> Result<Mask, ExportError> {
        let rect = self
            .clips
            .get(clip_id)
            .ok_or_else(|| ExportError::Clip(format!("unknown clip {clip_id:?}")))?;
        let path = rounded_rect(rect, 0.0)
            .ok_or_else(|| ExportError::Clip(format!("degenerate clip {clip_id:?}")))?;
        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())
            .ok_or_else(|| ExportError::Clip(format!("cannot allocate mask for {clip_id:?}")))?;
        mask.fill_path(&path, FillRule::Winding, true, transform);
        Ok(mask)
    }

    fn rect(&mut self, shape: &RectShape, transform: Transform) -> Result<(), ExportError> {
        let paint = self.paint(&shape.fill)?;
        if let Some(path) = rounded_rect(&shape.rect, shape.corner_radius) {
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, transform, None);
        }
        Ok(())
    }

    fn path(&mut self, shape: &PathShape, transform: Transform) -> Result<(), ExportError> {
        let paint = self.paint(&shape.fill)?;
        let Some(path) = build_path(&shape.path) else {
            return Ok(());
        };
        let mask = shape
            .clip_id
            .as_deref()
            .map(|id| self.clip_mask(id, transform))
            .transpose()?;
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, transform, mask.as_ref());
        Ok(())
    }

    fn line(&mut self, shape: &LineShape, transform: Transform) {
        let mut pb = PathBuilder::new();
        pb.move_to(px(shape.from.x), px(shape.from.y));
        pb.line_to(px(shape.to.x), px(shape.to.y));
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width: px(shape.stroke_width),
            dash: StrokeDash::new(shape.dash.iter().map(|&d| px(d)).collect(), 0.0),
            ..Stroke::default()
        };
        let mut paint = Paint {
            anti_alias: true,
            ..Paint::default()
        };
        paint.set_color(skia_color(shape.stroke));
        self.pixmap
            .stroke_path(&path, &paint, &stroke, transform, None);
    }
}

/// Rasterize a scene onto a white pixmap of the scene's viewport size.
///
/// # Errors
///
/// Returns [`ExportError::InvalidCanvas`] if the scene size is not a
/// usable pixmap size.
/// Returns [`ExportError::Gradient`] if a gradient fill cannot be built.
/// Returns [`ExportError::Clip`] if a connector's clip is missing or
/// cannot be masked.
pub fn render_pixmap(scene: &Scene) -> Result<Pixmap, ExportError> {
    let (width, height) = canvas_size(scene)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(ExportError::InvalidCanvas {
        width: scene.width,
        height: scene.height,
    })?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let mut painter = Painter {
        pixmap,
        gradient_id: scene.gradient.id.as_str(),
        gradient: gradient_shader(scene)?,
        clips: scene
            .clips
            .iter()
            .map(|c| (c.id.as_str(), &c.rect))
            .collect(),
    };

    let panned = Transform::from_translate(px(scene.translate_x()), 0.0);
    let mut skipped_text = 0_usize;
    for layer in &scene.layers {
        let transform = if layer.kind.is_panned() {
            panned
        } else {
            Transform::identity()
        };
        for shape in &layer.shapes {
            match shape {
                Shape::Rect(rect) => painter.rect(rect, transform)?,
                Shape::Path(path) => painter.path(path, transform)?,
                Shape::Line(line) => painter.line(line, transform),
                Shape::Text(_) => skipped_text += 1,
            }
        }
    }

    tracing::debug!(width, height, skipped_text, "rasterized scene");
    Ok(painter.pixmap)
}

/// Rasterize a scene and encode it as PNG bytes.
///
/// # Errors
///
/// Returns any error from [`render_pixmap`].
/// Returns [`ExportError::PngEncode`] if PNG encoding fails.
pub fn to_png(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    render_pixmap(scene)?
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))
}
