//! SVG export serializer.
//!
//! Walks a [`Scene`] and emits an SVG document using the [`svg`] crate
//! for document construction, XML escaping, and path data formatting.
//!
//! Document structure:
//!
//! ```text
//! <svg width height viewBox>
//!   <defs> linearGradient, clipPath... </defs>
//!   <g class="scroll-area" transform="translate(-offset, 0)">
//!     <g class="time-axis"> ... <g class="blocks">
//!   </g>
//!   <g class="stage-labels"> ... </g>
//! </svg>
//! ```
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{
    ClipPath, Definitions, Element, Group, Line, LinearGradient, Path, Rectangle, Stop,
};
use svg::node::{Node, Text, Value};

use sleepline_chart::scene::{
    Fill, Layer, LineShape, PathShape, RectShape, TextAnchor, TextShape,
};
use sleepline_chart::{ClipRect, PathData, PathSegment, Scene, Shape, Sweep};

/// Format a coordinate for an attribute: at most three decimals, no
/// trailing zeros, no negative zero.
fn num(value: f64) -> String {
    let formatted = format!("{value:.3}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// SVG arc flags are 0 or 1.
const fn flag(set: bool) -> f64 {
    if set { 1.0 } else { 0.0 }
}

fn fill_value(fill: &Fill) -> String {
    match fill {
        Fill::Solid(color) => color.to_string(),
        Fill::Gradient(id) => format!("url(#{id})"),
    }
}

/// Build an SVG path `d` attribute string from path data.
///
/// Arcs become `A` commands whose endpoint is derived from the arc's
/// center, radius and end angle. Coordinates are formatted by the
/// [`svg`] crate using `f32` precision.
///
/// # Examples
///
/// ```
/// use sleepline_chart::{PathData, Point};
/// use sleepline_export::build_path_data;
///
/// let path = PathData::new()
///     .move_to(Point::new(10.0, 20.0))
///     .line_to(Point::new(30.0, 40.0));
/// assert_eq!(build_path_data(&path), "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(path: &PathData) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut data = Data::new();
    for segment in path.segments() {
        data = match *segment {
            PathSegment::MoveTo(p) => data.move_to((p.x, p.y)),
            PathSegment::LineTo(p) => data.line_to((p.x, p.y)),
            PathSegment::Arc(arc) => {
                let end = arc.end_point();
                data.elliptical_arc_to((
                    arc.radius,
                    arc.radius,
                    0.0,
                    flag(arc.is_large()),
                    flag(arc.sweep == Sweep::Clockwise),
                    end.x,
                    end.y,
                ))
            }
            PathSegment::Close => data.close(),
        };
    }
    String::from(Value::from(data))
}

fn gradient_element(scene: &Scene) -> LinearGradient {
    let gradient = &scene.gradient;
    let mut element = LinearGradient::new()
        .set("id", gradient.id.as_str())
        .set("gradientUnits", "userSpaceOnUse")
        .set("x1", "0")
        .set("y1", num(gradient.y1))
        .set("x2", "0")
        .set("y2", num(gradient.y2));
    for stop in &gradient.stops {
        element = element.add(
            Stop::new()
                .set("offset", format!("{}%", num(stop.offset_percent)))
                .set("stop-color", stop.color.to_string()),
        );
    }
    element
}

fn clip_element(clip: &ClipRect) -> ClipPath {
    ClipPath::new().set("id", clip.id.as_str()).add(
        Rectangle::new()
            .set("x", num(clip.rect.x))
            .set("y", num(clip.rect.y))
            .set("width", num(clip.rect.width))
            .set("height", num(clip.rect.height)),
    )
}

fn rect_element(shape: &RectShape) -> Rectangle {
    let mut element = Rectangle::new()
        .set("x", num(shape.rect.x))
        .set("y", num(shape.rect.y))
        .set("width", num(shape.rect.width))
        .set("height", num(shape.rect.height))
        .set("fill", fill_value(&shape.fill));
    if shape.corner_radius > 0.0 {
        element = element
            .set("rx", num(shape.corner_radius))
            .set("ry", num(shape.corner_radius));
    }
    element
}

fn path_element(shape: &PathShape) -> Option<Path> {
    let d = build_path_data(&shape.path);
    if d.is_empty() {
        return None;
    }
    let mut element = Path::new().set("d", d).set("fill", fill_value(&shape.fill));
    if let Some(clip_id) = &shape.clip_id {
        element = element.set("clip-path", format!("url(#{clip_id})"));
    }
    Some(element)
}

fn text_element(shape: &TextShape) -> Element {
    let mut element = Element::new("text");
    element.assign("x", num(shape.position.x));
    element.assign("y", num(shape.position.y));
    element.assign("fill", shape.fill.to_string());
    element.assign("font-size", format!("{}px", num(shape.font_size)));
    if shape.anchor == TextAnchor::Middle {
        element.assign("text-anchor", "middle");
    }
    element.append(Text::new(shape.text.as_str()));
    element
}

fn line_element(shape: &LineShape) -> Line {
    let mut element = Line::new()
        .set("x1", num(shape.from.x))
        .set("y1", num(shape.from.y))
        .set("x2", num(shape.to.x))
        .set("y2", num(shape.to.y))
        .set("stroke", shape.stroke.to_string())
        .set("stroke-width", num(shape.stroke_width));
    if !shape.dash.is_empty() {
        let dash: Vec<String> = shape.dash.iter().map(|&d| num(d)).collect();
        element = element.set("stroke-dasharray", dash.join(","));
    }
    element
}

fn layer_group(layer: &Layer) -> Group {
    let mut group = Group::new().set("class", layer.kind.name());
    for shape in &layer.shapes {
        group = match shape {
            Shape::Rect(rect) => group.add(rect_element(rect)),
            Shape::Path(path) => match path_element(path) {
                Some(element) => group.add(element),
                None => group,
            },
            Shape::Text(text) => group.add(text_element(text)),
            Shape::Line(line) => group.add(line_element(line)),
        };
    }
    group
}

/// Serialize a scene into an SVG document string.
///
/// Panned layers are nested inside one `scroll-area` group carrying the
/// scene's horizontal translation; fixed layers follow it so they paint
/// on top of scrolled content.
#[must_use]
pub fn to_svg(scene: &Scene) -> String {
    let mut doc = Document::new()
        .set("width", num(scene.width))
        .set("height", num(scene.height))
        .set(
            "viewBox",
            format!("0 0 {} {}", num(scene.width), num(scene.height)),
        );

    let mut defs = Definitions::new().add(gradient_element(scene));
    for clip in &scene.clips {
        defs = defs.add(clip_element(clip));
    }
    doc = doc.add(defs);

    let mut scroll_area = Group::new().set("class", "scroll-area").set(
        "transform",
        format!("translate({}, 0)", num(scene.translate_x())),
    );
    let mut fixed = Vec::new();
    for layer in &scene.layers {
        if layer.kind.is_panned() {
            scroll_area = scroll_area.add(layer_group(layer));
        } else {
            fixed.push(layer_group(layer));
        }
    }
    doc = doc.add(scroll_area);
    for group in fixed {
        doc = doc.add(group);
    }

    tracing::debug!(
        layers = scene.layers.len(),
        clips = scene.clips.len(),
        "serialized svg"
    );

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
