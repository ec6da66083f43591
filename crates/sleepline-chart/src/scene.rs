//! Scene descriptors: an immutable, renderer-agnostic list of shapes.
//!
//! A [`Scene`] is pure data. Renderers walk its layers in order and
//! paint each shape; later layers paint over earlier ones. Panned layers
//! share one horizontal translation, the rest stay fixed.
//!
//! Layer order, bottom to top:
//!
//! 1. time axis (guides and labels)
//! 2. connectors
//! 3. shadows
//! 4. blocks
//! 5. stage label panel (not panned)

use serde::{Deserialize, Serialize};

use crate::axis::Tick;
use crate::config::ChartConfig;
use crate::connector::{ClipRect, ConnectorSpec};
use crate::gradient::{GRADIENT_ID, LinearGradient};
use crate::layout::Layout;
use crate::path::PathData;
use crate::summary::RenderSummary;
use crate::types::{Block, Color, Point, Rect};

/// Time tick label and guide color.
pub const TICK_COLOR: Color = Color::rgb(0x88, 0x88, 0x88);

/// Time tick label size in px.
pub const TICK_FONT_SIZE: f64 = 11.0;

/// Guide line dash pattern.
pub const GUIDE_DASH: [f64; 2] = [2.0, 2.0];

/// Guide line stroke width.
pub const GUIDE_STROKE_WIDTH: f64 = 0.5;

/// Space between a guide's lower end and its tick label baseline.
pub const GUIDE_LABEL_CLEARANCE: f64 = 10.0;

/// Stage label color.
pub const STAGE_LABEL_COLOR: Color = Color::rgb(0xAA, 0xAA, 0xAA);

/// Stage label size in px.
pub const STAGE_LABEL_FONT_SIZE: f64 = 13.0;

/// Stage label x position.
pub const STAGE_LABEL_X: f64 = 10.0;

/// Stage label baseline below its row top.
pub const STAGE_LABEL_BASELINE: f64 = 26.0;

/// How a shape is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fill {
    /// A single color.
    Solid(Color),
    /// Reference to a gradient in the scene definitions.
    Gradient(String),
}

/// A rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    /// Bounds in scene coordinates.
    pub rect: Rect,
    /// Corner radius; zero for square corners.
    pub corner_radius: f64,
    /// Interior fill.
    pub fill: Fill,
}

/// A filled closed path, optionally clipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathShape {
    /// Closed outline.
    pub path: PathData,
    /// Interior fill.
    pub fill: Fill,
    /// Identifier of a [`ClipRect`] in [`Scene::clips`].
    pub clip_id: Option<String>,
}

/// Horizontal alignment of a text label around its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Text starts at the position.
    Start,
    /// Text is centered on the position.
    Middle,
}

/// A single-line text label. `position` is the baseline anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    /// Baseline anchor point.
    pub position: Point,
    /// Label content, unescaped.
    pub text: String,
    /// Text color.
    pub fill: Color,
    /// Font size in px.
    pub font_size: f64,
    /// Horizontal alignment around `position`.
    pub anchor: TextAnchor,
}

/// A stroked straight line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineShape {
    /// Start point.
    pub from: Point,
    /// End point.
    pub to: Point,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width in px.
    pub stroke_width: f64,
    /// Dash pattern; empty for a solid line.
    pub dash: Vec<f64>,
}

/// One drawable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Block, shadow or panel rectangle.
    Rect(RectShape),
    /// Connector ribbon.
    Path(PathShape),
    /// Tick or stage label.
    Text(TextShape),
    /// Time guide.
    Line(LineShape),
}

/// What a layer holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    /// Tick guides and time labels.
    TimeAxis,
    /// Ribbons between adjacent blocks.
    Connectors,
    /// Gradient-filled block outlines.
    Shadows,
    /// Foreground blocks.
    Blocks,
    /// Fixed panel with the stage names.
    StageLabels,
}

impl LayerKind {
    /// Whether the layer moves with the horizontal scroll.
    #[must_use]
    pub const fn is_panned(self) -> bool {
        !matches!(self, Self::StageLabels)
    }

    /// Short name, used as a group class by renderers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TimeAxis => "time-axis",
            Self::Connectors => "connectors",
            Self::Shadows => "shadows",
            Self::Blocks => "blocks",
            Self::StageLabels => "stage-labels",
        }
    }
}

/// An ordered group of shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// What the layer holds.
    pub kind: LayerKind,
    /// Shapes in paint order.
    pub shapes: Vec<Shape>,
}

/// A fully composed chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Viewport width.
    pub width: f64,
    /// Viewport height.
    pub height: f64,
    /// Scrollable content width.
    pub content_width: f64,
    /// Clamped horizontal scroll offset.
    pub scroll_offset: f64,
    /// Shared shadow/connector fill.
    pub gradient: LinearGradient,
    /// Clip regions referenced by connector paths.
    pub clips: Vec<ClipRect>,
    /// Layers, bottom to top.
    pub layers: Vec<Layer>,
    /// Counts and times describing this render.
    pub summary: RenderSummary,
}

impl Scene {
    /// The first layer of a given kind.
    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// X translation of the panned layers.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        -self.scroll_offset
    }
}

/// Foreground blocks in their stage colors.
#[must_use]
pub fn block_layer(layout: &Layout, config: &ChartConfig, blocks: &[Block]) -> Layer {
    let shapes = blocks
        .iter()
        .map(|block| {
            Shape::Rect(RectShape {
                rect: layout.block_rect(block),
                corner_radius: config.corner_radius,
                fill: Fill::Solid(config.stages.style(block.stage).color),
            })
        })
        .collect();
    Layer {
        kind: LayerKind::Blocks,
        shapes,
    }
}

/// Gradient-filled shadows, rounded with the shadow radius.
#[must_use]
pub fn shadow_layer(layout: &Layout, blocks: &[Block]) -> Layer {
    let shapes = blocks
        .iter()
        .map(|block| {
            Shape::Rect(RectShape {
                rect: layout.shadow_rect(block),
                corner_radius: layout.shadow_radius(),
                fill: Fill::Gradient(GRADIENT_ID.to_owned()),
            })
        })
        .collect();
    Layer {
        kind: LayerKind::Shadows,
        shapes,
    }
}

/// Gradient-filled connector ribbons, clipped where required.
#[must_use]
pub fn connector_layer(connectors: &[ConnectorSpec]) -> Layer {
    let shapes = connectors
        .iter()
        .map(|c| {
            Shape::Path(PathShape {
                path: c.path.clone(),
                fill: Fill::Gradient(GRADIENT_ID.to_owned()),
                clip_id: c.clip.as_ref().map(|clip| clip.id.clone()),
            })
        })
        .collect();
    Layer {
        kind: LayerKind::Connectors,
        shapes,
    }
}

/// Dashed guides and `HH:MM` labels for each tick.
#[must_use]
pub fn time_axis_layer(layout: &Layout, config: &ChartConfig, ticks: &[Tick]) -> Layer {
    let label_y = config.height - config.tick_label_inset;
    let guide_bottom = label_y - GUIDE_LABEL_CLEARANCE;

    let mut shapes = Vec::with_capacity(ticks.len() * 2);
    for tick in ticks {
        shapes.push(Shape::Text(TextShape {
            position: Point::new(tick.x, label_y),
            text: tick.label.clone(),
            fill: TICK_COLOR,
            font_size: TICK_FONT_SIZE,
            anchor: TextAnchor::Middle,
        }));
        shapes.push(Shape::Line(LineShape {
            from: Point::new(tick.x, layout.base_y()),
            to: Point::new(tick.x, guide_bottom),
            stroke: TICK_COLOR,
            stroke_width: GUIDE_STROKE_WIDTH,
            dash: GUIDE_DASH.to_vec(),
        }));
    }
    Layer {
        kind: LayerKind::TimeAxis,
        shapes,
    }
}

/// Opaque panel with one label per stage row, drawn over scrolled content.
#[must_use]
pub fn stage_label_layer(layout: &Layout, config: &ChartConfig) -> Layer {
    let mut shapes = Vec::with_capacity(config.stages.order.len() + 1);
    shapes.push(Shape::Rect(RectShape {
        rect: Rect::new(0.0, 0.0, config.label_panel_width, config.height),
        corner_radius: 0.0,
        fill: Fill::Solid(Color::WHITE),
    }));
    for &stage in &config.stages.order {
        shapes.push(Shape::Text(TextShape {
            position: Point::new(STAGE_LABEL_X, layout.y_pos(stage) + STAGE_LABEL_BASELINE),
            text: config.stages.style(stage).label.clone(),
            fill: STAGE_LABEL_COLOR,
            font_size: STAGE_LABEL_FONT_SIZE,
            anchor: TextAnchor::Start,
        }));
    }
    Layer {
        kind: LayerKind::StageLabels,
        shapes,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::axis::TimeAxis;
    use crate::compress::compress_stages;
    use crate::connector::synthesize_all;
    use crate::parse::{parse_samples, parse_timestamp};
    use crate::types::StageCode;

    fn fixture() -> (ChartConfig, Layout, Vec<Block>) {
        let config = ChartConfig::default();
        let layout = Layout::new(&config).unwrap();
        let blocks = compress_stages(&parse_samples("441").unwrap()).unwrap();
        (config, layout, blocks)
    }

    #[test]
    fn blocks_use_stage_colors() {
        let (config, layout, blocks) = fixture();
        let layer = block_layer(&layout, &config, &blocks);
        assert_eq!(layer.kind, LayerKind::Blocks);
        let Shape::Rect(first) = &layer.shapes[0] else {
            unreachable!("blocks are rectangles");
        };
        assert_eq!(first.fill, Fill::Solid(config.stages.awake.color));
        assert_eq!(first.rect, Rect::new(75.0, 30.0, 8.0, 40.0));
        assert!((first.corner_radius - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shadows_and_connectors_share_the_gradient() {
        let (_, layout, blocks) = fixture();
        let shadows = shadow_layer(&layout, &blocks);
        let connectors = connector_layer(&synthesize_all(&layout, &blocks));
        let gradient = Fill::Gradient(GRADIENT_ID.to_owned());
        for shape in shadows.shapes.iter().chain(&connectors.shapes) {
            match shape {
                Shape::Rect(rect) => assert_eq!(rect.fill, gradient),
                Shape::Path(path) => {
                    assert_eq!(path.fill, gradient);
                    assert!(path.clip_id.is_none());
                }
                other => unreachable!("unexpected shape {other:?}"),
            }
        }
        assert_eq!(connectors.shapes.len(), 1);
    }

    #[test]
    fn time_axis_emits_label_and_guide_per_tick() {
        let (config, layout, _) = fixture();
        let start = parse_timestamp("2021-04-03 15:55:00").unwrap();
        let ticks = TimeAxis::new(start, 240, 120).ticks(&layout);
        let layer = time_axis_layer(&layout, &config, &ticks);
        assert_eq!(layer.shapes.len(), 6);

        let Shape::Text(label) = &layer.shapes[2] else {
            unreachable!("labels precede guides");
        };
        assert_eq!(label.text, "17:55");
        assert_eq!(label.anchor, TextAnchor::Middle);
        assert_eq!(label.position, Point::new(555.0, 380.0));

        let Shape::Line(guide) = &layer.shapes[3] else {
            unreachable!("guide follows label");
        };
        assert_eq!(guide.from, Point::new(555.0, 30.0));
        assert_eq!(guide.to, Point::new(555.0, 370.0));
        assert_eq!(guide.dash, vec![2.0, 2.0]);
    }

    #[test]
    fn stage_labels_sit_on_a_white_panel() {
        let (config, layout, _) = fixture();
        let layer = stage_label_layer(&layout, &config);
        assert!(!layer.kind.is_panned());
        assert_eq!(layer.shapes.len(), 6);

        let Shape::Rect(panel) = &layer.shapes[0] else {
            unreachable!("panel comes first");
        };
        assert_eq!(panel.rect, Rect::new(0.0, 0.0, 60.0, 400.0));
        assert_eq!(panel.fill, Fill::Solid(Color::WHITE));

        let Shape::Text(core) = &layer.shapes[3] else {
            unreachable!("labels follow the panel");
        };
        assert_eq!(core.text, config.stages.style(StageCode::Core).label);
        assert_eq!(core.position, Point::new(10.0, 196.0));
    }

    #[test]
    fn only_stage_labels_stay_fixed() {
        assert!(LayerKind::TimeAxis.is_panned());
        assert!(LayerKind::Connectors.is_panned());
        assert!(LayerKind::Shadows.is_panned());
        assert!(LayerKind::Blocks.is_panned());
        assert!(!LayerKind::StageLabels.is_panned());
    }
}
