//! sleepline-chart: Pure sleep-stage chart geometry (sans-IO).
//!
//! Turns a per-minute sequence of sleep stages into a scene of vector
//! shapes:
//! samples -> blocks -> layout -> shared gradient -> ribbon connectors ->
//! time axis -> layered scene.
//!
//! This crate has **no I/O or rendering dependencies**. It returns plain
//! descriptors; `sleepline-export` turns them into SVG or PNG.

pub mod axis;
pub mod compress;
pub mod config;
pub mod connector;
pub mod gradient;
pub mod layout;
pub mod parse;
pub mod path;
pub mod scene;
pub mod summary;
pub mod types;
pub mod viewport;

pub use axis::{Tick, TimeAxis};
pub use compress::compress_stages;
pub use config::{ChartConfig, StageStyle, StageTable};
pub use connector::{ClipRect, ConnectorSpec};
pub use gradient::{GradientStop, LinearGradient};
pub use layout::Layout;
pub use parse::{parse_samples, parse_timestamp};
pub use path::{ArcSegment, PathData, PathSegment, Sweep};
pub use scene::{Fill, Layer, LayerKind, Scene, Shape};
pub use summary::{RenderSummary, StageMinutes};
pub use types::{Block, ChartError, Color, Point, Rect, StageCode};
pub use viewport::PanExtent;

use chrono::NaiveDateTime;

/// Build the complete chart scene for one night.
///
/// `scroll_offset` is the requested horizontal scroll in pixels; it is
/// clamped to the scrollable range before use.
///
/// # Pipeline steps
///
/// 1. Validate configuration into a [`Layout`]
/// 2. Compress samples into blocks
/// 3. Build the shared shadow gradient
/// 4. Synthesize connectors between adjacent blocks
/// 5. Compute time ticks
/// 6. Clamp the scroll offset
/// 7. Compose layers and summary
///
/// Identical inputs always produce identical scenes.
///
/// # Errors
///
/// Returns [`ChartError::InvalidConfig`] if the configuration is unusable.
/// Returns [`ChartError::EmptyInput`] if `samples` is empty.
pub fn render_scene(
    samples: &[StageCode],
    sleep_start: NaiveDateTime,
    config: &ChartConfig,
    scroll_offset: f64,
) -> Result<Scene, ChartError> {
    // 1. Layout (validates the configuration).
    let layout = Layout::new(config)?;
    if layout.rows_bottom() > config.height {
        tracing::warn!(
            rows_bottom = layout.rows_bottom(),
            height = config.height,
            "stage rows extend below the chart height"
        );
    }

    // 2. Blocks.
    let blocks = compress_stages(samples)?;

    // 3. Gradient.
    let gradient = gradient::build_gradient(&config.stages, &layout, config.height);

    // 4. Connectors.
    let connectors = connector::synthesize_all(&layout, &blocks);
    let clips: Vec<ClipRect> = connectors.iter().filter_map(|c| c.clip.clone()).collect();

    // 5. Time axis.
    let axis = TimeAxis::new(sleep_start, samples.len(), config.tick_interval);
    let ticks = axis.ticks(&layout);

    // 6. Scroll.
    let content_width = layout.content_width(samples.len());
    let extent = PanExtent::new(content_width, config.width);
    let scroll_offset = extent.clamp(scroll_offset);

    // 7. Layers, bottom to top.
    let layers = vec![
        scene::time_axis_layer(&layout, config, &ticks),
        scene::connector_layer(&connectors),
        scene::shadow_layer(&layout, &blocks),
        scene::block_layer(&layout, config, &blocks),
        scene::stage_label_layer(&layout, config),
    ];

    let summary = RenderSummary {
        samples: samples.len(),
        blocks: blocks.len(),
        connectors: connectors.len(),
        clipped_connectors: clips.len(),
        ticks: ticks.len(),
        content_width,
        sleep_start,
        wake_time: axis.wake_time(),
        stages: summary::stage_minutes(&blocks, &config.stages),
    };

    tracing::debug!(
        samples = summary.samples,
        blocks = summary.blocks,
        connectors = summary.connectors,
        clipped = summary.clipped_connectors,
        ticks = summary.ticks,
        content_width,
        scroll_offset,
        "composed scene"
    );

    Ok(Scene {
        width: config.width,
        height: config.height,
        content_width,
        scroll_offset,
        gradient,
        clips,
        layers,
        summary,
    })
}
