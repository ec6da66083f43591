//! Shared vertical shadow gradient.
//!
//! One linear ramp from `y = 0` to `y = H` is used as the fill of every
//! shadow rectangle and every connector. Each stage row is a flat
//! plateau of that stage's shadow color; the inter-row gap below it
//! blends into the next stage's color. A connector crossing the gap
//! therefore picks up both stages' colors from its y position alone.

use serde::{Deserialize, Serialize};

use crate::config::StageTable;
use crate::layout::Layout;
use crate::types::Color;

/// Identifier the scene and renderers use to reference the gradient.
pub const GRADIENT_ID: &str = "gradient";

/// A color stop at a percentage of the gradient extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Offset in `[0, 100]`.
    pub offset_percent: f64,
    /// Stop color.
    pub color: Color,
}

/// A vertical linear gradient in user space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    /// Reference identifier.
    pub id: String,
    /// Start of the ramp (always 0).
    pub y1: f64,
    /// End of the ramp (the chart height).
    pub y2: f64,
    /// Stops in non-decreasing offset order, spanning `0..=100`.
    pub stops: Vec<GradientStop>,
}

/// Build the shared shadow gradient for a chart of pixel height `height`.
///
/// Emits a 0% stop, then four stops per stage in row order (band start,
/// band end, gap start, gap end blended into the next stage), then a
/// 100% stop. The last stage's gap repeats its own color. Offsets are
/// clamped to `[0, 100]`, so rows extending past `height` flatten into
/// the final stop instead of breaking ordering.
#[must_use]
pub fn build_gradient(stages: &StageTable, layout: &Layout, height: f64) -> LinearGradient {
    let percent = |y: f64| (y / height * 100.0).clamp(0.0, 100.0);
    let shadow = |i: usize| stages.order.get(i).map(|&s| stages.style(s).shadow);

    let mut stops = Vec::with_capacity(stages.order.len() * 4 + 2);

    if let Some(first) = shadow(0) {
        stops.push(GradientStop {
            offset_percent: 0.0,
            color: first,
        });
    }

    for row in 0..stages.order.len() {
        let Some(color) = shadow(row) else {
            continue;
        };
        let next = shadow(row + 1).unwrap_or(color);

        let band_start = layout.row_top(row);
        let band_end = band_start + layout.block_height();
        let gap_end = band_end + layout.row_gap();

        for (y, stop_color) in [
            (band_start, color),
            (band_end, color),
            (band_end, color),
            (gap_end, next),
        ] {
            stops.push(GradientStop {
                offset_percent: percent(y),
                color: stop_color,
            });
        }
    }

    if let Some(last) = stages.order.len().checked_sub(1).and_then(shadow) {
        stops.push(GradientStop {
            offset_percent: 100.0,
            color: last,
        });
    }

    LinearGradient {
        id: GRADIENT_ID.to_owned(),
        y1: 0.0,
        y2: height,
        stops,
    }
}
