//! Horizontal pan bounds for the scrollable data layer.
//!
//! Only the clamp lives here. Input handling belongs to whatever hosts
//! the rendered chart.

use serde::{Deserialize, Serialize};

/// Scrollable extent of the chart content inside a fixed viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanExtent {
    /// Full content width (bars plus both margins).
    pub content_width: f64,
    /// Visible width.
    pub viewport_width: f64,
}

impl PanExtent {
    /// Create a pan extent.
    #[must_use]
    pub const fn new(content_width: f64, viewport_width: f64) -> Self {
        Self {
            content_width,
            viewport_width,
        }
    }

    /// Largest allowed scroll offset; zero when the content fits.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Bound `offset` to `[0, max_offset]`. Non-finite offsets become 0.
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_finite() {
            offset.clamp(0.0, self.max_offset())
        } else {
            0.0
        }
    }
}
