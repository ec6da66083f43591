//! Layout mapping: block indices and stages to screen-space geometry.
//!
//! Pure functions of the layout constants. Rows are stacked top to
//! bottom in stage order; columns advance one bar (plus gap) per minute.

use crate::config::ChartConfig;
use crate::types::{Block, ChartError, Rect, StageCode};

/// Validated, copyable snapshot of the layout constants.
///
/// Building a `Layout` is the single point where configuration errors
/// surface; every method afterwards is total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    bar_width: f64,
    gap: f64,
    margin_left: f64,
    margin_right: f64,
    base_y: f64,
    block_height: f64,
    row_gap: f64,
    shadow_inset: f64,
    /// Row index per stage, indexed by [`StageCode::code`].
    rows: [usize; 5],
}

impl Layout {
    /// Build a layout from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidConfig`] if
    /// [`ChartConfig::validate`] rejects the configuration.
    pub fn new(config: &ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;

        let mut rows = [0; 5];
        for (row, stage) in config.stages.order.iter().enumerate() {
            rows[usize::from(stage.code())] = row;
        }

        Ok(Self {
            bar_width: config.bar_width,
            gap: config.gap,
            margin_left: config.margin_left,
            margin_right: config.margin_right,
            base_y: config.base_y,
            block_height: config.block_height,
            row_gap: config.row_gap,
            shadow_inset: config.shadow_inset,
            rows,
        })
    }

    /// Left edge of the bar for sample `index`: `m_l + i * (bw + g)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_pos(&self, index: usize) -> f64 {
        (index as f64).mul_add(self.bar_width + self.gap, self.margin_left)
    }

    /// Pixel width of the samples `[start, end)`.
    ///
    /// `n` bars contribute `n * bw` plus the `n - 1` gaps between them.
    /// An empty range has zero width, so a one-sample block is exactly
    /// `bw` wide regardless of the gap.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn block_width(&self, start: usize, end: usize) -> f64 {
        let n = end.saturating_sub(start);
        if n == 0 {
            return 0.0;
        }
        (n as f64).mul_add(self.bar_width, (n - 1) as f64 * self.gap)
    }

    /// Row index of a stage (0 is the topmost row).
    #[must_use]
    pub const fn row_index(&self, stage: StageCode) -> usize {
        self.rows[stage.code() as usize]
    }

    /// Distance between the tops of consecutive rows.
    #[must_use]
    pub fn row_pitch(&self) -> f64 {
        self.block_height + self.row_gap
    }

    /// Top edge of the blocks in a stage's row.
    #[must_use]
    pub fn y_pos(&self, stage: StageCode) -> f64 {
        self.row_top(self.row_index(stage))
    }

    /// Top edge of the row at `row`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn row_top(&self, row: usize) -> f64 {
        (row as f64).mul_add(self.row_pitch(), self.base_y)
    }

    /// Height of every block.
    #[must_use]
    pub const fn block_height(&self) -> f64 {
        self.block_height
    }

    /// Gap between stage rows.
    #[must_use]
    pub const fn row_gap(&self) -> f64 {
        self.row_gap
    }

    /// Gap between bars.
    #[must_use]
    pub const fn gap(&self) -> f64 {
        self.gap
    }

    /// Top of the first row.
    #[must_use]
    pub const fn base_y(&self) -> f64 {
        self.base_y
    }

    /// Shadow outset `r`.
    #[must_use]
    pub const fn shadow_inset(&self) -> f64 {
        self.shadow_inset
    }

    /// Shadow corner and connector rounding radius (`2r`).
    #[must_use]
    pub fn shadow_radius(&self) -> f64 {
        self.shadow_inset * 2.0
    }

    /// The main (foreground) rectangle of a block.
    #[must_use]
    pub fn block_rect(&self, block: &Block) -> Rect {
        Rect::new(
            self.x_pos(block.start),
            self.y_pos(block.stage),
            self.block_width(block.start, block.end),
            self.block_height,
        )
    }

    /// The shadow rectangle of a block: the block grown by `r` on every side.
    #[must_use]
    pub fn shadow_rect(&self, block: &Block) -> Rect {
        let main = self.block_rect(block);
        let r = self.shadow_inset;
        Rect::new(
            main.x - r,
            main.y - r,
            2.0f64.mul_add(r, main.width),
            2.0f64.mul_add(r, main.height),
        )
    }

    /// Width of the bars for `samples` minutes (without margins).
    #[must_use]
    pub fn chart_width(&self, samples: usize) -> f64 {
        self.block_width(0, samples)
    }

    /// Full scrollable content width: bars plus both margins.
    #[must_use]
    pub fn content_width(&self, samples: usize) -> f64 {
        self.chart_width(samples) + self.margin_left + self.margin_right
    }

    /// Bottom edge of the lowest row.
    #[must_use]
    pub fn rows_bottom(&self) -> f64 {
        self.row_top(self.rows.len() - 1) + self.block_height
    }
}
