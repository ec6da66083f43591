//! Chart configuration: layout constants and the stage style table.
//!
//! Everything the geometry needs is passed explicitly through
//! [`ChartConfig`] so alternate orderings and palettes can be tested
//! without touching global state.

use serde::{Deserialize, Serialize};

use crate::types::{ChartError, Color, StageCode};

/// Presentation of one stage: axis label, block color, shadow color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStyle {
    /// Text drawn in the stage label panel.
    pub label: String,
    /// Fill of the main (foreground) blocks.
    pub color: Color,
    /// Color of the soft shadow band feeding the shared gradient.
    pub shadow: Color,
}

impl StageStyle {
    fn new(label: &str, color: Color, shadow: Color) -> Self {
        Self {
            label: label.to_owned(),
            color,
            shadow,
        }
    }
}

/// Vertical stage ordering plus one [`StageStyle`] per stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTable {
    /// Top-to-bottom row order. Must list every stage exactly once.
    pub order: Vec<StageCode>,
    /// Style for [`StageCode::Awake`].
    pub awake: StageStyle,
    /// Style for [`StageCode::Rem`].
    pub rem: StageStyle,
    /// Style for [`StageCode::Core`].
    pub core: StageStyle,
    /// Style for [`StageCode::Deep`].
    pub deep: StageStyle,
    /// Style for [`StageCode::Insomnia`].
    pub insomnia: StageStyle,
}

impl StageTable {
    /// Style for the given stage.
    #[must_use]
    pub const fn style(&self, stage: StageCode) -> &StageStyle {
        match stage {
            StageCode::Awake => &self.awake,
            StageCode::Rem => &self.rem,
            StageCode::Core => &self.core,
            StageCode::Deep => &self.deep,
            StageCode::Insomnia => &self.insomnia,
        }
    }

    fn validate(&self) -> Result<(), ChartError> {
        if self.order.len() != StageCode::ALL.len() {
            return Err(ChartError::InvalidConfig(format!(
                "stage order must list {} stages, got {}",
                StageCode::ALL.len(),
                self.order.len(),
            )));
        }
        if let Some(missing) = StageCode::ALL
            .iter()
            .find(|stage| !self.order.contains(stage))
        {
            return Err(ChartError::InvalidConfig(format!(
                "stage order is missing {missing}"
            )));
        }
        Ok(())
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            order: StageCode::ALL.to_vec(),
            awake: StageStyle::new(
                "awake",
                Color::rgb(0xFF, 0x6B, 0x6B),
                Color::rgb(0xFF, 0xDA, 0xDA),
            ),
            rem: StageStyle::new(
                "REM",
                Color::rgb(0x4F, 0xC3, 0xF7),
                Color::rgb(0xD3, 0xF0, 0xFD),
            ),
            core: StageStyle::new(
                "Core",
                Color::rgb(0x15, 0x65, 0xC0),
                Color::rgb(0xC4, 0xD8, 0xEF),
            ),
            deep: StageStyle::new(
                "Deep",
                Color::rgb(0x9B, 0x59, 0xB6),
                Color::rgb(0xE6, 0xD5, 0xED),
            ),
            insomnia: StageStyle::new(
                "Insomnia",
                Color::rgb(0x66, 0x66, 0x66),
                Color::rgb(0xD9, 0xD9, 0xD9),
            ),
        }
    }
}

/// Layout constants for the chart.
///
/// All lengths are in pixels. Defaults reproduce a 1060x400 viewport
/// with 4px-per-minute bars and 70px row pitch.
///
/// Fields are public with no construction-time validation;
/// [`validate`](Self::validate) is called by
/// [`Layout::new`](crate::layout::Layout::new) before any geometry is
/// computed, so a bad configuration fails once, up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Viewport width (the visible, non-scrolling area).
    pub width: f64,
    /// Chart height `H`; also the extent of the shared gradient.
    pub height: f64,
    /// Left margin before the first bar (`m_l`).
    pub margin_left: f64,
    /// Trailing margin after the last bar.
    pub margin_right: f64,
    /// Width of one one-minute bar (`bw`).
    pub bar_width: f64,
    /// Gap between consecutive bars (`g`).
    pub gap: f64,
    /// Height of a stage row's blocks (`bh`).
    pub block_height: f64,
    /// Vertical gap between stage rows.
    pub row_gap: f64,
    /// Top of the first stage row (`baseY`).
    pub base_y: f64,
    /// Corner radius of the main blocks.
    pub corner_radius: f64,
    /// Shadow outset around each block (`r`). The connector rounding
    /// radius is `2r`.
    pub shadow_inset: f64,
    /// Minutes between time-axis ticks.
    pub tick_interval: u32,
    /// Distance of the tick label baseline above the bottom edge.
    pub tick_label_inset: f64,
    /// Width of the opaque stage label panel on the left.
    pub label_panel_width: f64,
    /// Stage ordering and palette.
    pub stages: StageTable,
}

impl ChartConfig {
    /// Default viewport width.
    pub const DEFAULT_WIDTH: f64 = 1060.0;
    /// Default chart height.
    pub const DEFAULT_HEIGHT: f64 = 400.0;
    /// Default left margin (label panel plus 15px breathing room).
    pub const DEFAULT_MARGIN_LEFT: f64 = 75.0;
    /// Default right margin.
    pub const DEFAULT_MARGIN_RIGHT: f64 = 10.0;
    /// Default bar width per minute.
    pub const DEFAULT_BAR_WIDTH: f64 = 4.0;
    /// Default gap between bars.
    pub const DEFAULT_GAP: f64 = 0.0;
    /// Default block height.
    pub const DEFAULT_BLOCK_HEIGHT: f64 = 40.0;
    /// Default gap between stage rows.
    pub const DEFAULT_ROW_GAP: f64 = 30.0;
    /// Default top of the first row.
    pub const DEFAULT_BASE_Y: f64 = 30.0;
    /// Default main block corner radius.
    pub const DEFAULT_CORNER_RADIUS: f64 = 4.0;
    /// Default shadow outset.
    pub const DEFAULT_SHADOW_INSET: f64 = 2.0;
    /// Default tick interval (two hours).
    pub const DEFAULT_TICK_INTERVAL: u32 = 120;
    /// Default tick label inset from the bottom edge.
    pub const DEFAULT_TICK_LABEL_INSET: f64 = 20.0;
    /// Default label panel width.
    pub const DEFAULT_LABEL_PANEL_WIDTH: f64 = 60.0;

    /// Check the layout constants and stage table.
    ///
    /// # Errors
    ///
    /// Returns [`ChartError::InvalidConfig`] naming the first offending
    /// field when a length is non-finite or out of range, the tick
    /// interval is zero, or the stage order is not a permutation of all
    /// five stages.
    pub fn validate(&self) -> Result<(), ChartError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("bar_width", self.bar_width),
            ("block_height", self.block_height),
            ("shadow_inset", self.shadow_inset),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        let non_negative = [
            ("margin_left", self.margin_left),
            ("margin_right", self.margin_right),
            ("gap", self.gap),
            ("row_gap", self.row_gap),
            ("base_y", self.base_y),
            ("corner_radius", self.corner_radius),
            ("tick_label_inset", self.tick_label_inset),
            ("label_panel_width", self.label_panel_width),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.tick_interval == 0 {
            return Err(ChartError::InvalidConfig(
                "tick_interval must be at least one minute".to_owned(),
            ));
        }

        self.stages.validate()
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            margin_left: Self::DEFAULT_MARGIN_LEFT,
            margin_right: Self::DEFAULT_MARGIN_RIGHT,
            bar_width: Self::DEFAULT_BAR_WIDTH,
            gap: Self::DEFAULT_GAP,
            block_height: Self::DEFAULT_BLOCK_HEIGHT,
            row_gap: Self::DEFAULT_ROW_GAP,
            base_y: Self::DEFAULT_BASE_Y,
            corner_radius: Self::DEFAULT_CORNER_RADIUS,
            shadow_inset: Self::DEFAULT_SHADOW_INSET,
            tick_interval: Self::DEFAULT_TICK_INTERVAL,
            tick_label_inset: Self::DEFAULT_TICK_LABEL_INSET,
            label_panel_width: Self::DEFAULT_LABEL_PANEL_WIDTH,
            stages: StageTable::default(),
        }
    }
}
