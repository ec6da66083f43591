//! Shared types for the sleepline chart pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A 2D point in chart coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from the left edge).
    pub x: f64,
    /// Vertical position (pixels from the top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// An opaque sRGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure white, used for the stage label panel.
    pub const WHITE: Self = Self::rgb(0xFF, 0xFF, 0xFF);

    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ChartError;

    /// Parse `#RRGGBB` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || ChartError::InvalidConfig(format!("invalid color {s:?}, expected #RRGGBB"));
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Sleep stage classification of a single one-minute sample.
///
/// The discriminant is the digit used in raw sample strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum StageCode {
    /// Deep (N3) sleep.
    Deep = 0,
    /// Core (light) sleep.
    Core = 1,
    /// REM sleep.
    Rem = 2,
    /// Wake disturbance while trying to sleep.
    Insomnia = 3,
    /// Awake.
    Awake = 4,
}

impl StageCode {
    /// Every stage, in the default top-to-bottom chart order.
    pub const ALL: [Self; 5] = [
        Self::Awake,
        Self::Rem,
        Self::Core,
        Self::Deep,
        Self::Insomnia,
    ];

    /// The digit code of this stage.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Stable lowercase identifier, used for CSS classes and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deep => "deep",
            Self::Core => "core",
            Self::Rem => "rem",
            Self::Insomnia => "insomnia",
            Self::Awake => "awake",
        }
    }
}

impl fmt::Display for StageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for StageCode {
    type Error = ChartError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Deep),
            1 => Ok(Self::Core),
            2 => Ok(Self::Rem),
            3 => Ok(Self::Insomnia),
            4 => Ok(Self::Awake),
            other => Err(ChartError::UnknownStage(other)),
        }
    }
}

impl From<StageCode> for u8 {
    fn from(stage: StageCode) -> Self {
        stage.code()
    }
}

/// A maximal run of consecutive samples sharing one stage.
///
/// `start` is inclusive and `end` exclusive, so `end > start` for every
/// block produced by [`compress_stages`](crate::compress::compress_stages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Index of the first sample in the run.
    pub start: usize,
    /// Index one past the last sample in the run.
    pub end: usize,
    /// Stage shared by every sample in the run.
    pub stage: StageCode,
}

impl Block {
    /// Create a new block.
    #[must_use]
    pub const fn new(start: usize, end: usize, stage: StageCode) -> Self {
        Self { start, end, stage }
    }

    /// Number of one-minute samples covered by the block.
    #[must_use]
    pub const fn minutes(&self) -> usize {
        self.end.saturating_sub(self.start)
    }
}

/// Errors that can occur while building a chart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// The sample sequence contained no samples.
    #[error("sample sequence is empty")]
    EmptyInput,

    /// A raw sample did not map to any stage code.
    #[error("invalid sample {value:?} at index {index}")]
    InvalidSample {
        /// Position of the offending sample.
        index: usize,
        /// The raw character found there.
        value: char,
    },

    /// A numeric stage code outside the known domain.
    #[error("unknown stage code {0}")]
    UnknownStage(u8),

    /// Layout constants or stage tables are unusable.
    #[error("invalid chart configuration: {0}")]
    InvalidConfig(String),

    /// The sleep start timestamp could not be parsed or offset.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
