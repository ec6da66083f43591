//! Per-render statistics.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::StageTable;
use crate::types::{Block, StageCode};

/// Minutes spent in one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageMinutes {
    /// The stage counted.
    pub stage: StageCode,
    /// Row label from the stage table.
    pub label: String,
    /// Number of samples in this stage.
    pub minutes: usize,
}

/// What a render produced, for logging and the `--summary` output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSummary {
    /// Number of input samples (minutes).
    pub samples: usize,
    /// Number of compressed blocks.
    pub blocks: usize,
    /// Number of connector ribbons.
    pub connectors: usize,
    /// Connectors that needed a clip rectangle.
    pub clipped_connectors: usize,
    /// Number of time ticks.
    pub ticks: usize,
    /// Scrollable content width in px.
    pub content_width: f64,
    /// Time of the first sample.
    pub sleep_start: NaiveDateTime,
    /// Time just after the last sample.
    pub wake_time: NaiveDateTime,
    /// Time per stage, in row order.
    pub stages: Vec<StageMinutes>,
}

/// Total minutes per stage, in the table's row order.
#[must_use]
pub fn stage_minutes(blocks: &[Block], table: &StageTable) -> Vec<StageMinutes> {
    table
        .order
        .iter()
        .map(|&stage| StageMinutes {
            stage,
            label: table.style(stage).label.clone(),
            minutes: blocks
                .iter()
                .filter(|b| b.stage == stage)
                .map(Block::minutes)
                .sum(),
        })
        .collect()
}
