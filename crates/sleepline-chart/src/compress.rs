//! Stage sequence compression: dense per-minute samples into blocks.
//!
//! A block starts at index 0 and ends wherever the stage differs from
//! the block's first sample, or at the end of the sequence. Adjacent
//! equal samples always merge, so no two neighbouring blocks share a
//! stage.

use crate::types::{Block, ChartError, StageCode};

/// Compress a sample sequence into contiguous same-stage blocks.
///
/// The result partitions `[0, samples.len())` in ascending order with no
/// gaps or overlaps.
///
/// # Errors
///
/// Returns [`ChartError::EmptyInput`] if `samples` is empty.
pub fn compress_stages(samples: &[StageCode]) -> Result<Vec<Block>, ChartError> {
    let Some(&first) = samples.first() else {
        return Err(ChartError::EmptyInput);
    };

    let mut blocks = Vec::new();
    let mut start = 0;
    let mut stage = first;

    for (i, &sample) in samples.iter().enumerate().skip(1) {
        if sample != stage {
            blocks.push(Block::new(start, i, stage));
            start = i;
            stage = sample;
        }
    }
    blocks.push(Block::new(start, samples.len(), stage));

    Ok(blocks)
}
