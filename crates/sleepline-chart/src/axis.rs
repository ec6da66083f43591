//! Time axis: tick positions and `HH:MM` labels.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::layout::Layout;

/// Tick label format.
const LABEL_FORMAT: &str = "%H:%M";

/// One time tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Minutes elapsed since sleep start.
    pub minutes: usize,
    /// Guide line x coordinate (between bars).
    pub x: f64,
    /// Wall-clock time of the tick.
    pub time: NaiveDateTime,
    /// `HH:MM` label.
    pub label: String,
}

/// Maps elapsed minutes onto wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeAxis {
    sleep_start: NaiveDateTime,
    total_minutes: usize,
    interval: u32,
}

impl TimeAxis {
    /// A time axis for `total_minutes` samples starting at `sleep_start`,
    /// ticking every `interval` minutes.
    #[must_use]
    pub const fn new(sleep_start: NaiveDateTime, total_minutes: usize, interval: u32) -> Self {
        Self {
            sleep_start,
            total_minutes,
            interval,
        }
    }

    /// Wall-clock time `minutes` after sleep start.
    ///
    /// Saturates at the start time if the offset overflows the calendar.
    #[must_use]
    pub fn time_at(&self, minutes: usize) -> NaiveDateTime {
        i64::try_from(minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .and_then(|delta| self.sleep_start.checked_add_signed(delta))
            .unwrap_or(self.sleep_start)
    }

    /// End of the last sample.
    #[must_use]
    pub fn wake_time(&self) -> NaiveDateTime {
        self.time_at(self.total_minutes)
    }

    /// Ticks at `0, interval, 2 * interval, ...` up to and including the
    /// total minute count.
    ///
    /// Each tick sits half a gap left of its bar so the guide falls
    /// between columns.
    #[must_use]
    pub fn ticks(&self, layout: &Layout) -> Vec<Tick> {
        let step = usize::try_from(self.interval).unwrap_or(usize::MAX).max(1);
        (0..=self.total_minutes)
            .step_by(step)
            .map(|minutes| {
                let time = self.time_at(minutes);
                Tick {
                    minutes,
                    x: layout.x_pos(minutes) - layout.gap() / 2.0,
                    time,
                    label: time.format(LABEL_FORMAT).to_string(),
                }
            })
            .collect()
    }
}
