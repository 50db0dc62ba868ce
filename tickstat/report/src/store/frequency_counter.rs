use super::labeled_series::LabeledSeries;
use crate::time_series::Point;

pub const DEFAULT_RESET_WINDOW_MS: u64 = 1000;

/// Counter over a [`LabeledSeries`] that drops back to zero once the time since
/// its last point exceeds the reset window, modeling a count per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyCounter {
    reset_window_ms: u64,
}

impl Default for FrequencyCounter {
    fn default() -> Self {
        Self::new(DEFAULT_RESET_WINDOW_MS)
    }
}

impl FrequencyCounter {
    pub fn new(reset_window_ms: u64) -> Self {
        Self { reset_window_ms }
    }

    pub fn reset_window_ms(&self) -> u64 {
        self.reset_window_ms
    }

    /// Applies the reset rule at `time_ms`, then adds `delta` to the last point
    /// in place. Returns the updated count.
    pub fn increment(&self, series: &mut LabeledSeries, delta: f64, time_ms: u64) -> f64 {
        match series.last().map(|p| p.time_ms) {
            None => series.push(Point::new(time_ms, 0.0)),
            Some(last_time) if time_ms.saturating_sub(last_time) > self.reset_window_ms => {
                series.push(Point::new(last_time, 0.0));
                series.push(Point::new(time_ms, 0.0));
            }
            Some(_) => {}
        }
        series.add_to_last(delta).unwrap_or(delta)
    }
}
