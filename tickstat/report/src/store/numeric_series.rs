use crate::time_series::Point;

pub const INITIAL_CAPACITY: usize = 1024;

/// Parallel time/value buffers for plain numeric observations.
///
/// Extrema and sum are updated on every append and never recomputed, so they
/// describe every value seen since the series was created.
#[derive(Debug, Clone)]
pub struct NumericSeries {
    times: Vec<u64>,
    values: Vec<f64>,
    capacity: usize,
    min: f64,
    max: f64,
    sum: f64,
}

impl Default for NumericSeries {
    fn default() -> Self {
        Self::new()
    }
}

impl NumericSeries {
    pub fn new() -> Self {
        Self {
            times: Vec::with_capacity(INITIAL_CAPACITY),
            values: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, time_ms: u64, value: f64) {
        if self.values.len() == self.capacity {
            self.grow();
        }
        self.times.push(time_ms);
        self.values.push(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
    }

    fn grow(&mut self) {
        let additional = self.capacity;
        self.times.reserve_exact(additional);
        self.values.reserve_exact(additional);
        self.capacity += additional;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<(u64, f64)> {
        self.times.last().copied().zip(self.values.last().copied())
    }

    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn min(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (!self.is_empty()).then_some(self.max)
    }

    pub fn average(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.sum / self.len() as f64)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.times
            .iter()
            .zip(self.values.iter())
            .map(|(time, value)| Point::new(*time, *value))
    }
}
