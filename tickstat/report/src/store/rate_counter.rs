use crate::time_series::Point;

const BUCKET_MS: u64 = 1000;

/// Sums increments per wall-clock second and commits one point per finished
/// second.
///
/// A committed point uses the last time observed inside its bucket, not the
/// boundary that closed it.
#[derive(Debug, Default, Clone)]
pub struct RateCounter {
    bucket_count: f64,
    bucket_second: Option<u64>,
    last_time_ms: u64,
    committed: Vec<Point>,
}

impl RateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count of the bucket `time_ms` falls into.
    pub fn increment(&mut self, delta: f64, time_ms: u64) -> f64 {
        let second = time_ms / BUCKET_MS;
        if let Some(current) = self.bucket_second {
            if current != second {
                self.committed
                    .push(Point::new(self.last_time_ms, self.bucket_count));
                self.bucket_count = 0.0;
            }
        }
        self.bucket_second = Some(second);
        self.bucket_count += delta;
        self.last_time_ms = time_ms;
        self.bucket_count
    }

    pub fn committed(&self) -> &[Point] {
        &self.committed
    }

    pub fn in_progress(&self) -> Option<Point> {
        self.bucket_second
            .map(|_| Point::new(self.last_time_ms, self.bucket_count))
    }

    pub fn points(&self) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.committed.len() + 1);
        points.extend_from_slice(&self.committed);
        points.extend(self.in_progress());
        points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points().into_iter().map(|p| p.value).collect()
    }
}
