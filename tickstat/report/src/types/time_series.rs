use serde::{Deserialize, Serialize};

/// A single observation on the store timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub time_ms: u64,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Point {
    pub fn new(time_ms: u64, value: f64) -> Self {
        Self {
            time_ms,
            value,
            label: None,
        }
    }

    pub fn labeled(time_ms: u64, value: f64, label: impl Into<String>) -> Self {
        Self {
            time_ms,
            value,
            label: Some(label.into()),
        }
    }

    pub fn time_s(&self) -> f64 {
        self.time_ms as f64 / 1000.0
    }
}

/// Points of one series prepared for rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<Point>,
    pub step: bool,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>, points: Vec<Point>, step: bool) -> Self {
        Self {
            name: name.into(),
            points,
            step,
        }
    }

    /// Multiplies every value, e.g. to turn bytes into megabytes.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.points.iter_mut().for_each(|p| p.value *= factor);
        self
    }

    pub fn as_charming_points(&self) -> Vec<Vec<f64>> {
        if self.step {
            return self.as_step_points();
        }
        self.points
            .iter()
            .map(|p| vec![p.time_s(), p.value])
            .collect()
    }

    /// Holds every value until the next point, so a rate reads as a staircase.
    fn as_step_points(&self) -> Vec<Vec<f64>> {
        let mut points = Vec::with_capacity(self.points.len() * 2);
        for window in self.points.windows(2) {
            let (current, next) = (&window[0], &window[1]);
            points.push(vec![current.time_s(), current.value]);
            points.push(vec![next.time_s(), current.value]);
        }
        if let Some(last) = self.points.last() {
            points.push(vec![last.time_s(), last.value]);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_milliseconds_to_seconds() {
        let series = TimeSeries::new("memory", vec![Point::new(1500, 2.0)], false);
        assert_eq!(series.as_charming_points(), vec![vec![1.5, 2.0]]);
    }

    #[test]
    fn step_series_should_hold_value_until_next_point() {
        let series = TimeSeries::new(
            "tick_rate",
            vec![Point::new(900, 3.0), Point::new(1900, 5.0)],
            true,
        );

        assert_eq!(
            series.as_charming_points(),
            vec![vec![0.9, 3.0], vec![1.9, 3.0], vec![1.9, 5.0]]
        );
    }

    #[test]
    fn scaled_should_multiply_values() {
        let series = TimeSeries::new("memory", vec![Point::new(0, 2048.0)], false).scaled(0.5);
        assert_eq!(series.points[0].value, 1024.0);
    }
}
