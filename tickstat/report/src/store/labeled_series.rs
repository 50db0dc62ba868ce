use crate::time_series::Point;

/// Ordered points that may carry a label.
#[derive(Debug, Default, Clone)]
pub struct LabeledSeries {
    points: Vec<Point>,
}

impl LabeledSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `point`. Unless `skip_duplication` is set, a change of value is
    /// preceded by a copy of the previous point moved to the new time, which
    /// renders as a step instead of a slope.
    pub fn append(&mut self, point: Point, skip_duplication: bool) {
        if !skip_duplication {
            if let Some(previous) = self.points.last() {
                if previous.value != point.value {
                    let carried = Point {
                        time_ms: point.time_ms,
                        value: previous.value,
                        label: previous.label.clone(),
                    };
                    self.points.push(carried);
                }
            }
        }
        self.points.push(point);
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Adds `delta` to the most recent point in place and returns its new value.
    pub fn add_to_last(&mut self, delta: f64) -> Option<f64> {
        self.points.last_mut().map(|point| {
            point.value += delta;
            point.value
        })
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_insert_carried_point_before_changed_value() {
        let mut series = LabeledSeries::new();
        series.append(Point::labeled(0, 1.0, "join"), false);
        series.append(Point::labeled(100, 2.0, "join"), false);

        assert_eq!(
            series.points(),
            &[
                Point::labeled(0, 1.0, "join"),
                Point::labeled(100, 1.0, "join"),
                Point::labeled(100, 2.0, "join"),
            ]
        );
    }

    #[test]
    fn should_append_only_new_point_when_skipping_duplication() {
        let mut series = LabeledSeries::new();
        series.append(Point::new(0, 1.0), true);
        series.append(Point::new(100, 2.0), true);

        assert_eq!(series.len(), 2);
        assert_eq!(series.last(), Some(&Point::new(100, 2.0)));
    }

    #[test]
    fn should_not_carry_unchanged_value() {
        let mut series = LabeledSeries::new();
        series.append(Point::new(0, 1.0), false);
        series.append(Point::new(100, 1.0), false);

        assert_eq!(series.len(), 2);
    }

    #[test]
    fn add_to_last_should_mutate_in_place() {
        let mut series = LabeledSeries::new();
        assert_eq!(series.add_to_last(1.0), None);

        series.push(Point::new(0, 0.0));
        assert_eq!(series.add_to_last(2.0), Some(2.0));
        assert_eq!(series.add_to_last(1.0), Some(3.0));
        assert_eq!(series.points(), &[Point::new(0, 3.0)]);
    }
}
