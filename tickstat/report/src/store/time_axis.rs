/// Ordered registry of observation timestamps shared by every series.
///
/// Consecutive duplicates collapse and the axis never goes backwards: a time
/// earlier than the tail is not recorded and the tail is returned instead.
#[derive(Debug, Default, Clone)]
pub struct TimeAxis {
    points: Vec<u64>,
}

impl TimeAxis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `time_ms` and returns the timestamp the axis now ends with.
    pub fn push(&mut self, time_ms: u64) -> u64 {
        match self.points.last() {
            Some(&last) if time_ms <= last => last,
            _ => {
                self.points.push(time_ms);
                time_ms
            }
        }
    }

    pub fn first(&self) -> Option<u64> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<u64> {
        self.points.last().copied()
    }

    pub fn previous(&self) -> Option<u64> {
        self.points.len().checked_sub(2).map(|i| self.points[i])
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_collapse_consecutive_duplicates() {
        let mut axis = TimeAxis::new();
        for time in [0, 10, 10, 10, 20, 20, 35] {
            axis.push(time);
        }

        assert_eq!(axis.as_slice(), &[0, 10, 20, 35]);
    }

    #[test]
    fn should_stay_non_decreasing_and_return_tail_for_earlier_time() {
        let mut axis = TimeAxis::new();
        axis.push(100);
        let accepted = axis.push(50);

        assert_eq!(accepted, 100);
        assert_eq!(axis.as_slice(), &[100]);
        assert!(axis.as_slice().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn should_expose_tail_and_penultimate() {
        let mut axis = TimeAxis::new();
        assert_eq!(axis.last(), None);
        assert_eq!(axis.previous(), None);

        axis.push(5);
        assert_eq!(axis.last(), Some(5));
        assert_eq!(axis.previous(), None);

        axis.push(8);
        assert_eq!(axis.last(), Some(8));
        assert_eq!(axis.previous(), Some(5));
        assert_eq!(axis.first(), Some(5));
    }
}
