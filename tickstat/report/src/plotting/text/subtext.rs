use crate::{plotting::chart_kind::ChartKind, store::Store, summary::MetricSummary};
use human_repr::HumanCount;

impl ChartKind {
    pub fn subtext(&self, store: &Store) -> String {
        let key = self.primary_key();
        let stats = match (store.min(key), store.average(key), store.max(key)) {
            (Some(min), Some(avg), Some(max)) => Some((min, avg, max)),
            _ => MetricSummary::from_values(store.get_values_only(key))
                .map(|s| (s.min, s.average, s.max)),
        };
        let Some((min, avg, max)) = stats else {
            return String::new();
        };

        let stats_text = match self {
            ChartKind::Memory => format!(
                "Min: {}  •  Avg: {}  •  Max: {}",
                (min as u64).human_count_bytes(),
                (avg as u64).human_count_bytes(),
                (max as u64).human_count_bytes(),
            ),
            _ => format!("Min: {min:.2}  •  Avg: {avg:.2}  •  Max: {max:.2}"),
        };

        let duration_s = match (store.first_time(), store.last_time()) {
            (Some(first), Some(last)) => (last - first) as f64 / 1000.0,
            _ => 0.0,
        };
        format!(
            "{stats_text}  •  {} Timestamps over {duration_s:.1} s",
            (store.time_axis().len() as u64).human_count_bare()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SetOptions;

    #[test]
    fn should_describe_numeric_series() {
        let mut store = Store::new();
        store.set_value("frame_duration", 10.0, SetOptions::at(Some(1000))).unwrap();
        store.set_value("frame_duration", 30.0, SetOptions::at(Some(3000))).unwrap();

        let subtext = ChartKind::FrameDuration.subtext(&store);
        assert!(subtext.starts_with("Min: 10.00  •  Avg: 20.00  •  Max: 30.00"));
        assert!(subtext.ends_with("over 2.0 s"));
    }

    #[test]
    fn should_fall_back_to_values_for_rate_series() {
        let mut store = Store::new();
        store.increment_rate("tick_rate", 1.0, 100).unwrap();
        store.increment_rate("tick_rate", 1.0, 200).unwrap();

        assert!(ChartKind::TickRate.subtext(&store).starts_with("Min: 2.00"));
    }

    #[test]
    fn should_be_empty_without_series() {
        assert!(ChartKind::Players.subtext(&Store::new()).is_empty());
    }
}
