mod frequency_counter;
mod key_index;
mod labeled_series;
mod numeric_series;
mod rate_counter;
mod time_axis;

pub use frequency_counter::{FrequencyCounter, DEFAULT_RESET_WINDOW_MS};
pub use key_index::{CompositeKeyIndex, KeyPath};
pub use labeled_series::LabeledSeries;
pub use numeric_series::{NumericSeries, INITIAL_CAPACITY};
pub use rate_counter::RateCounter;
pub use time_axis::TimeAxis;

use crate::error::StoreError;
use crate::summary::{MetricSummary, StoreSummary};
use crate::time_series::Point;
use ahash::AHashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Options for [`Store::set_value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOptions {
    pub label: Option<String>,
    pub time: Option<u64>,
    pub skip_duplication: bool,
    pub dedupe: bool,
}

impl SetOptions {
    pub fn at(time: Option<u64>) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_time(mut self, time: u64) -> Self {
        self.time = Some(time);
        self
    }

    pub fn skip_duplication(mut self) -> Self {
        self.skip_duplication = true;
        self
    }

    pub fn dedupe(mut self) -> Self {
        self.dedupe = true;
        self
    }
}

/// In-memory time series store over one shared [`TimeAxis`].
///
/// Every key is created on its first write and lives until [`Store::clear`].
/// Reads resolve a key against rate counters first, then numeric series, then
/// labeled series.
#[derive(Debug, Default)]
pub struct Store {
    axis: TimeAxis,
    numeric: CompositeKeyIndex<NumericSeries>,
    labeled: CompositeKeyIndex<LabeledSeries>,
    rates: CompositeKeyIndex<RateCounter>,
    frequency: FrequencyCounter,
    vars: AHashMap<String, Value>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frequency_window(reset_window_ms: u64) -> Self {
        Self {
            frequency: FrequencyCounter::new(reset_window_ms),
            ..Self::default()
        }
    }

    pub fn frequency_window_ms(&self) -> u64 {
        self.frequency.reset_window_ms()
    }

    pub fn add_time_point(&mut self, time_ms: u64) -> u64 {
        self.axis.push(time_ms)
    }

    fn resolve_time(&mut self, time: Option<u64>) -> u64 {
        match time {
            Some(time_ms) if time_ms > 0 => self.axis.push(time_ms),
            _ => self.axis.last().unwrap_or_default(),
        }
    }

    /// Writes `value` under `key`. Unlabeled values go to a numeric series,
    /// labeled ones to a labeled series.
    ///
    /// With `dedupe`, a numeric value equal to the current last one is not
    /// appended and the existing last point is returned.
    pub fn set_value(
        &mut self,
        key: impl Into<KeyPath>,
        value: f64,
        options: SetOptions,
    ) -> Result<Point, StoreError> {
        let key = key.into();
        key.validate()?;
        let time_ms = self.resolve_time(options.time);
        match options.label {
            None => {
                let series = self.numeric.get_or_insert_with(&key, NumericSeries::new)?;
                if options.dedupe {
                    if let Some((last_time, last_value)) = series.last() {
                        if last_value == value {
                            return Ok(Point::new(last_time, last_value));
                        }
                    }
                }
                series.push(time_ms, value);
                Ok(Point::new(time_ms, value))
            }
            Some(label) => {
                let series = self.labeled.get_or_insert_with(&key, LabeledSeries::new)?;
                let point = Point::labeled(time_ms, value, label);
                series.append(point.clone(), options.skip_duplication);
                Ok(point)
            }
        }
    }

    /// Appends `last + delta`, starting from zero for an absent key. A key that
    /// only exists as a labeled series keeps growing there.
    pub fn increment(
        &mut self,
        key: impl Into<KeyPath>,
        delta: f64,
        time: Option<u64>,
    ) -> Result<Point, StoreError> {
        let key = key.into();
        key.validate()?;
        if !self.numeric.contains(&key) {
            if let Some(last) = self.labeled.get(&key).and_then(LabeledSeries::last).cloned() {
                let options = SetOptions {
                    label: last.label,
                    ..SetOptions::at(time)
                };
                return self.set_value(key, last.value + delta, options);
            }
        }

        let last = self
            .numeric
            .get(&key)
            .and_then(NumericSeries::last_value)
            .unwrap_or_default();
        self.set_value(key, last + delta, SetOptions::at(time))
    }

    /// Adds `delta` to the last point of a frequency series in place, after
    /// resetting it if the reset window elapsed. Returns the updated count.
    pub fn increment_frequency(
        &mut self,
        key: impl Into<KeyPath>,
        delta: f64,
        time: Option<u64>,
    ) -> Result<f64, StoreError> {
        let key = key.into();
        key.validate()?;
        let time_ms = self.resolve_time(time);
        let counter = self.frequency;
        let series = self.labeled.get_or_insert_with(&key, LabeledSeries::new)?;
        Ok(counter.increment(series, delta, time_ms))
    }

    /// Adds `delta` to the per-second bucket of `time_ms` and returns the
    /// in-progress bucket count.
    pub fn increment_rate(
        &mut self,
        key: impl Into<KeyPath>,
        delta: f64,
        time_ms: u64,
    ) -> Result<f64, StoreError> {
        let key = key.into();
        key.validate()?;
        let time_ms = self.axis.push(time_ms);
        let counter = self.rates.get_or_insert_with(&key, RateCounter::new)?;
        Ok(counter.increment(delta, time_ms))
    }

    pub fn get_series(&self, key: impl Into<KeyPath>) -> Vec<Point> {
        let key = key.into();
        if let Some(counter) = self.rates.get(&key) {
            return counter.points();
        }
        if let Some(series) = self.numeric.get(&key) {
            return series.points().collect();
        }
        self.labeled
            .get(&key)
            .map(|series| series.points().to_vec())
            .unwrap_or_default()
    }

    /// Like [`Store::get_series`], with the last value carried to `end_time_ms`
    /// when the series stopped before it.
    pub fn get_series_extended(&self, key: impl Into<KeyPath>, end_time_ms: u64) -> Vec<Point> {
        let mut points = self.get_series(key);
        if let Some(last) = points.last() {
            if last.time_ms < end_time_ms {
                let value = last.value;
                points.push(Point::new(end_time_ms, value));
            }
        }
        points
    }

    pub fn get_values_only(&self, key: impl Into<KeyPath>) -> Vec<f64> {
        let key = key.into();
        if let Some(counter) = self.rates.get(&key) {
            return counter.values();
        }
        if let Some(series) = self.numeric.get(&key) {
            return series.values().to_vec();
        }
        self.labeled
            .get(&key)
            .map(|series| series.values().collect())
            .unwrap_or_default()
    }

    pub fn min(&self, key: impl Into<KeyPath>) -> Option<f64> {
        self.numeric.get(&key.into()).and_then(NumericSeries::min)
    }

    pub fn max(&self, key: impl Into<KeyPath>) -> Option<f64> {
        self.numeric.get(&key.into()).and_then(NumericSeries::max)
    }

    pub fn average(&self, key: impl Into<KeyPath>) -> Option<f64> {
        self.numeric.get(&key.into()).and_then(NumericSeries::average)
    }

    pub fn is_rate(&self, key: impl Into<KeyPath>) -> bool {
        self.rates.contains(&key.into())
    }

    pub fn contains(&self, key: impl Into<KeyPath>) -> bool {
        let key = key.into();
        self.rates.contains(&key) || self.numeric.contains(&key) || self.labeled.contains(&key)
    }

    pub fn first_time(&self) -> Option<u64> {
        self.axis.first()
    }

    pub fn last_time(&self) -> Option<u64> {
        self.axis.last()
    }

    pub fn previous_time(&self) -> Option<u64> {
        self.axis.previous()
    }

    pub fn time_axis(&self) -> &TimeAxis {
        &self.axis
    }

    pub fn set_var(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get_var(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Every key holding a series of any kind, sorted and deduplicated.
    pub fn keys(&self) -> Vec<KeyPath> {
        let mut keys = self
            .rates
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .chain(self.numeric.entries().into_iter().map(|(key, _)| key))
            .chain(self.labeled.entries().into_iter().map(|(key, _)| key))
            .collect::<Vec<_>>();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Keys nested one or more levels below `prefix`, e.g. `cpu.user` for `cpu`.
    pub fn child_keys(&self, prefix: &str) -> Vec<KeyPath> {
        self.keys()
            .into_iter()
            .filter(|key| key.is_composite() && key.first() == Some(prefix))
            .collect()
    }

    /// Scalar statistics per key, resolved with the same priority as reads.
    pub fn summary(&self) -> StoreSummary {
        let mut metrics = BTreeMap::new();
        for (key, counter) in self.rates.entries() {
            if let Some(summary) = MetricSummary::from_values(counter.values()) {
                metrics.insert(key.to_string(), summary);
            }
        }
        for (key, series) in self.numeric.entries() {
            let name = key.to_string();
            if metrics.contains_key(&name) {
                continue;
            }
            if let (Some(min), Some(max), Some(average), Some(last)) = (
                series.min(),
                series.max(),
                series.average(),
                series.last_value(),
            ) {
                let summary = MetricSummary::new(series.len() as u64, min, max, average, last);
                metrics.insert(name, summary);
            }
        }
        for (key, series) in self.labeled.entries() {
            if let Some(summary) = MetricSummary::from_values(series.values()) {
                metrics.entry(key.to_string()).or_insert(summary);
            }
        }

        let vars = self
            .vars
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let duration_ms = match (self.axis.first(), self.axis.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        };

        StoreSummary {
            duration_ms,
            metrics,
            vars,
        }
    }

    pub fn clear(&mut self) {
        debug!(
            "Clearing store with {} timestamps and {} series",
            self.axis.len(),
            self.rates.len() + self.numeric.len() + self.labeled.len()
        );
        self.axis.clear();
        self.numeric.clear();
        self.labeled.clear();
        self.rates.clear();
        self.vars.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_value_should_use_axis_tail_without_time() {
        let mut store = Store::new();
        store.add_time_point(40);
        let point = store.set_value("memory", 1.0, SetOptions::default()).unwrap();

        assert_eq!(point, Point::new(40, 1.0));
    }

    #[test]
    fn set_value_should_register_positive_time() {
        let mut store = Store::new();
        store
            .set_value("memory", 1.0, SetOptions::default().with_time(15))
            .unwrap();
        store
            .set_value("memory", 2.0, SetOptions::default().with_time(30))
            .unwrap();

        assert_eq!(store.last_time(), Some(30));
        assert_eq!(store.previous_time(), Some(15));
        assert_eq!(
            store.get_series("memory"),
            vec![Point::new(15, 1.0), Point::new(30, 2.0)]
        );
    }

    #[test]
    fn set_value_with_earlier_time_should_use_tail() {
        let mut store = Store::new();
        store.add_time_point(100);
        let point = store
            .set_value("memory", 1.0, SetOptions::default().with_time(50))
            .unwrap();

        assert_eq!(point.time_ms, 100);
        assert_eq!(store.time_axis().as_slice(), &[100]);
    }

    #[test]
    fn dedupe_should_return_unchanged_last_point() {
        let mut store = Store::new();
        store
            .set_value("players", 4.0, SetOptions::at(Some(10)).dedupe())
            .unwrap();
        let point = store
            .set_value("players", 4.0, SetOptions::at(Some(20)).dedupe())
            .unwrap();

        assert_eq!(point, Point::new(10, 4.0));
        assert_eq!(store.get_series("players").len(), 1);
    }

    #[test]
    fn labeled_value_should_route_to_labeled_series() {
        let mut store = Store::new();
        store
            .set_value("events", 1.0, SetOptions::at(Some(10)).with_label("join"))
            .unwrap();
        store
            .set_value("events", -1.0, SetOptions::at(Some(20)).with_label("leave"))
            .unwrap();

        assert_eq!(
            store.get_series("events"),
            vec![
                Point::labeled(10, 1.0, "join"),
                Point::labeled(20, 1.0, "join"),
                Point::labeled(20, -1.0, "leave"),
            ]
        );
        assert_eq!(store.min("events"), None);
    }

    #[test]
    fn increment_should_start_absent_key_from_zero_and_append() {
        let mut store = Store::new();
        store.increment("errors", 2.0, Some(10)).unwrap();
        store.increment("errors", 3.0, Some(20)).unwrap();

        assert_eq!(
            store.get_series("errors"),
            vec![Point::new(10, 2.0), Point::new(20, 5.0)]
        );
    }

    #[test]
    fn increment_should_keep_labeled_storage() {
        let mut store = Store::new();
        store
            .set_value("events", 1.0, SetOptions::at(Some(10)).with_label("join"))
            .unwrap();
        let point = store.increment("events", 1.0, Some(20)).unwrap();

        assert_eq!(point, Point::labeled(20, 2.0, "join"));
        assert_eq!(store.min("events"), None);
    }

    #[test]
    fn increment_on_labeled_key_should_match_set_value() {
        let first = SetOptions::at(Some(10)).with_label("join");
        let mut incremented = Store::new();
        incremented.set_value("events", 1.0, first.clone()).unwrap();
        incremented.increment("events", 1.0, Some(20)).unwrap();

        let mut written = Store::new();
        written.set_value("events", 1.0, first).unwrap();
        written
            .set_value("events", 2.0, SetOptions::at(Some(20)).with_label("join"))
            .unwrap();

        assert_eq!(incremented.get_series("events"), written.get_series("events"));
        assert_eq!(
            incremented.get_series("events"),
            vec![
                Point::labeled(10, 1.0, "join"),
                Point::labeled(20, 1.0, "join"),
                Point::labeled(20, 2.0, "join"),
            ]
        );
    }

    #[test]
    fn increment_frequency_should_mutate_last_point() {
        let mut store = Store::new();
        assert_eq!(store.increment_frequency("spikes", 1.0, Some(10)).unwrap(), 1.0);
        assert_eq!(store.increment_frequency("spikes", 1.0, Some(20)).unwrap(), 2.0);

        assert_eq!(store.get_series("spikes"), vec![Point::new(10, 2.0)]);
    }

    #[test]
    fn increment_frequency_should_use_configured_window() {
        let mut store = Store::with_frequency_window(50);
        store.increment_frequency("spikes", 1.0, Some(10)).unwrap();
        let count = store.increment_frequency("spikes", 1.0, Some(100)).unwrap();

        assert_eq!(count, 1.0);
        assert_eq!(store.frequency_window_ms(), 50);
    }

    #[test]
    fn rate_series_should_take_priority_on_reads() {
        let mut store = Store::new();
        store.set_value("ticks", 42.0, SetOptions::at(Some(1))).unwrap();
        store.increment_rate("ticks", 1.0, 100).unwrap();

        assert!(store.is_rate("ticks"));
        assert_eq!(store.get_series("ticks"), vec![Point::new(100, 1.0)]);
        assert_eq!(store.get_values_only("ticks"), vec![1.0]);
    }

    #[test]
    fn absent_key_should_read_as_empty() {
        let store = Store::new();
        assert!(store.get_series("missing").is_empty());
        assert!(store.get_values_only("missing").is_empty());
        assert_eq!(store.average("missing"), None);
        assert!(!store.is_rate("missing"));
    }

    #[test]
    fn extended_series_should_reach_end_time_once() {
        let mut store = Store::new();
        store.set_value("memory", 7.0, SetOptions::at(Some(10))).unwrap();

        let extended = store.get_series_extended("memory", 50);
        assert_eq!(extended, vec![Point::new(10, 7.0), Point::new(50, 7.0)]);

        let not_extended = store.get_series_extended("memory", 10);
        assert_eq!(not_extended, vec![Point::new(10, 7.0)]);
    }

    #[test]
    fn composite_keys_should_address_separate_series() {
        let mut store = Store::new();
        store
            .set_value(["cpu", "user"], 1.0, SetOptions::at(Some(10)))
            .unwrap();
        store
            .set_value(["cpu", "system"], 2.0, SetOptions::default())
            .unwrap();
        store.set_value("cpu_total", 3.0, SetOptions::default()).unwrap();

        assert_eq!(store.max(["cpu", "user"]), Some(1.0));
        assert_eq!(store.max(["cpu", "system"]), Some(2.0));
        let children = store
            .child_keys("cpu")
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(children, vec!["cpu.system", "cpu.user"]);
    }

    #[test]
    fn empty_key_should_fail_fast() {
        let mut store = Store::new();
        let empty = KeyPath::new(Vec::new());

        assert_eq!(
            store.set_value(empty.clone(), 1.0, SetOptions::default()),
            Err(StoreError::InvalidKeyAddressing)
        );
        assert_eq!(
            store.increment_rate(empty, 1.0, 0),
            Err(StoreError::InvalidKeyAddressing)
        );
    }

    #[test]
    fn vars_should_be_independent_of_series() {
        let mut store = Store::new();
        store.set_var("duration_ms", 1200);
        store.set_var("source", "server.csv");

        assert_eq!(store.get_var("duration_ms"), Some(&json!(1200)));
        assert_eq!(store.get_var("source"), Some(&json!("server.csv")));
        assert!(store.keys().is_empty());
    }

    #[test]
    fn summary_should_cover_every_series_kind() {
        let mut store = Store::new();
        store.increment_rate("tick_rate", 1.0, 100).unwrap();
        store.increment_rate("tick_rate", 1.0, 1100).unwrap();
        store.set_value("memory", 10.0, SetOptions::default()).unwrap();
        store.set_value("memory", 30.0, SetOptions::default()).unwrap();
        store.increment_frequency("lag_spikes", 1.0, None).unwrap();
        store.set_var("rows", 2);

        let summary = store.summary();
        assert_eq!(summary.duration_ms, 1000);
        assert_eq!(summary.metrics["tick_rate"].count, 2);
        assert_eq!(summary.metrics["memory"], MetricSummary::new(2, 10.0, 30.0, 20.0, 30.0));
        assert_eq!(summary.metrics["lag_spikes"].last, 1.0);
        assert_eq!(summary.vars["rows"], json!(2));
    }

    #[test]
    fn summary_should_keep_dotted_components_apart_from_nested_keys() {
        let mut store = Store::new();
        store
            .set_value(["cpu", "user.time"], 1.0, SetOptions::at(Some(1)))
            .unwrap();
        store
            .set_value(["cpu", "user", "time"], 2.0, SetOptions::at(Some(1)))
            .unwrap();

        let summary = store.summary();
        assert_eq!(summary.metrics.len(), 2);
        assert_eq!(summary.metrics["cpu.user\\.time"].last, 1.0);
        assert_eq!(summary.metrics["cpu.user.time"].last, 2.0);
    }

    #[test]
    fn clear_should_drop_all_state() {
        let mut store = Store::new();
        store.increment_rate("tick_rate", 1.0, 100).unwrap();
        store.set_value("memory", 1.0, SetOptions::default()).unwrap();
        store.set_var("rows", 1);
        store.clear();

        assert_eq!(store.last_time(), None);
        assert!(store.keys().is_empty());
        assert_eq!(store.get_var("rows"), None);
        assert!(store.get_series("memory").is_empty());
    }
}
