use crate::utils::round_float;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, derive_new::new)]
pub struct MetricSummary {
    pub count: u64,
    #[serde(serialize_with = "round_float")]
    pub min: f64,
    #[serde(serialize_with = "round_float")]
    pub max: f64,
    #[serde(serialize_with = "round_float")]
    pub average: f64,
    #[serde(serialize_with = "round_float")]
    pub last: f64,
}

impl MetricSummary {
    /// Single pass over `values`; `None` when there are none.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut count = 0u64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut last = 0.0;
        for value in values {
            count += 1;
            min = min.min(value);
            max = max.max(value);
            sum += value;
            last = value;
        }
        (count > 0).then(|| Self::new(count, min, max, sum / count as f64, last))
    }
}

/// Scalar statistics of a whole store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoreSummary {
    pub duration_ms: u64,
    pub metrics: BTreeMap<String, MetricSummary>,
    #[serde(default)]
    pub vars: BTreeMap<String, Value>,
}

impl StoreSummary {
    /// Flat `name -> number` view, e.g. `memory.max` or `vars.rows`.
    pub fn flatten(&self) -> BTreeMap<String, f64> {
        let mut flat = BTreeMap::new();
        flat.insert("duration_ms".to_owned(), self.duration_ms as f64);
        for (name, metric) in &self.metrics {
            flat.insert(format!("{name}.count"), metric.count as f64);
            flat.insert(format!("{name}.min"), metric.min);
            flat.insert(format!("{name}.max"), metric.max);
            flat.insert(format!("{name}.average"), metric.average);
            flat.insert(format!("{name}.last"), metric.last);
        }
        for (name, value) in &self.vars {
            if let Some(number) = value.as_f64() {
                flat.insert(format!("vars.{name}"), number);
            }
        }
        flat
    }
}
