use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub variation: f64,
    pub variation_percent: f64,
}

/// Per-key variation; `None` for keys missing from the candidate.
pub type Comparison = BTreeMap<String, Option<Variation>>;

/// Compares every key of `reference` against `candidate`.
///
/// A zero reference value yields an infinite or NaN percentage, which is left
/// for the caller to display.
pub fn compare(reference: &BTreeMap<String, f64>, candidate: &BTreeMap<String, f64>) -> Comparison {
    reference
        .iter()
        .map(|(name, reference_value)| {
            let variation = candidate.get(name).map(|candidate_value| {
                let variation = candidate_value - reference_value;
                Variation::new(variation, variation * 100.0 / reference_value)
            });
            (name.clone(), variation)
        })
        .collect()
}
