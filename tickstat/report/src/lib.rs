mod comparison;
mod error;
mod plotting;
mod prints;
pub mod store;
mod types;
mod utils;

pub use charming::Chart;
pub use comparison::{compare, Comparison, Variation};
pub use error::StoreError;
pub use plotting::chart::TelemetryChart;
pub use plotting::chart_kind::ChartKind;
pub use prints::print_comparison;
pub use types::*;

use store::{KeyPath, Store};
use types::time_series::TimeSeries;

const PRIMARY_COLOR: &str = "#5470C6";
const SECONDARY_COLOR: &str = "#EE6666";
const DETAIL_COLORS: [&str; 5] = ["#91CC75", "#FAC858", "#73C0DE", "#3BA272", "#FC8452"];

/// Builds the chart of `kind` for the data in `store`, or `None` when the
/// store has no series for it.
pub fn create_chart(store: &Store, kind: ChartKind, source: &str, dark: bool) -> Option<Chart> {
    let primary = kind.primary_key();
    if !store.contains(primary) {
        return None;
    }
    let end_time_ms = store.last_time().unwrap_or_default();
    let series_of = |key: &KeyPath| {
        TimeSeries::new(
            key.to_string(),
            store.get_series_extended(key, end_time_ms),
            store.is_rate(key),
        )
        .scaled(kind.value_scale())
    };

    let chart = TelemetryChart::new(&kind.title(source), &kind.subtext(store), dark)
        .with_time_x_axis();
    let primary_series = series_of(&KeyPath::from(primary));

    let chart = match kind {
        ChartKind::FrameDuration if store.contains(metric_keys::LAG_SPIKES) => {
            let spikes = series_of(&KeyPath::from(metric_keys::LAG_SPIKES));
            chart
                .with_dual_y_axis(kind.y_axis_label(), "Lag Spikes")
                .add_dual_time_line_series(&primary_series, Some(PRIMARY_COLOR), 1.0, 0, 2.0)
                .add_dual_time_line_series(&spikes, Some(SECONDARY_COLOR), 0.6, 1, 1.0)
        }
        ChartKind::Cpu => store.child_keys(metric_keys::CPU).iter().enumerate().fold(
            chart
                .with_y_axis(kind.y_axis_label())
                .add_time_series(&primary_series, Some(PRIMARY_COLOR), 1.0),
            |chart, (i, key)| {
                let color = DETAIL_COLORS[i % DETAIL_COLORS.len()];
                chart.add_time_series(&series_of(key), Some(color), 0.5)
            },
        ),
        _ => chart
            .with_y_axis(kind.y_axis_label())
            .add_time_series(&primary_series, Some(PRIMARY_COLOR), 1.0),
    };

    Some(chart.inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::SetOptions;

    #[test]
    fn should_skip_chart_without_primary_series() {
        let store = Store::new();
        assert!(create_chart(&store, ChartKind::Memory, "server.csv", true).is_none());
    }

    #[test]
    fn should_build_chart_for_every_kind_with_data() {
        let mut store = Store::new();
        store.increment_rate(metric_keys::TICK_RATE, 1.0, 100).unwrap();
        store
            .set_value(metric_keys::FRAME_DURATION, 16.0, SetOptions::default())
            .unwrap();
        store
            .increment_frequency(metric_keys::LAG_SPIKES, 1.0, None)
            .unwrap();
        store
            .set_value(metric_keys::MEMORY, 1024.0, SetOptions::default())
            .unwrap();
        store
            .set_value([metric_keys::CPU, "user"], 2.0, SetOptions::default())
            .unwrap();
        store
            .set_value(metric_keys::CPU_TOTAL, 2.0, SetOptions::default())
            .unwrap();
        store
            .set_value(metric_keys::PLAYERS, 3.0, SetOptions::default())
            .unwrap();

        for kind in ChartKind::ALL {
            assert!(create_chart(&store, kind, "server.csv", false).is_some());
        }
    }
}
