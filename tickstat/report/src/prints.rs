use crate::{comparison::Comparison, report::TelemetryReport, summary::MetricSummary};
use colored::{Color, ColoredString, Colorize};
use tracing::info;

impl TelemetryReport {
    pub fn print_summary(&self) {
        let summary = &self.summary;
        let header = format!(
            "Telemetry: {}, duration: {:.2} s, {} series\n",
            self.source,
            summary.duration_ms as f64 / 1000.0,
            summary.metrics.len(),
        )
        .blue();

        info!("{}", header);

        summary
            .metrics
            .iter()
            .for_each(|(name, metric)| info!("{}", metric.formatted_string(name)));
    }
}

impl MetricSummary {
    pub fn formatted_string(&self, name: &str) -> ColoredString {
        format!(
            "{}: samples: {}, min: {:.2}, average: {:.2}, max: {:.2}, last: {:.2}",
            name, self.count, self.min, self.average, self.max, self.last,
        )
        .color(Color::Green)
    }
}

/// Logs one colored line per compared key: green for a decrease, red for an
/// increase, yellow when the key is missing or the percentage is not finite.
pub fn print_comparison(comparison: &Comparison) {
    comparison.iter().for_each(|(name, variation)| {
        let line = match variation {
            None => format!("{name}: missing in candidate").color(Color::Yellow),
            Some(variation) if !variation.variation_percent.is_finite() => format!(
                "{name}: {:+.2} (reference is zero)",
                variation.variation
            )
            .color(Color::Yellow),
            Some(variation) => {
                let color = if variation.variation > 0.0 {
                    Color::Red
                } else if variation.variation < 0.0 {
                    Color::Green
                } else {
                    Color::White
                };
                format!(
                    "{name}: {:+.2} ({:+.2}%)",
                    variation.variation, variation.variation_percent
                )
                .color(color)
            }
        };
        info!("{}", line);
    });
}
