use crate::plotting::chart_kind::ChartKind;

/// Returns a title for a chart of one telemetry file
impl ChartKind {
    pub fn title(&self, source: &str) -> String {
        format!("{} - {}", self, source)
    }
}
