use chrono::Utc;
use tickstat_report::report::TelemetryReport;
use tickstat_report::store::Store;

pub struct TelemetryReportBuilder;

impl TelemetryReportBuilder {
    pub fn build(store: &Store, source: String, identifier: Option<String>) -> TelemetryReport {
        let uuid = uuid::Uuid::new_v4();
        let timestamp = Utc::now().to_rfc3339();

        TelemetryReport {
            uuid,
            timestamp,
            identifier,
            source,
            summary: store.summary(),
        }
    }
}
