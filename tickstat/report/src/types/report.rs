use super::summary::StoreSummary;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Contents of `summary.json` written for one telemetry file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct TelemetryReport {
    pub uuid: Uuid,
    pub timestamp: String,
    pub identifier: Option<String>,
    pub source: String,
    #[serde(flatten)]
    pub summary: StoreSummary,
}
