use crate::error::TickstatError;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Header names of the telemetry columns. Missing fields in a layout file keep
/// their defaults.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ColumnLayout {
    /// Absolute tick time in milliseconds. Without it, time is the running sum
    /// of frame durations.
    pub time: Option<String>,
    pub frame_duration: String,
    pub memory: String,
    /// Columns summed into the CPU total.
    pub cpu: Vec<String>,
    pub players: String,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            time: Some("time_ms".to_owned()),
            frame_duration: "frame_ms".to_owned(),
            memory: "memory_bytes".to_owned(),
            cpu: vec!["cpu_user_ms".to_owned(), "cpu_system_ms".to_owned()],
            players: "players".to_owned(),
        }
    }
}

/// Column indexes of one CSV header, `None` when a column is absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedColumns {
    pub time: Option<usize>,
    pub frame_duration: Option<usize>,
    pub memory: Option<usize>,
    pub cpu: Vec<(String, usize)>,
    pub players: Option<usize>,
}

impl ResolvedColumns {
    pub fn is_empty(&self) -> bool {
        self.time.is_none()
            && self.frame_duration.is_none()
            && self.memory.is_none()
            && self.cpu.is_empty()
            && self.players.is_none()
    }
}

impl ColumnLayout {
    pub fn from_file(path: &Path) -> Result<Self, TickstatError> {
        let content = fs::read_to_string(path)?;
        let layout = toml::from_str(&content)?;
        info!("Loaded column layout from {}", path.display());
        Ok(layout)
    }

    pub fn resolve(&self, headers: &StringRecord) -> ResolvedColumns {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name.trim()))
        };

        ResolvedColumns {
            time: self.time.as_deref().and_then(find),
            frame_duration: find(self.frame_duration.as_str()),
            memory: find(self.memory.as_str()),
            cpu: self
                .cpu
                .iter()
                .filter_map(|name| find(name.as_str()).map(|index| (name.clone(), index)))
                .collect(),
            players: find(self.players.as_str()),
        }
    }
}
