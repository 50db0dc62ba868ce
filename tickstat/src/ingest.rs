use crate::error::TickstatError;
use crate::layout::{ColumnLayout, ResolvedColumns};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tickstat_report::metric_keys::{
    CPU, CPU_TOTAL, FRAME_DURATION, LAG_SPIKES, MEMORY, PLAYERS, PLAYER_EVENTS, TICK_RATE,
};
use tickstat_report::store::{SetOptions, Store};
use tickstat_report::StoreError;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestOptions {
    pub spike_threshold_ms: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: u64,
    pub malformed_cells: u64,
    pub duration_ms: u64,
}

pub fn ingest_file(
    path: &Path,
    store: &mut Store,
    layout: &ColumnLayout,
    options: &IngestOptions,
) -> Result<IngestStats, TickstatError> {
    let file = File::open(path)?;
    let stats = ingest_reader(BufReader::new(file), store, layout, options)?;
    if stats.malformed_cells > 0 {
        warn!(
            "{}: {} malformed cells were read as 0",
            path.display(),
            stats.malformed_cells
        );
    }
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    store.set_var("source", source);
    Ok(stats)
}

/// Feeds every CSV row of `reader` into `store`.
///
/// Cells that are missing or not numeric count as 0. Only I/O and CSV framing
/// errors abort ingestion.
pub fn ingest_reader<R: Read>(
    reader: R,
    store: &mut Store,
    layout: &ColumnLayout,
    options: &IngestOptions,
) -> Result<IngestStats, TickstatError> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = layout.resolve(reader.headers()?);
    if columns.is_empty() {
        warn!("None of the layout columns were found in the CSV header");
    }
    debug!("Resolved telemetry columns: {:?}", columns);

    let mut rows = RowIngestor::new(columns, options.spike_threshold_ms);
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        rows.ingest(&record, store)?;
    }
    Ok(rows.finish(store))
}

fn parse_cell(record: &StringRecord, index: usize) -> Option<f64> {
    record
        .get(index)
        .and_then(|cell| cell.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

struct RowIngestor {
    columns: ResolvedColumns,
    spike_threshold_ms: f64,
    elapsed_ms: f64,
    last_players: Option<f64>,
    rows: u64,
    malformed_cells: u64,
}

impl RowIngestor {
    fn new(columns: ResolvedColumns, spike_threshold_ms: f64) -> Self {
        Self {
            columns,
            spike_threshold_ms,
            elapsed_ms: 0.0,
            last_players: None,
            rows: 0,
            malformed_cells: 0,
        }
    }

    fn cell(&mut self, record: &StringRecord, index: Option<usize>) -> Option<f64> {
        let index = index?;
        let value = parse_cell(record, index);
        if value.is_none() {
            self.malformed_cells += 1;
        }
        Some(value.unwrap_or_default())
    }

    fn ingest(&mut self, record: &StringRecord, store: &mut Store) -> Result<(), StoreError> {
        self.rows += 1;
        let frame_duration = self.cell(record, self.columns.frame_duration);
        let time_ms = match self.cell(record, self.columns.time) {
            Some(time) => time.max(0.0) as u64,
            None => {
                self.elapsed_ms += frame_duration.unwrap_or_default().max(0.0);
                self.elapsed_ms.round() as u64
            }
        };

        store.increment_rate(TICK_RATE, 1.0, time_ms)?;
        let at = SetOptions::at(Some(time_ms));

        if let Some(frame_duration) = frame_duration {
            store.set_value(FRAME_DURATION, frame_duration, at.clone())?;
            if frame_duration > self.spike_threshold_ms {
                store.increment_frequency(LAG_SPIKES, 1.0, Some(time_ms))?;
            }
        }

        if let Some(memory) = self.cell(record, self.columns.memory) {
            store.set_value(MEMORY, memory, at.clone())?;
        }

        if !self.columns.cpu.is_empty() {
            let mut total = 0.0;
            for (name, index) in &self.columns.cpu {
                let value = parse_cell(record, *index);
                if value.is_none() {
                    self.malformed_cells += 1;
                }
                let value = value.unwrap_or_default();
                total += value;
                store.set_value([CPU, name.as_str()], value, at.clone())?;
            }
            store.set_value(CPU_TOTAL, total, at.clone())?;
        }

        if let Some(players) = self.cell(record, self.columns.players) {
            store.set_value(PLAYERS, players, at.clone().dedupe())?;
            if let Some(previous) = self.last_players.filter(|previous| *previous != players) {
                let delta = players - previous;
                let label = if delta > 0.0 { "join" } else { "leave" };
                store.set_value(PLAYER_EVENTS, delta, at.with_label(label))?;
            }
            self.last_players = Some(players);
        }
        Ok(())
    }

    fn finish(self, store: &mut Store) -> IngestStats {
        let duration_ms = match (store.first_time(), store.last_time()) {
            (Some(first), Some(last)) => last - first,
            _ => 0,
        };
        store.set_var("rows", self.rows);
        store.set_var("malformed_cells", self.malformed_cells);
        store.set_var("duration_ms", duration_ms);
        IngestStats {
            rows: self.rows,
            malformed_cells: self.malformed_cells,
            duration_ms,
        }
    }
}
