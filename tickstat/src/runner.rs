use crate::args::{AnalyzeArgs, CompareArgs, TickstatArgs, TickstatCommand};
use crate::error::TickstatError;
use crate::ingest::{ingest_file, IngestOptions};
use crate::layout::ColumnLayout;
use crate::plot::plot_chart;
use crate::report_builder::TelemetryReportBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tickstat_report::report::TelemetryReport;
use tickstat_report::store::Store;
use tickstat_report::{compare, print_comparison, ChartKind, Comparison};
use tracing::info;

pub const SUMMARY_FILE_NAME: &str = "summary.json";

pub fn run(args: TickstatArgs) -> Result<(), TickstatError> {
    match args.command {
        TickstatCommand::Analyze(args) => analyze(&args).map(|_| ()),
        TickstatCommand::Compare(args) => compare_summaries(&args).map(|_| ()),
    }
}

/// Processes every file in order and returns the written summary paths.
/// The first failing file stops the run.
pub fn analyze(args: &AnalyzeArgs) -> Result<Vec<PathBuf>, TickstatError> {
    let layout = match &args.layout {
        Some(path) => ColumnLayout::from_file(path)?,
        None => ColumnLayout::default(),
    };
    let identifier = args.identifier.clone().or_else(|| {
        hostname::get()
            .ok()
            .map(|name| name.to_string_lossy().to_string())
    });
    let options = IngestOptions {
        spike_threshold_ms: args.spike_threshold_ms,
    };
    let mut store = Store::with_frequency_window(args.frequency_window_ms);
    let mut summaries = Vec::with_capacity(args.files.len());

    for file in &args.files {
        store.clear();
        let stem = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .ok_or_else(|| TickstatError::InvalidInputFile(file.display().to_string()))?;
        let output_directory = Path::new(&args.output_dir).join(&stem);
        fs::create_dir_all(&output_directory)?;

        info!("Ingesting {}...", file.display());
        let stats = ingest_file(file, &mut store, &layout, &options)?;
        info!(
            "Ingested {} rows covering {:.2} s from {}",
            stats.rows,
            stats.duration_ms as f64 / 1000.0,
            file.display()
        );

        let source = file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or(stem);
        let report = TelemetryReportBuilder::build(&store, source, identifier.clone());
        let summary_path = output_directory.join(SUMMARY_FILE_NAME);
        write_json(&summary_path, &report)?;
        info!("Summary written to {}", summary_path.display());

        if !args.skip_charts {
            for kind in ChartKind::ALL {
                plot_chart(&store, kind, &report.source, &output_directory, !args.light)?;
            }
        }

        report.print_summary();
        summaries.push(summary_path);
    }
    Ok(summaries)
}

pub fn compare_summaries(args: &CompareArgs) -> Result<Comparison, TickstatError> {
    let reference: TelemetryReport = read_json(&args.reference)?;
    let candidate: TelemetryReport = read_json(&args.candidate)?;
    info!(
        "Comparing {} (reference) with {} (candidate)",
        reference.source, candidate.source
    );

    let comparison = compare(&reference.summary.flatten(), &candidate.summary.flatten());
    print_comparison(&comparison);

    if let Some(output) = &args.output {
        write_json(output, &comparison)?;
        info!("Comparison written to {}", output.display());
    }
    Ok(comparison)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, TickstatError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), TickstatError> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}
