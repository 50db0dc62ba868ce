pub mod defaults;

use clap::{Parser, Subcommand};
use defaults::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct TickstatArgs {
    #[command(subcommand)]
    pub command: TickstatCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TickstatCommand {
    /// Ingest tick telemetry CSV files and write summaries and charts
    Analyze(AnalyzeArgs),
    /// Compare two summary.json files produced by `analyze`
    Compare(CompareArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Telemetry CSV files, one row per tick
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Output directory, each file gets its own subdirectory
    #[arg(long, short = 'o', default_value_t = DEFAULT_OUTPUT_DIR.to_owned())]
    pub output_dir: String,

    /// TOML file mapping telemetry columns to CSV headers
    #[arg(long, short = 'l')]
    pub layout: Option<PathBuf>,

    /// Idle window after which frequency counters restart from zero
    #[arg(long, default_value_t = DEFAULT_FREQUENCY_WINDOW_MS)]
    pub frequency_window_ms: u64,

    /// Frame duration above which a tick counts as a lag spike
    #[arg(long, default_value_t = DEFAULT_SPIKE_THRESHOLD_MS)]
    pub spike_threshold_ms: f64,

    /// Render charts with the light theme
    #[arg(long, default_value_t = false)]
    pub light: bool,

    /// Only write summaries
    #[arg(long, default_value_t = false)]
    pub skip_charts: bool,

    /// Identifier stored in summaries (defaults to hostname)
    #[arg(long)]
    pub identifier: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Reference summary.json
    #[arg(long, short = 'r')]
    pub reference: PathBuf,

    /// Candidate summary.json
    #[arg(long, short = 'c')]
    pub candidate: PathBuf,

    /// Write the comparison as JSON to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn should_have_valid_command_definition() {
        TickstatArgs::command().debug_assert();
    }

    #[test]
    fn analyze_should_use_defaults() {
        let args = TickstatArgs::parse_from(["tickstat", "analyze", "a.csv", "b.csv"]);
        let TickstatCommand::Analyze(analyze) = args.command else {
            panic!("expected analyze command");
        };

        assert_eq!(analyze.files.len(), 2);
        assert_eq!(analyze.output_dir, DEFAULT_OUTPUT_DIR);
        assert_eq!(analyze.frequency_window_ms, DEFAULT_FREQUENCY_WINDOW_MS);
        assert!(!analyze.skip_charts);
    }

    #[test]
    fn compare_should_require_both_files() {
        assert!(TickstatArgs::try_parse_from(["tickstat", "compare", "-r", "a.json"]).is_err());
    }
}
