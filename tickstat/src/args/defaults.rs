pub const DEFAULT_OUTPUT_DIR: &str = "tickstat_results";
pub const DEFAULT_FREQUENCY_WINDOW_MS: u64 = 1000;
pub const DEFAULT_SPIKE_THRESHOLD_MS: f64 = 50.0;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_CHART_WIDTH: u64 = 1600;
pub const DEFAULT_CHART_HEIGHT: u64 = 1200;
