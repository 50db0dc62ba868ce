pub mod metric_keys;
pub mod report;
pub mod summary;
pub mod time_series;
