use crate::args::defaults::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::error::TickstatError;
use charming::theme::Theme;
use charming::{Chart, HtmlRenderer};
use std::path::Path;
use std::time::Instant;
use tickstat_report::store::Store;
use tickstat_report::ChartKind;
use tracing::{debug, info};

/// Writes `<output_directory>/<kind>.html`. Returns `false` when the store has
/// nothing to plot for `kind`.
pub fn plot_chart(
    store: &Store,
    kind: ChartKind,
    source: &str,
    output_directory: &Path,
    dark: bool,
) -> Result<bool, TickstatError> {
    let data_processing_start = Instant::now();
    let Some(chart) = tickstat_report::create_chart(store, kind, source, dark) else {
        debug!("No data for {} chart of {}, skipping", kind, source);
        return Ok(false);
    };
    let data_processing_time = data_processing_start.elapsed();

    let chart_render_start = Instant::now();
    let chart_path = save_chart(&chart, kind.file_name(), output_directory, dark)?;
    let chart_render_time = chart_render_start.elapsed();

    info!(
        "Generated {} plot at: {} ({} samples, data processing: {:.2?}, chart render: {:.2?})",
        kind,
        chart_path.display(),
        store.get_values_only(kind.primary_key()).len(),
        data_processing_time,
        chart_render_time
    );
    Ok(true)
}

fn save_chart(
    chart: &Chart,
    file_name: &str,
    output_directory: &Path,
    dark: bool,
) -> Result<std::path::PathBuf, TickstatError> {
    std::fs::create_dir_all(output_directory)?;
    let full_output_path = output_directory.join(format!("{}.html", file_name));

    let theme = if dark { Theme::Dark } else { Theme::Default };
    let mut renderer =
        HtmlRenderer::new(file_name, DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT).theme(theme);
    renderer
        .save(chart, &full_output_path)
        .map_err(|e| TickstatError::CannotSaveChart(e.to_string()))?;
    Ok(full_output_path)
}
