use crate::time_series::TimeSeries;
use charming::{
    component::{
        Axis, DataView, DataZoom, DataZoomType, Feature, Grid, Legend, LegendSelectedMode,
        LegendType, Restore, SaveAsImage, Title, Toolbox, ToolboxDataZoom,
    },
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, ItemStyle, LineStyle,
        NameLocation, Orient, SplitLine, TextAlign, TextStyle, Tooltip,
    },
    series::Line,
    Chart,
};

pub struct TelemetryChart {
    pub inner: Chart,
}

const AXIS_TEXT_SIZE: u32 = 16;

impl TelemetryChart {
    /// Create a new `TelemetryChart` with default tooltip, legend, grid, and toolbox.
    pub fn new(title: &str, subtext: &str, dark: bool) -> Self {
        let chart = Chart::new()
            .title(
                Title::new()
                    .text(title)
                    .text_align(TextAlign::Center)
                    .subtext(subtext)
                    .text_style(TextStyle::new().font_size(24).font_weight("bold"))
                    .subtext_style(TextStyle::new().font_size(14).line_height(20))
                    .left("50%")
                    .top("1%"),
            )
            .tooltip(Tooltip::new().axis_pointer(AxisPointer::new().type_(AxisPointerType::Cross)))
            .legend(
                Legend::new()
                    .show(true)
                    .right("2%")
                    .top("middle")
                    .orient(Orient::Vertical)
                    .selected_mode(LegendSelectedMode::Multiple)
                    .text_style(TextStyle::new().font_size(12))
                    .padding(10)
                    .item_gap(10)
                    .item_width(25)
                    .item_height(14)
                    .type_(LegendType::Scroll),
            )
            .grid(
                Grid::new()
                    .left("5%")
                    .right("20%")
                    .top("12%")
                    .bottom("8%"),
            )
            .data_zoom(
                DataZoom::new()
                    .show(true)
                    .type_(DataZoomType::Slider)
                    .bottom("2%")
                    .start(0)
                    .end(100),
            )
            .toolbox(
                Toolbox::new().feature(
                    Feature::new()
                        .data_zoom(ToolboxDataZoom::new())
                        .data_view(DataView::new())
                        .restore(Restore::new())
                        .save_as_image(SaveAsImage::new()),
                ),
            );

        let chart = if dark {
            chart.background_color("#242424")
        } else {
            chart
        };

        Self { inner: chart }
    }

    /// Configure the X axis (store timeline in seconds).
    pub fn with_time_x_axis(mut self) -> Self {
        self.inner = self.inner.x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name_location(NameLocation::End)
                .name_gap(15)
                .axis_label(AxisLabel::new().formatter("{value} s"))
                .split_line(SplitLine::new().show(true)),
        );
        self
    }

    /// Configure a Y axis for e.g. memory in MB or ticks per second.
    pub fn with_y_axis(mut self, axis_label: &str) -> Self {
        self.inner = self.inner.y_axis(value_axis(axis_label, "left"));
        self
    }

    /// Configure dual Y axes, e.g. frame duration on the left and spikes on the right.
    pub fn with_dual_y_axis(mut self, y1_label: &str, y2_label: &str) -> Self {
        self.inner = self.inner.y_axis(value_axis(y1_label, "left"));
        self.inner = self.inner.y_axis(value_axis(y2_label, "right"));
        self
    }

    /// Add a new line series to the chart.
    ///
    /// `series.name` is displayed in the legend. Use `color` if you want a custom
    /// color (e.g. `#FF0000`), otherwise pass `None`. `opacity` controls the line
    /// opacity (use e.g. 1.0 for solid line, 0.3 for translucent).
    pub fn add_time_series(self, series: &TimeSeries, color: Option<&str>, opacity: f64) -> Self {
        self.add_dual_time_line_series(series, color, opacity, 0, 2.0)
    }

    /// Add a line series bound to the given Y axis.
    /// y_axis_index: 0 for left axis, 1 for right axis
    pub fn add_dual_time_line_series(
        mut self,
        series: &TimeSeries,
        color: Option<&str>,
        opacity: f64,
        y_axis_index: usize,
        width: f64,
    ) -> Self {
        let mut line = Line::new()
            .name(series.name.as_str())
            .data(series.as_charming_points())
            .show_symbol(false)
            .emphasis(Emphasis::new())
            .line_style(LineStyle::new().width(width).opacity(opacity))
            .y_axis_index(y_axis_index as f64);

        if let Some(color) = color {
            line = line.item_style(ItemStyle::new().color(color));
        }

        self.inner = self.inner.series(line);
        self
    }
}

fn value_axis(label: &str, position: &str) -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .name(label)
        .name_location(NameLocation::End)
        .name_text_style(TextStyle::new().font_size(AXIS_TEXT_SIZE))
        .name_gap(15)
        .position(position)
        .axis_label(AxisLabel::new())
        .split_line(SplitLine::new().show(true))
}
