mod axis_labeler;
mod chart;
mod chart_state;
mod config;
mod label_format;
mod render_pipeline;
mod widget;

pub use axis_labeler::{AxisLabeler, AxisTick, AxisTicks, horizontal_tick_count, vertical_tick_count};
pub use chart::Chart;
pub use chart_state::ChartState;
pub use config::ChartConfig;
pub use label_format::{
    AxisLabelFormatterFn, CursorLabelFormatterFn, compact_axis_formatter,
    compact_cursor_formatter, format_compact,
};
pub use render_pipeline::{FrameLayout, RenderPipeline};
pub use widget::{ChartWidget, Size, WidgetRenderer};
