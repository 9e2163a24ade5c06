use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::Chart;
use crate::error::ChartError;
use crate::render::{CairoRenderer, paint_buffer_on_context};

/// Hosts a cairo-backed [`Chart`] in a `gtk::DrawingArea`.
///
/// The draw function redraws the chart at the allocated size and paints the
/// buffer; a drag gesture drives the cursor.
pub struct GtkChartAdapter {
    chart: Rc<RefCell<Chart<CairoRenderer>>>,
    drawing_area: gtk::DrawingArea,
}

impl GtkChartAdapter {
    #[must_use]
    pub fn new(chart: Chart<CairoRenderer>) -> Self {
        let min_size = chart.config().min_size;
        let chart = Rc::new(RefCell::new(chart));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(min_size.width.round() as i32);
        drawing_area.set_content_height(min_size.height.round() as i32);
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        {
            let chart = Rc::clone(&chart);
            drawing_area.set_draw_func(move |_, context, width, height| {
                let Ok(mut chart) = chart.try_borrow_mut() else {
                    return;
                };
                let width = u32::try_from(width).unwrap_or(0);
                let height = u32::try_from(height).unwrap_or(0);
                match chart.redraw(width, height).map(|_| ()) {
                    // The frame is still complete when the series is skipped.
                    Ok(()) | Err(ChartError::Render(_)) => {}
                    Err(err) => {
                        warn!(error = %err, "chart redraw failed");
                        return;
                    }
                }
                if let Err(err) = paint_buffer_on_context(context, chart.buffer()) {
                    warn!(error = %err, "failed to paint chart buffer");
                }
            });
        }

        attach_drag_cursor(&drawing_area, &chart);

        Self {
            chart,
            drawing_area,
        }
    }

    /// Shared handle for callers that update data from other callbacks.
    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<Chart<CairoRenderer>>> {
        Rc::clone(&self.chart)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Schedules a repaint; GTK calls back into the draw function.
    pub fn trigger_redraw(&self) {
        self.drawing_area.queue_draw();
    }
}

fn attach_drag_cursor(drawing_area: &gtk::DrawingArea, chart: &Rc<RefCell<Chart<CairoRenderer>>>) {
    let drag = gtk::GestureDrag::new();

    {
        let chart = Rc::clone(chart);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_begin(move |_, start_x, start_y| {
            if let Ok(mut chart) = chart.try_borrow_mut() {
                chart.on_drag(start_x, start_y);
            }
            drawing_area.queue_draw();
        });
    }

    {
        let chart = Rc::clone(chart);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_update(move |gesture, offset_x, offset_y| {
            if let (Some((start_x, start_y)), Ok(mut chart)) =
                (gesture.start_point(), chart.try_borrow_mut())
            {
                chart.on_drag(start_x + offset_x, start_y + offset_y);
            }
            drawing_area.queue_draw();
        });
    }

    {
        let chart = Rc::clone(chart);
        let drawing_area = drawing_area.clone();
        drag.connect_drag_end(move |_, _, _| {
            if let Ok(mut chart) = chart.try_borrow_mut() {
                chart.on_drag_end();
            }
            drawing_area.queue_draw();
        });
    }

    drawing_area.add_controller(drag);
}
