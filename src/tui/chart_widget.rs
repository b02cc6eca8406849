//! Plotters-powered chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - dashed line support for the synthetic aggregate series
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::{LineStyle, Rgb, Series, ValueFormat};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: series and bounds are computed
/// outside the render call, which keeps `render()` focused on drawing and the
/// data prep testable on its own.
pub struct SeriesChart<'a> {
    /// One line+marker series per entity or category.
    pub series: &'a [Series],
    /// X bounds (calendar years).
    pub x_bounds: [f64; 2],
    /// Y bounds (indicator units).
    pub y_bounds: [f64; 2],
    /// Axis labels (kept short for terminal rendering).
    pub x_label: &'a str,
    pub y_label: &'a str,
    /// Value-axis tick formatting.
    pub y_format: ValueFormat,
}

impl Widget for SeriesChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. Render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let y_format = self.y_format;

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. Mesh lines are disabled to reduce clutter
            // in low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| y_format.tick_label(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for s in self.series {
                let color = plotters_color(s.color);
                let line_points = s.points.iter().map(|&(year, v)| (year as f64, v));

                match s.line {
                    LineStyle::Solid => {
                        chart.draw_series(LineSeries::new(line_points, color.stroke_width(1)))?;
                    }
                    LineStyle::Dashed => {
                        chart.draw_series(DashedLineSeries::new(
                            line_points,
                            4,
                            2,
                            color.stroke_width(1),
                        ))?;
                    }
                }

                // Point markers.
                //
                // We intentionally avoid `Circle` markers here: the underlying
                // `plotters-ratatui-backend` currently maps circle radii
                // incorrectly (pixel radius -> normalized canvas units),
                // producing huge circles. A colored `Pixel` gives a clean dot
                // that reliably overrides the line underneath.
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&(year, v)| Pixel::new((year as f64, v), color)),
                )?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn plotters_color(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}
