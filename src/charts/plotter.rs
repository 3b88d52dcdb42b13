//! Chart Plotter Module
//! Draws the three dashboard charts using egui_plot.

use egui::Color32;
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::stats::{CategoryMean, MonthlyMean};

/// Accent colors, one per chart.
pub const WEEKDAY_ACCENT: Color32 = Color32::from_rgb(0, 123, 255); // Blue
pub const MONTHLY_ACCENT: Color32 = Color32::from_rgb(40, 167, 69); // Green
pub const WEATHER_ACCENT: Color32 = Color32::from_rgb(220, 53, 69); // Red

const CHART_HEIGHT: f32 = 260.0;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bar chart: mean rentals per weekday.
    pub fn draw_weekday_chart(ui: &mut egui::Ui, means: &[CategoryMean]) {
        Self::draw_category_bars(ui, "weekday_chart", "Day", means, WEEKDAY_ACCENT);
    }

    /// Bar chart: mean rentals per weather condition.
    pub fn draw_weather_chart(ui: &mut egui::Ui, means: &[CategoryMean]) {
        Self::draw_category_bars(ui, "weather_chart", "Weather", means, WEATHER_ACCENT);
    }

    /// Line chart with markers: mean rentals per month.
    pub fn draw_monthly_chart(ui: &mut egui::Ui, means: &[MonthlyMean]) {
        let points: Vec<[f64; 2]> = means
            .iter()
            .map(|m| [f64::from(m.month), m.mean_cnt])
            .collect();

        Plot::new("monthly_chart")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("Month")
            .y_axis_label("Mean rentals")
            .x_axis_formatter(|mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                match idx as i64 {
                    m @ 1..=12 => MONTH_ABBREV[(m - 1) as usize].to_string(),
                    _ => String::new(),
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(MONTHLY_ACCENT)
                        .width(2.0)
                        .name("Mean rentals"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.5)
                        .color(MONTHLY_ACCENT),
                );
            });
    }

    /// Bars at index positions with the group labels on the x-axis.
    fn draw_category_bars(
        ui: &mut egui::Ui,
        id: &str,
        axis_label: &str,
        means: &[CategoryMean],
        color: Color32,
    ) {
        let labels: Vec<String> = means.iter().map(|m| m.label.clone()).collect();
        let bars: Vec<Bar> = means
            .iter()
            .enumerate()
            .map(|(i, m)| {
                Bar::new(i as f64, m.mean_cnt)
                    .width(0.6)
                    .fill(color)
                    .name(m.label.clone())
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label(axis_label.to_string())
            .y_axis_label("Mean rentals")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx < 0.0 || (mark.value - idx).abs() > 1e-6 {
                    return String::new();
                }
                let idx = idx as usize;
                if idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Mean rentals"));
            });
    }
}
