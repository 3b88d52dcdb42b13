//! Dashboard View
//! Central panel with the headline metrics, charts and conclusions.

use egui::{Color32, RichText, ScrollArea};

use crate::charts::ChartPlotter;
use crate::stats::DashboardData;

const SECTION_SPACING: f32 = 15.0;

/// Central scrollable panel rendering one aggregation pass.
pub struct DashboardView {
    data: Option<DashboardData>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self { data: None }
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the current content (shown as the empty state).
    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: DashboardData) {
        self.data = Some(data);
    }

    /// Draw the dashboard.
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(data) = &self.data else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(5.0);
                ui.label(RichText::new("Bike Sharing Analysis").size(24.0).strong());
                ui.add_space(SECTION_SPACING);

                if data.row_count == 0 {
                    ui.label(
                        RichText::new("No rows in the selected date range.")
                            .size(13.0)
                            .color(Color32::GRAY),
                    );
                    ui.add_space(SECTION_SPACING);
                }

                Self::draw_metric_cards(ui, data);
                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);

                Self::chart_card(ui, "📊 Mean Rentals per Weekday", |ui| {
                    ChartPlotter::draw_weekday_chart(ui, &data.weekday_means);
                });
                ui.add_space(SECTION_SPACING);
                Self::chart_card(ui, "📆 Mean Rentals per Month", |ui| {
                    ChartPlotter::draw_monthly_chart(ui, &data.monthly_means);
                });
                ui.add_space(SECTION_SPACING);
                Self::chart_card(ui, "🌦 Mean Rentals by Weather", |ui| {
                    ChartPlotter::draw_weather_chart(ui, &data.weather_means);
                });

                ui.add_space(SECTION_SPACING);
                ui.separator();
                ui.add_space(SECTION_SPACING);
                Self::draw_conclusions(ui);
                ui.add_space(SECTION_SPACING);
            });
    }

    fn draw_metric_cards(ui: &mut egui::Ui, data: &DashboardData) {
        let metrics = &data.metrics;
        ui.columns(3, |cols| {
            Self::metric_card(&mut cols[0], "Total Rentals", metrics.total);
            Self::metric_card(&mut cols[1], "Weekday Rentals", metrics.weekday_total);
            Self::metric_card(&mut cols[2], "Weekend Rentals", metrics.weekend_total);
        });
    }

    fn metric_card(ui: &mut egui::Ui, label: &str, value: i64) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                    ui.label(RichText::new(format_count(value)).size(26.0).strong());
                });
            });
    }

    fn chart_card(ui: &mut egui::Ui, title: &str, draw: impl FnOnce(&mut egui::Ui)) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(15.0).strong());
                ui.add_space(8.0);
                draw(ui);
            });
    }

    fn draw_conclusions(ui: &mut egui::Ui) {
        ui.label(RichText::new("📌 Conclusions").size(16.0).strong());
        ui.add_space(5.0);
        ui.label("• Rentals run higher on weekdays than on weekends.");
        ui.label("• Rental volume climbs toward mid-year and drops off toward year end.");
        ui.label("• Clear weather brings the highest rental counts.");
    }
}

/// Group digits for the metric cards (1234567 -> "1,234,567").
fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn counts_are_digit_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(985), "985");
        assert_eq!(format_count(3292679), "3,292,679");
        assert_eq!(format_count(-1000), "-1,000");
    }
}
