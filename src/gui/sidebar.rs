//! Sidebar Widget
//! Left panel with the date-range controls and run status.

use chrono::{Duration, NaiveDate};
use egui::{Color32, RichText, Slider};

use crate::data::DateRange;

/// Actions triggered by the sidebar controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    RangeChanged,
}

/// Left side panel with the date filter and status display.
pub struct Sidebar {
    /// The selected range; restored from storage, then clamped to the
    /// dataset bounds once the load completes.
    pub range: Option<DateRange>,
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub progress: f32,
    pub status: String,
}

impl Default for Sidebar {
    fn default() -> Self {
        Self {
            range: None,
            bounds: None,
            progress: 0.0,
            status: "Ready".to_string(),
        }
    }
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the dataset bounds and clamp the current range into them.
    /// With no prior range the full dataset range becomes the default.
    pub fn set_bounds(&mut self, min: NaiveDate, max: NaiveDate) {
        self.bounds = Some((min, max));
        self.range = Some(match self.range {
            Some(range) => DateRange::new(range.start.clamp(min, max), range.end.clamp(min, max)),
            None => DateRange::new(min, max),
        });
    }

    /// Draw the sidebar.
    pub fn show(&mut self, ui: &mut egui::Ui) -> SidebarAction {
        let mut action = SidebarAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Share Rentals")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Daily rental analysis")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        match (self.bounds, &mut self.range) {
            (Some((min, max)), Some(range)) => {
                let span = (max - min).num_days();
                let mut start_days = (range.start - min).num_days();
                let mut end_days = (range.end - min).num_days();

                ui.label("From:");
                let start_changed = ui
                    .add(
                        Slider::new(&mut start_days, 0..=span)
                            .custom_formatter(move |v, _| format_day_offset(min, v)),
                    )
                    .changed();

                ui.add_space(5.0);

                ui.label("To:");
                let end_changed = ui
                    .add(
                        Slider::new(&mut end_days, 0..=span)
                            .custom_formatter(move |v, _| format_day_offset(min, v)),
                    )
                    .changed();

                if start_changed || end_changed {
                    range.start = min + Duration::days(start_days);
                    range.end = min + Duration::days(end_days);
                    action = SidebarAction::RangeChanged;
                }

                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!(
                        "📆 {} - {}",
                        range.start.format("%d %b %Y"),
                        range.end.format("%d %b %Y")
                    ))
                    .size(12.0),
                );

                ui.add_space(8.0);
                if ui.button("Reset to full range").clicked() {
                    *range = DateRange::new(min, max);
                    action = SidebarAction::RangeChanged;
                }
            }
            _ => {
                ui.label(
                    RichText::new("Waiting for dataset...")
                        .size(12.0)
                        .color(Color32::GRAY),
                );
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.progress >= 100.0 {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status.
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

fn format_day_offset(min: NaiveDate, offset: f64) -> String {
    (min + Duration::days(offset.round() as i64))
        .format("%d %b %Y")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn bounds_default_to_full_range() {
        let mut sidebar = Sidebar::new();
        sidebar.set_bounds(date("2011-01-01"), date("2012-12-31"));
        assert_eq!(
            sidebar.range,
            Some(DateRange::new(date("2011-01-01"), date("2012-12-31")))
        );
    }

    #[test]
    fn restored_range_is_clamped_to_bounds() {
        let mut sidebar = Sidebar::new();
        sidebar.range = Some(DateRange::new(date("2010-06-01"), date("2013-06-01")));
        sidebar.set_bounds(date("2011-01-01"), date("2012-12-31"));
        assert_eq!(
            sidebar.range,
            Some(DateRange::new(date("2011-01-01"), date("2012-12-31")))
        );
    }
}
