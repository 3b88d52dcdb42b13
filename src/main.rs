//! Bike Share Dashboard - Daily Rental Analysis
//!
//! A Rust application that loads the daily bike-rental dataset and shows
//! date-filtered rental metrics and charts.

use bikedash::gui::DashboardApp;
use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bikedash=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Bike Share Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bike Share Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc)))),
    )
}
