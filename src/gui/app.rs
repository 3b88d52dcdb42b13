//! Dashboard Application
//! Main window wiring the loader, filter and aggregator to the panels.

use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use chrono::NaiveDate;
use egui::SidePanel;

use crate::data::{filter_by_range, RentalDataset, DATA_FILE};
use crate::gui::{DashboardView, Sidebar, SidebarAction};
use crate::stats::{Aggregator, DashboardData};

/// Dataset load outcome from the background thread.
enum LoadResult {
    Complete {
        dataset: RentalDataset,
        bounds: (NaiveDate, NaiveDate),
    },
    Error(String),
}

/// Aggregation outcome from the background thread.
enum CalcResult {
    Complete(DashboardData),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    dataset: Option<RentalDataset>,
    sidebar: Sidebar,
    view: DashboardView,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async aggregation
    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
    needs_refresh: bool,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut sidebar = Sidebar::new();
        if let Some(storage) = cc.storage {
            sidebar.range = eframe::get_value(storage, eframe::APP_KEY);
        }

        let mut app = Self {
            dataset: None,
            sidebar,
            view: DashboardView::new(),
            load_rx: None,
            is_loading: false,
            calc_rx: None,
            is_calculating: false,
            needs_refresh: false,
        };
        app.start_load();
        app
    }

    /// Kick off the one-time dataset load on a background thread.
    fn start_load(&mut self) {
        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        self.is_loading = true;
        self.sidebar.set_progress(10.0, "Loading dataset...");

        thread::spawn(move || {
            let message = match RentalDataset::load(Path::new(DATA_FILE)) {
                Ok(dataset) => match dataset.date_bounds() {
                    Some(bounds) => LoadResult::Complete { dataset, bounds },
                    None => LoadResult::Error("dataset contains no rows".to_string()),
                },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    /// Check for dataset load results.
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { dataset, bounds } => {
                        self.sidebar.set_bounds(bounds.0, bounds.1);
                        self.sidebar
                            .set_progress(50.0, &format!("Loaded {} rows", dataset.row_count()));
                        self.dataset = Some(dataset);
                        self.is_loading = false;
                        self.needs_refresh = true;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        tracing::error!(%error, "dataset load failed");
                        self.view.clear();
                        self.sidebar.set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Re-run filter + aggregation for the current range on a background thread.
    fn start_refresh(&mut self) {
        let Some(dataset) = &self.dataset else { return };
        let Some(range) = self.sidebar.range else { return };
        let df = dataset.frame().clone();

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.needs_refresh = false;
        self.sidebar.set_progress(60.0, "Updating dashboard...");

        thread::spawn(move || {
            let result = filter_by_range(&df, &range)
                .and_then(|filtered| Aggregator::compute(&filtered));
            let message = match result {
                Ok(data) => CalcResult::Complete(data),
                Err(e) => CalcResult::Error(e.to_string()),
            };
            let _ = tx.send(message);
        });
    }

    /// Check for aggregation results.
    fn check_calc_results(&mut self) {
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Complete(data) => {
                        self.sidebar.set_progress(
                            100.0,
                            &format!("Dashboard updated: {} rows in range", data.row_count),
                        );
                        self.view.set_data(data);
                        self.is_calculating = false;
                        should_keep_receiver = false;
                    }
                    CalcResult::Error(error) => {
                        tracing::error!(%error, "aggregation failed");
                        self.view.clear();
                        self.sidebar.set_progress(0.0, &format!("Error: {}", error));
                        self.is_calculating = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.calc_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_calc_results();

        // A range change during a running pass queues a follow-up pass.
        if self.needs_refresh && !self.is_calculating {
            self.start_refresh();
        }

        // Request repaint while loading or calculating
        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        // Left panel - date filter and status
        SidePanel::left("sidebar")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.sidebar.show(ui) == SidebarAction::RangeChanged {
                        self.needs_refresh = true;
                    }
                });
            });

        // Central panel - metrics, charts, conclusions
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.show(ui);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(range) = &self.sidebar.range {
            eframe::set_value(storage, eframe::APP_KEY, range);
        }
    }
}
