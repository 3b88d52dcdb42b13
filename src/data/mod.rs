//! Data module - dataset loading, label mapping and date filtering

mod filter;
mod loader;
mod mapper;

pub use filter::{filter_by_range, DateRange};
pub use loader::{DataError, RentalDataset, COUNT_COL, DATA_FILE, DATE_COL, MONTH_COL};
pub use mapper::{
    weather_label, weekday_label, WEATHER_COL, WEATHER_LABELS, WEEKDAY_COL, WEEKDAY_LABELS,
    WEEKEND_LABELS,
};
