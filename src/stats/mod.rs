//! Stats module - headline metrics and grouped means

mod aggregator;

pub use aggregator::{Aggregator, CategoryMean, DashboardData, HeadlineMetrics, MonthlyMean};
