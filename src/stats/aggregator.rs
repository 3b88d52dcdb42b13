//! Aggregator Module
//! Headline sums and grouped rental means over the filtered frame.

use std::collections::HashMap;

use polars::prelude::*;

use crate::data::{
    COUNT_COL, MONTH_COL, WEATHER_COL, WEATHER_LABELS, WEEKDAY_COL, WEEKDAY_LABELS, WEEKEND_LABELS,
};

const MEAN_COL: &str = "mean_cnt";

/// The three top-level summary numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlineMetrics {
    pub total: i64,
    pub weekday_total: i64,
    pub weekend_total: i64,
}

/// Mean rentals for one categorical group.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMean {
    pub label: String,
    pub mean_cnt: f64,
}

/// Mean rentals for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean_cnt: f64,
}

/// Everything the dashboard view renders for one filter pass.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub metrics: HeadlineMetrics,
    pub weekday_means: Vec<CategoryMean>,
    pub monthly_means: Vec<MonthlyMean>,
    pub weather_means: Vec<CategoryMean>,
    pub row_count: usize,
}

/// Computes the dashboard aggregations for an already-filtered frame.
pub struct Aggregator;

impl Aggregator {
    /// Run the full aggregation pass. The three grouping dimensions are
    /// independent and run in parallel.
    pub fn compute(df: &DataFrame) -> PolarsResult<DashboardData> {
        let (metrics, (weekday, (monthly, weather))) = rayon::join(
            || Self::headline_metrics(df),
            || {
                rayon::join(
                    || Self::mean_by_category(df, WEEKDAY_COL, &WEEKDAY_LABELS),
                    || {
                        rayon::join(
                            || Self::mean_by_month(df),
                            || Self::mean_by_category(df, WEATHER_COL, &WEATHER_LABELS),
                        )
                    },
                )
            },
        );

        Ok(DashboardData {
            metrics: metrics?,
            weekday_means: weekday?,
            monthly_means: monthly?,
            weather_means: weather?,
            row_count: df.height(),
        })
    }

    /// Total, weekday-only and weekend-only rental sums.
    pub fn headline_metrics(df: &DataFrame) -> PolarsResult<HeadlineMetrics> {
        let is_weekend = col(WEEKDAY_COL)
            .eq(lit(WEEKEND_LABELS[0]))
            .or(col(WEEKDAY_COL).eq(lit(WEEKEND_LABELS[1])));
        let is_weekday = col(WEEKDAY_COL)
            .neq(lit(WEEKEND_LABELS[0]))
            .and(col(WEEKDAY_COL).neq(lit(WEEKEND_LABELS[1])));

        Ok(HeadlineMetrics {
            total: Self::sum_cnt(df.clone().lazy())?,
            weekday_total: Self::sum_cnt(df.clone().lazy().filter(is_weekday))?,
            weekend_total: Self::sum_cnt(df.clone().lazy().filter(is_weekend))?,
        })
    }

    fn sum_cnt(lf: LazyFrame) -> PolarsResult<i64> {
        let out = lf.select([col(COUNT_COL).sum()]).collect()?;
        Ok(out.column(COUNT_COL)?.i64()?.get(0).unwrap_or(0))
    }

    /// Mean `cnt` per label, in fixed label-table order.
    /// Labels absent from the frame are omitted; null labels are dropped.
    pub fn mean_by_category(
        df: &DataFrame,
        column: &str,
        order: &[&str],
    ) -> PolarsResult<Vec<CategoryMean>> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(column)])
            .agg([col(COUNT_COL).mean().alias(MEAN_COL)])
            .collect()?;

        let labels = grouped.column(column)?.str()?;
        let means = grouped.column(MEAN_COL)?.f64()?;

        let mut by_label: HashMap<&str, f64> = HashMap::new();
        for (label, mean) in labels.into_iter().zip(means) {
            if let (Some(label), Some(mean)) = (label, mean) {
                by_label.insert(label, mean);
            }
        }

        Ok(order
            .iter()
            .filter_map(|label| {
                by_label.get(*label).map(|&mean_cnt| CategoryMean {
                    label: (*label).to_string(),
                    mean_cnt,
                })
            })
            .collect())
    }

    /// Mean `cnt` per month number, ascending.
    pub fn mean_by_month(df: &DataFrame) -> PolarsResult<Vec<MonthlyMean>> {
        let grouped = df
            .clone()
            .lazy()
            .group_by([col(MONTH_COL)])
            .agg([col(COUNT_COL).mean().alias(MEAN_COL)])
            .sort([MONTH_COL], Default::default())
            .collect()?;

        let months = grouped.column(MONTH_COL)?.i64()?;
        let means = grouped.column(MEAN_COL)?.f64()?;

        Ok(months
            .into_iter()
            .zip(means)
            .filter_map(|(month, mean)| {
                let (month, mean_cnt) = (month?, mean?);
                u32::try_from(month)
                    .ok()
                    .map(|month| MonthlyMean { month, mean_cnt })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        // Two Mondays, one Saturday, one Sunday across two months.
        DataFrame::new(vec![
            Column::new(
                WEEKDAY_COL.into(),
                vec!["Monday", "Monday", "Saturday", "Sunday"],
            ),
            Column::new(
                WEATHER_COL.into(),
                vec!["Clear", "Overcast", "Clear", "Heavy Rain"],
            ),
            Column::new(MONTH_COL.into(), vec![1i64, 2, 1, 2]),
            Column::new(COUNT_COL.into(), vec![10i64, 30, 20, 40]),
        ])
        .unwrap()
    }

    fn empty_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(WEEKDAY_COL.into(), Vec::<String>::new()),
            Column::new(WEATHER_COL.into(), Vec::<String>::new()),
            Column::new(MONTH_COL.into(), Vec::<i64>::new()),
            Column::new(COUNT_COL.into(), Vec::<i64>::new()),
        ])
        .unwrap()
    }

    #[test]
    fn headline_metrics_partition_the_total() {
        let metrics = Aggregator::headline_metrics(&sample_frame()).unwrap();
        assert_eq!(metrics.total, 100);
        assert_eq!(metrics.weekday_total, 40);
        assert_eq!(metrics.weekend_total, 60);
        assert_eq!(metrics.weekday_total + metrics.weekend_total, metrics.total);
    }

    #[test]
    fn empty_frame_yields_zero_metrics() {
        let data = Aggregator::compute(&empty_frame()).unwrap();
        assert_eq!(data.metrics, HeadlineMetrics::default());
        assert!(data.weekday_means.is_empty());
        assert!(data.monthly_means.is_empty());
        assert!(data.weather_means.is_empty());
        assert_eq!(data.row_count, 0);
    }

    #[test]
    fn category_means_follow_label_order() {
        let means =
            Aggregator::mean_by_category(&sample_frame(), WEEKDAY_COL, &WEEKDAY_LABELS).unwrap();
        let labels: Vec<&str> = means.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["Monday", "Saturday", "Sunday"]);
        assert_eq!(means[0].mean_cnt, 20.0);
        assert_eq!(means[1].mean_cnt, 20.0);
        assert_eq!(means[2].mean_cnt, 40.0);
    }

    #[test]
    fn null_labels_are_dropped_from_means() {
        let df = DataFrame::new(vec![
            Column::new(WEATHER_COL.into(), vec![Some("Clear"), None, Some("Clear")]),
            Column::new(COUNT_COL.into(), vec![10i64, 99, 30]),
        ])
        .unwrap();

        let means = Aggregator::mean_by_category(&df, WEATHER_COL, &WEATHER_LABELS).unwrap();
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].label, "Clear");
        assert_eq!(means[0].mean_cnt, 20.0);
    }

    #[test]
    fn monthly_means_are_ascending() {
        let means = Aggregator::mean_by_month(&sample_frame()).unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!((means[0].month, means[0].mean_cnt), (1, 15.0));
        assert_eq!((means[1].month, means[1].mean_cnt), (2, 35.0));
    }

    #[test]
    fn compute_bundles_all_dimensions() {
        let data = Aggregator::compute(&sample_frame()).unwrap();
        assert_eq!(data.row_count, 4);
        assert_eq!(data.metrics.total, 100);
        assert_eq!(data.weekday_means.len(), 3);
        assert_eq!(data.monthly_means.len(), 2);
        assert_eq!(data.weather_means.len(), 3);
    }
}
