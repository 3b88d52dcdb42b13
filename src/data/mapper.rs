//! Category Mapper Module
//! Translates the integer-coded categorical columns into display labels.

use polars::prelude::*;

pub const WEEKDAY_COL: &str = "weekday";
pub const WEATHER_COL: &str = "weathersit";

/// Weekday labels in code order 0..=6.
pub const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weather labels in code order 1..=4.
pub const WEATHER_LABELS: [&str; 4] = ["Clear", "Overcast", "Light Rain", "Heavy Rain"];

/// The weekend subset of `WEEKDAY_LABELS`.
pub const WEEKEND_LABELS: [&str; 2] = ["Saturday", "Sunday"];

/// Label for a weekday code; `None` outside 0..=6.
pub fn weekday_label(code: i64) -> Option<&'static str> {
    usize::try_from(code)
        .ok()
        .and_then(|i| WEEKDAY_LABELS.get(i).copied())
}

/// Label for a weather situation code; `None` outside 1..=4.
pub fn weather_label(code: i64) -> Option<&'static str> {
    code.checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| WEATHER_LABELS.get(i).copied())
}

/// Replace the integer-coded columns with their labels in place.
/// Unmapped codes become null.
pub fn apply_labels(df: &mut DataFrame) -> PolarsResult<()> {
    relabel(df, WEEKDAY_COL, weekday_label)?;
    relabel(df, WEATHER_COL, weather_label)?;
    Ok(())
}

fn relabel(
    df: &mut DataFrame,
    column: &str,
    label: fn(i64) -> Option<&'static str>,
) -> PolarsResult<()> {
    let codes = df.column(column)?.cast(&DataType::Int64)?;
    let labels: StringChunked = codes
        .i64()?
        .into_iter()
        .map(|code| code.and_then(label))
        .collect();

    df.with_column(labels.into_series().with_name(column.into()))?;
    Ok(())
}
