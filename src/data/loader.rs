//! Dataset Loader Module
//! Reads the daily rental CSV into a Polars DataFrame and validates it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;
use thiserror::Error;

use crate::data::filter::date_from_days;
use crate::data::mapper;

/// The rental dataset is expected right next to the running process.
pub const DATA_FILE: &str = "main_data.csv";

pub const DATE_COL: &str = "dteday";
pub const MONTH_COL: &str = "mnth";
pub const COUNT_COL: &str = "cnt";
const CASUAL_COL: &str = "casual";
const REGISTERED_COL: &str = "registered";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Columns every rental dataset must carry. Extra columns are ignored.
pub const EXPECTED_COLUMNS: [&str; 16] = [
    "instant",
    "dteday",
    "season",
    "yr",
    "mnth",
    "holiday",
    "weekday",
    "workingday",
    "weathersit",
    "temp",
    "atemp",
    "hum",
    "windspeed",
    "casual",
    "registered",
    "cnt",
];

#[derive(Error, Debug)]
pub enum DataError {
    #[error("dataset not found at {path}")]
    NotFound { path: PathBuf },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("unexpected dataset schema, missing columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("invalid `dteday` values, expected %Y-%m-%d dates: {source}")]
    DateParse { source: PolarsError },
    #[error("{rows} row(s) violate cnt == casual + registered")]
    Integrity { rows: usize },
}

/// The loaded rental dataset, label-mapped and ready for filtering.
///
/// Built once at startup; the frame is read-only afterwards.
#[derive(Debug)]
pub struct RentalDataset {
    df: DataFrame,
}

impl RentalDataset {
    /// Load, validate and label-map the dataset at `path`.
    ///
    /// Any failure here is terminal for the run: the dashboard shows the
    /// message and renders nothing.
    pub fn load(path: &Path) -> Result<Self, DataError> {
        if !path.exists() {
            return Err(DataError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let separator = sniff_separator(path)?;
        let separator_label = if separator == b';' { ";" } else { "," };
        tracing::info!(
            path = %path.display(),
            separator = separator_label,
            "loading rental dataset"
        );

        let mut df = LazyCsvReader::new(path)
            .with_separator(separator)
            .with_infer_schema_length(Some(10_000))
            .finish()?
            .collect()?;

        check_schema(&df)?;
        df = parse_dates(df)?;
        check_count_invariant(&df)?;
        mapper::apply_labels(&mut df)?;

        tracing::info!(rows = df.height(), columns = df.width(), "rental dataset ready");

        Ok(Self { df })
    }

    /// The validated, label-mapped frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Observed min/max of the date column; `None` for an empty frame.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let days = self.df.column(DATE_COL).ok()?.cast(&DataType::Int32).ok()?;
        let days = days.i32().ok()?;
        Some((date_from_days(days.min()?)?, date_from_days(days.max()?)?))
    }
}

/// Pick the delimiter from the header line; `;` wins when present.
fn sniff_separator(path: &Path) -> Result<u8, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut header = String::new();
    BufReader::new(file)
        .read_line(&mut header)
        .map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(if header.contains(';') { b';' } else { b',' })
}

/// All expected columns must be present; extras are allowed.
fn check_schema(df: &DataFrame) -> Result<(), DataError> {
    let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    let missing: Vec<String> = EXPECTED_COLUMNS
        .iter()
        .filter(|name| !names.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::Schema { missing })
    }
}

/// Strict date parse; a single malformed `dteday` fails the whole load.
fn parse_dates(df: DataFrame) -> Result<DataFrame, DataError> {
    df.lazy()
        .with_column(col(DATE_COL).str().to_date(StrptimeOptions {
            format: Some(DATE_FORMAT.into()),
            strict: true,
            exact: true,
            cache: false,
        }))
        .collect()
        .map_err(|source| DataError::DateParse { source })
}

fn check_count_invariant(df: &DataFrame) -> Result<(), DataError> {
    let rows = df
        .clone()
        .lazy()
        .filter(col(COUNT_COL).neq(col(CASUAL_COL) + col(REGISTERED_COL)))
        .collect()?
        .height();

    if rows == 0 {
        Ok(())
    } else {
        Err(DataError::Integrity { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "instant,dteday,season,yr,mnth,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    fn write_dataset(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn valid_rows() -> String {
        format!(
            "{HEADER}\n\
             1,2011-01-01,1,0,1,0,5,0,1,0.34,0.36,0.80,0.16,331,654,985\n\
             2,2011-01-02,1,0,1,0,6,0,2,0.36,0.35,0.70,0.25,131,670,801\n\
             3,2011-01-03,1,0,1,0,0,1,1,0.20,0.19,0.44,0.25,120,1229,1349\n"
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn loads_valid_dataset() {
        let file = write_dataset(&valid_rows());
        let dataset = RentalDataset::load(file.path()).unwrap();

        assert_eq!(dataset.row_count(), 3);
        assert_eq!(
            dataset.date_bounds(),
            Some((date("2011-01-01"), date("2011-01-03")))
        );

        let df = dataset.frame();
        assert_eq!(df.column(DATE_COL).unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("weekday").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("weathersit").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn detects_semicolon_delimiter() {
        let file = write_dataset(&valid_rows().replace(',', ";"));
        let dataset = RentalDataset::load(file.path()).unwrap();
        assert_eq!(dataset.row_count(), 3);
    }

    #[test]
    fn extra_columns_are_allowed() {
        let content = format!(
            "{HEADER},note\n\
             1,2011-01-01,1,0,1,0,5,0,1,0.34,0.36,0.80,0.16,331,654,985,x\n"
        );
        let file = write_dataset(&content);
        let dataset = RentalDataset::load(file.path()).unwrap();
        assert_eq!(dataset.row_count(), 1);
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = RentalDataset::load(Path::new("does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let content = "instant,dteday,season\n1,2011-01-01,1\n";
        let file = write_dataset(content);
        let err = RentalDataset::load(file.path()).unwrap_err();
        match err {
            DataError::Schema { missing } => {
                assert_eq!(missing.len(), 13);
                assert!(missing.contains(&"cnt".to_string()));
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn malformed_date_is_parse_error() {
        let content = valid_rows().replace("2011-01-02", "02/01/2011");
        let file = write_dataset(&content);
        let err = RentalDataset::load(file.path()).unwrap_err();
        assert!(matches!(err, DataError::DateParse { .. }));
    }

    #[test]
    fn count_mismatch_is_integrity_error() {
        let content = valid_rows().replace(",131,670,801", ",131,670,999");
        let file = write_dataset(&content);
        let err = RentalDataset::load(file.path()).unwrap_err();
        match err {
            DataError::Integrity { rows } => assert_eq!(rows, 1),
            other => panic!("expected integrity error, got {other}"),
        }
    }
}
