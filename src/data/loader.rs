use crate::data::record::PriceRecord;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open data file {path:?}: {source}")]
    Open { path: PathBuf, source: csv::Error },
    #[error("Failed to parse record at line {line}: {source}")]
    Csv { line: usize, source: csv::Error },
    #[error("Malformed record at line {line}: cannot parse date '{value}'")]
    MalformedRecord { line: usize, value: String },
}

//source layout of a raw price history export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataFormat {
    //tab-delimited with an Adj Close column (mutual fund exports)
    MutualFundTab,
    //comma-delimited with a Volume column (index exports)
    IndexCsv,
}

impl DataFormat {
    //parse data format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tab" | "fund" | "mutual_fund" => Some(DataFormat::MutualFundTab),
            "csv" | "index" => Some(DataFormat::IndexCsv),
            _ => None,
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            DataFormat::MutualFundTab => b'\t',
            DataFormat::IndexCsv => b',',
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
    #[serde(rename = "Volume", default)]
    volume: Option<i64>,
}

//loads price records from a delimited file, sorted by date ascending
pub fn load_records<P: AsRef<Path>>(
    path: P,
    format: DataFormat,
) -> Result<Vec<PriceRecord>, LoadError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(format.delimiter())
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let mut records = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let line = index + 2;
        let row: CsvRow = result.map_err(|source| LoadError::Csv { line, source })?;

        //parse date
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
            LoadError::MalformedRecord {
                line,
                value: row.date.clone(),
            }
        })?;

        records.push(PriceRecord::new_unchecked(
            date,
            row.open,
            row.high,
            row.low,
            row.close,
            row.adj_close,
            row.volume,
        ));
    }

    //sort by date to ensure chronological order
    records.sort_by(|a, b| a.date.cmp(&b.date));

    Ok(records)
}

//capability to retrieve a named record set, injected wherever raw data is needed
pub trait RecordSource {
    fn fetch(&self, name: &str) -> Result<Vec<PriceRecord>, LoadError>;
}

//record source backed by delimited files under a base directory
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    base_dir: PathBuf,
    format: DataFormat,
}

impl CsvFileSource {
    pub fn new<P: Into<PathBuf>>(base_dir: P, format: DataFormat) -> Self {
        CsvFileSource {
            base_dir: base_dir.into(),
            format,
        }
    }
}

impl RecordSource for CsvFileSource {
    fn fetch(&self, name: &str) -> Result<Vec<PriceRecord>, LoadError> {
        load_records(self.base_dir.join(name), self.format)
    }
}
