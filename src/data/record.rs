use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Negative volume: {0}")]
    NegativeVolume(i64),
}

//represents a single daily price record of market data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: Option<f64>,
    pub volume: Option<i64>,
}

impl PriceRecord {
    //creates a new PriceRecord with validation
    pub fn new(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: Option<f64>,
        volume: Option<i64>,
    ) -> Result<Self, RecordError> {
        //validate high >= low
        if high < low {
            return Err(RecordError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(RecordError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(RecordError::InvalidOpen { open, high, low });
        }

        //validate non-negative volume
        if let Some(volume) = volume {
            if volume < 0 {
                return Err(RecordError::NegativeVolume(volume));
            }
        }

        Ok(PriceRecord {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        })
    }

    //creates a PriceRecord without validation
    //old index exports carry a zero open on leading rows, which the aggregator
    //handles, so the loader uses this path
    pub fn new_unchecked(
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        adj_close: Option<f64>,
        volume: Option<i64>,
    ) -> Self {
        PriceRecord {
            date,
            open,
            high,
            low,
            close,
            adj_close,
            volume,
        }
    }

    //calendar year of the record's date
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    //returns the mid price ((high + low) / 2)
    pub fn mid_price(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}
