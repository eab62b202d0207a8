use crate::data::PriceRecord;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

//whether the earliest aggregated year gets a growth multiplier
//the index export defines one (its first row opens the year), the mutual fund
//export has no prior close to anchor the first year so it stays undefined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstYearPolicy {
    Defined,
    Undefined,
}

//one calendar year's open, close and derived growth multiplier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualSummary {
    pub year: i32,
    pub open: f64,
    pub close: f64,
    pub delta: Option<f64>,
}

//collapses a chronological price history into one summary per calendar year
//records are sorted by date first, so pre-sorted input is not required
pub fn aggregate_annual_returns(
    records: &[PriceRecord],
    first_year: FirstYearPolicy,
) -> Vec<AnnualSummary> {
    let mut sorted: Vec<&PriceRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date));

    //bucket by calendar year, keeping (year open, latest close)
    //insertion order follows the date sort, so buckets come out year-ascending
    let mut buckets: IndexMap<i32, (f64, f64)> = IndexMap::new();

    for record in sorted {
        match buckets.entry(record.year()) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().1 = record.close;
            }
            Entry::Vacant(entry) => {
                //a zero open on the year's first row is a malformed leading
                //row, substitute that row's close
                let open = if record.open == 0.0 {
                    record.close
                } else {
                    record.open
                };
                entry.insert((open, record.close));
            }
        }
    }

    buckets
        .into_iter()
        .enumerate()
        .map(|(index, (year, (open, close)))| {
            let delta = if index == 0 && first_year == FirstYearPolicy::Undefined {
                None
            } else {
                Some(close / open)
            };
            AnnualSummary {
                year,
                open,
                close,
                delta,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol * expected.abs(),
            "expected {expected}, got {actual}, relative tolerance {tol}"
        );
    }

    fn record(y: i32, m: u32, d: u32, open: f64, close: f64) -> PriceRecord {
        PriceRecord::new_unchecked(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            open,
            open.max(close),
            open.min(close),
            close,
            None,
            None,
        )
    }

    #[test]
    fn single_year_round_trip() {
        let records = vec![record(2020, 1, 2, 100.0, 104.0), record(2020, 12, 31, 105.0, 110.0)];
        let summaries = aggregate_annual_returns(&records, FirstYearPolicy::Defined);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].year, 2020);
        assert_eq!(summaries[0].open, 100.0);
        assert_eq!(summaries[0].close, 110.0);
        assert_eq!(summaries[0].delta, Some(1.10));
    }

    #[test]
    fn index_style_first_year_delta() {
        //s&p 500 2020: opened 3244.669922, closed 3756.070068
        let records = vec![
            record(2020, 1, 2, 3244.669922, 3257.85),
            record(2020, 6, 30, 3050.20, 3100.29),
            record(2020, 12, 31, 3733.27, 3756.070068),
            record(2021, 1, 4, 3764.610107, 3700.65),
            record(2021, 12, 31, 4775.21, 4766.180176),
        ];
        let summaries = aggregate_annual_returns(&records, FirstYearPolicy::Defined);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].year, 2020);
        assert_close(summaries[0].delta.unwrap(), 1.157612, 0.01);
        assert_close(summaries[1].delta.unwrap(), 1.266049, 0.01);
    }

    #[test]
    fn fund_style_first_year_is_undefined() {
        //aivsx 2020: opened 38.09, closed 49.79
        let records = vec![
            record(2019, 1, 2, 35.10, 35.40),
            record(2019, 12, 31, 37.95, 38.05),
            record(2020, 1, 2, 38.09, 38.09),
            record(2020, 12, 31, 49.79, 49.79),
        ];
        let summaries = aggregate_annual_returns(&records, FirstYearPolicy::Undefined);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].year, 2019);
        assert_eq!(summaries[0].delta, None);
        assert_eq!(summaries[1].year, 2020);
        assert_close(summaries[1].delta.unwrap(), 1.307141, 0.01);
    }

    #[test]
    fn zero_open_leading_row_falls_back_to_close() {
        let records = vec![
            record(1928, 1, 3, 0.0, 17.76),
            record(1928, 12, 31, 24.30, 24.35),
        ];
        let summaries = aggregate_annual_returns(&records, FirstYearPolicy::Defined);

        assert_eq!(summaries[0].open, 17.76);
        assert_close(summaries[0].delta.unwrap(), 24.35 / 17.76, 1e-12);
    }

    #[test]
    fn unsorted_records_are_sorted_before_bucketing() {
        let records = vec![
            record(2021, 12, 31, 105.0, 120.0),
            record(2020, 12, 31, 102.0, 104.0),
            record(2021, 1, 4, 104.0, 103.0),
            record(2020, 1, 2, 100.0, 101.0),
        ];
        let summaries = aggregate_annual_returns(&records, FirstYearPolicy::Defined);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].year, 2020);
        assert_eq!(summaries[0].open, 100.0);
        assert_eq!(summaries[0].close, 104.0);
        assert_eq!(summaries[1].year, 2021);
        assert_eq!(summaries[1].open, 104.0);
        assert_eq!(summaries[1].close, 120.0);
    }
}
