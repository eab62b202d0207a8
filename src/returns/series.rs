use crate::returns::aggregate::AnnualSummary;
use serde::{Deserialize, Serialize};

//one calendar year's growth multipliers, one per fund, aligned by position
//a delta of 1.10 means 10% growth, 0.90 means a 10% loss
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualReturn {
    pub year: i32,
    pub deltas: Vec<f64>,
}

impl AnnualReturn {
    pub fn new(year: i32, deltas: Vec<f64>) -> Self {
        AnnualReturn { year, deltas }
    }

    //single-fund year
    pub fn single(year: i32, delta: f64) -> Self {
        AnnualReturn {
            year,
            deltas: vec![delta],
        }
    }
}

//an ordered run of annual returns, one entry per consecutive simulated year
//built once, consumed read-only by the simulator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ReturnSeries {
    returns: Vec<AnnualReturn>,
}

impl ReturnSeries {
    pub fn new(returns: Vec<AnnualReturn>) -> Self {
        ReturnSeries { returns }
    }

    //hypothetical series repeating the same single-fund multiplier
    pub fn flat(delta: f64, years: usize) -> Self {
        let returns = (1..=years)
            .map(|i| AnnualReturn::single(i as i32, delta))
            .collect();
        ReturnSeries { returns }
    }

    //keeps only years whose multiplier is defined, so a series built from the
    //undefined-first-year policy simply starts one year later
    pub fn from_summaries(summaries: &[AnnualSummary]) -> Self {
        let returns = summaries
            .iter()
            .filter_map(|summary| summary.delta.map(|delta| AnnualReturn::single(summary.year, delta)))
            .collect();
        ReturnSeries { returns }
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }

    pub fn as_slice(&self) -> &[AnnualReturn] {
        &self.returns
    }

    pub fn first_year(&self) -> Option<i32> {
        self.returns.first().map(|r| r.year)
    }

    //index of a calendar year within the series
    pub fn position_of_year(&self, year: i32) -> Option<usize> {
        self.returns.iter().position(|r| r.year == year)
    }

    //fixed-length window starting at the given index, None when it runs past
    //the end of the series
    pub fn window(&self, start: usize, len: usize) -> Option<&[AnnualReturn]> {
        self.returns.get(start..start.checked_add(len)?)
    }
}
