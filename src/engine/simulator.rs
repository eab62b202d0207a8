use crate::engine::schedule::build_schedules;
use crate::returns::AnnualReturn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid schedule bounds: start age {start} + {contribute} contribution years exceeds end age {end}")]
    InvalidScheduleBounds { start: u32, contribute: u32, end: u32 },
    #[error("Insufficient return data: {required} growth multipliers required but only {available} available")]
    InsufficientReturnData { required: usize, available: usize },
    #[error("Invalid allocation: {reason}")]
    InvalidAllocation { reason: String },
    #[error("Invalid load fee {0}: must be in [0, 1)")]
    InvalidLoad(f64),
    #[error("Negative annual contribution: {0}")]
    NegativeContribution(f64),
    #[error("Year {year} carries no growth multipliers")]
    MissingDeltas { year: i32 },
}

//fractional weights splitting each contribution across funds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Allocation {
    pub weights: Vec<f64>,
}

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

impl Allocation {
    pub fn new(weights: Vec<f64>) -> Self {
        Allocation { weights }
    }

    //everything into one fund
    pub fn single_fund() -> Self {
        Allocation {
            weights: vec![1.0],
        }
    }

    pub fn validate(&self, fund_count: usize) -> Result<(), SimulationError> {
        if self.weights.len() != fund_count {
            return Err(SimulationError::InvalidAllocation {
                reason: format!(
                    "{} weights for {} funds",
                    self.weights.len(),
                    fund_count
                ),
            });
        }

        if self.weights.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(SimulationError::InvalidAllocation {
                reason: format!("weights outside [0, 1]: {:?}", self.weights),
            });
        }

        let total: f64 = self.weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(SimulationError::InvalidAllocation {
                reason: format!("weights sum to {total}, expected 1.0"),
            });
        }

        Ok(())
    }
}

//how each year's growth multiplier is derived from the fund deltas
//FirstFundOnly reads fund index 0 and ignores allocation weights entirely;
//the historical comparison tables were produced this way, so it stays the
//default even for multi-fund series
//Weighted is the opt-in mode that applies the allocation weights
#[derive(Debug, Clone, PartialEq)]
pub enum CompoundingMode {
    FirstFundOnly,
    Weighted(Allocation),
}

//final balances for both savers, no per-year state is retained
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub ben: f64,
    pub joey: f64,
}

//simulates both savers over the same return series and reports final balances
//pure function of its inputs, safe to call concurrently
pub fn simulate(
    ben_start_age: u32,
    ben_years_to_contribute: u32,
    end_age: u32,
    annual_contribution: f64,
    returns: &[AnnualReturn],
    mode: &CompoundingMode,
    load: f64,
) -> Result<SimulationResult, SimulationError> {
    if !(0.0..1.0).contains(&load) {
        return Err(SimulationError::InvalidLoad(load));
    }

    let (ben, joey) = build_schedules(
        ben_start_age,
        ben_years_to_contribute,
        end_age,
        annual_contribution,
    )?;

    //one multiplier per compounding step, the final schedule slot has none
    let required = ben.len() - 1;
    if returns.len() < required {
        return Err(SimulationError::InsufficientReturnData {
            required,
            available: returns.len(),
        });
    }

    let steps = &returns[..required];

    if let Some(empty) = steps.iter().find(|r| r.deltas.is_empty()) {
        return Err(SimulationError::MissingDeltas { year: empty.year });
    }

    if let CompoundingMode::Weighted(allocation) = mode {
        let fund_count = steps
            .first()
            .map(|r| r.deltas.len())
            .unwrap_or(allocation.weights.len());
        allocation.validate(fund_count)?;
        if let Some(bad) = steps.iter().find(|r| r.deltas.len() != fund_count) {
            return Err(SimulationError::InvalidAllocation {
                reason: format!(
                    "year {} carries {} fund deltas, allocation expects {}",
                    bad.year,
                    bad.deltas.len(),
                    fund_count
                ),
            });
        }
    }

    Ok(SimulationResult {
        ben: compute(ben.as_slice(), steps, mode, load),
        joey: compute(joey.as_slice(), steps, mode, load),
    })
}

//left-to-right reduction over the schedule
//the accumulator is seeded with the raw index-0 amount and overwritten at
//index 1, so the first schedule slot never reaches the final balance; the
//multiplier indexed k applies at schedule index k+1; the regression anchors
//pin down this exact indexing
fn compute(contributions: &[f64], returns: &[AnnualReturn], mode: &CompoundingMode, load: f64) -> f64 {
    let mut balance = contributions[0];

    for (index, &contribution) in contributions.iter().enumerate().skip(1) {
        let net = contribution * (1.0 - load);
        let growth = year_multiplier(&returns[index - 1], mode);
        balance = if index == 1 {
            net * growth
        } else {
            (balance + net) * growth
        };
    }

    balance
}

fn year_multiplier(annual: &AnnualReturn, mode: &CompoundingMode) -> f64 {
    match mode {
        CompoundingMode::FirstFundOnly => annual.deltas[0],
        CompoundingMode::Weighted(allocation) => allocation
            .weights
            .iter()
            .zip(annual.deltas.iter())
            .map(|(weight, delta)| weight * delta)
            .sum(),
    }
}
