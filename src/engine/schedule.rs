use crate::engine::simulator::SimulationError;
use serde::{Deserialize, Serialize};

//per-year contribution amounts for one saver, index 0 is the ben start age
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionSchedule {
    pub amounts: Vec<f64>,
}

impl ContributionSchedule {
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.amounts
    }
}

//builds the two savers' schedules over the same span of years
//ben contributes for [start, start + contribute_years] inclusive then stops;
//joey starts contributing exactly where ben stops, through end_age inclusive,
//so the handover age appears in both windows and the span is end-start+2 slots
pub fn build_schedules(
    ben_start_age: u32,
    ben_years_to_contribute: u32,
    end_age: u32,
    annual_contribution: f64,
) -> Result<(ContributionSchedule, ContributionSchedule), SimulationError> {
    let handover_age = ben_start_age + ben_years_to_contribute;
    if handover_age > end_age {
        return Err(SimulationError::InvalidScheduleBounds {
            start: ben_start_age,
            contribute: ben_years_to_contribute,
            end: end_age,
        });
    }

    if annual_contribution < 0.0 {
        return Err(SimulationError::NegativeContribution(annual_contribution));
    }

    let ben_window = (ben_years_to_contribute + 1) as usize;
    let joey_window = (end_age - handover_age + 1) as usize;

    let mut ben = Vec::with_capacity(ben_window + joey_window);
    ben.resize(ben_window, annual_contribution);
    ben.resize(ben_window + joey_window, 0.0);

    let mut joey = Vec::with_capacity(ben_window + joey_window);
    joey.resize(ben_window, 0.0);
    joey.resize(ben_window + joey_window, annual_contribution);

    Ok((
        ContributionSchedule { amounts: ben },
        ContributionSchedule { amounts: joey },
    ))
}
