use crate::engine::simulator::{simulate, CompoundingMode, SimulationError};
use crate::returns::ReturnSeries;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Start year {0} is not present in the return series")]
    UnknownStartYear(i32),
    #[error("Start year {year} needs {required} years of returns but only {available} remain")]
    WindowTooShort {
        year: i32,
        required: usize,
        available: usize,
    },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

//the fixed scenario replayed against every candidate start year
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepScenario {
    pub ben_start_age: u32,
    pub ben_years_to_contribute: u32,
    pub end_age: u32,
    pub annual_contribution: f64,
    pub load: f64,
}

impl SweepScenario {
    //growth multipliers consumed by one simulation
    pub fn years_needed(&self) -> usize {
        (self.end_age - self.ben_start_age + 1) as usize
    }
}

//both savers' final balances for one candidate start year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StartYearOutcome {
    pub start_year: i32,
    pub ben: f64,
    pub joey: f64,
}

//replays the scenario for every start year in [first_year, last_year]
//each simulation reads its own immutable window of the series, so the years
//run in parallel; outcomes come back ordered by start year
pub fn sweep_start_years(
    series: &ReturnSeries,
    first_year: i32,
    last_year: i32,
    scenario: &SweepScenario,
) -> Result<Vec<StartYearOutcome>, SweepError> {
    let years_needed = scenario.years_needed();

    (first_year..=last_year)
        .into_par_iter()
        .map(|year| {
            let start = series
                .position_of_year(year)
                .ok_or(SweepError::UnknownStartYear(year))?;
            let window = series
                .window(start, years_needed)
                .ok_or(SweepError::WindowTooShort {
                    year,
                    required: years_needed,
                    available: series.len() - start,
                })?;

            let result = simulate(
                scenario.ben_start_age,
                scenario.ben_years_to_contribute,
                scenario.end_age,
                scenario.annual_contribution,
                window,
                &CompoundingMode::FirstFundOnly,
                scenario.load,
            )?;

            Ok(StartYearOutcome {
                start_year: year,
                ben: result.ben,
                joey: result.joey,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::AnnualReturn;

    fn scenario() -> SweepScenario {
        SweepScenario {
            ben_start_age: 21,
            ben_years_to_contribute: 9,
            end_age: 67,
            annual_contribution: 2400.0,
            load: 0.0,
        }
    }

    fn long_flat_series(first_year: i32, years: usize, delta: f64) -> ReturnSeries {
        ReturnSeries::new(
            (0..years)
                .map(|i| AnnualReturn::single(first_year + i as i32, delta))
                .collect(),
        )
    }

    #[test]
    fn flat_history_gives_identical_outcomes_per_start_year() {
        //1928..2027, enough for start years 1928..=1953 with a 47 year window
        let series = long_flat_series(1928, 100, 1.11);
        let outcomes = sweep_start_years(&series, 1928, 1953, &scenario()).unwrap();

        assert_eq!(outcomes.len(), 26);
        assert_eq!(outcomes[0].start_year, 1928);
        assert_eq!(outcomes[25].start_year, 1953);
        for outcome in &outcomes {
            assert_eq!(outcome.ben, outcomes[0].ben);
            assert_eq!(outcome.joey, outcomes[0].joey);
        }
        //flat 11% favours the early saver
        assert!(outcomes[0].ben > outcomes[0].joey);
    }

    #[test]
    fn outcomes_are_ordered_by_start_year() {
        let series = long_flat_series(1928, 100, 1.08);
        let outcomes = sweep_start_years(&series, 1930, 1950, &scenario()).unwrap();

        let years: Vec<i32> = outcomes.iter().map(|o| o.start_year).collect();
        assert_eq!(years, (1930..=1950).collect::<Vec<i32>>());
    }

    #[test]
    fn missing_start_year_is_reported() {
        let series = long_flat_series(1928, 100, 1.11);
        let err = sweep_start_years(&series, 1900, 1910, &scenario()).unwrap_err();
        assert!(matches!(err, SweepError::UnknownStartYear(1900)));
    }

    #[test]
    fn window_past_series_end_is_reported() {
        //only 50 years of data, start year 1970 needs 47 but has 8 left
        let series = long_flat_series(1928, 50, 1.11);
        let err = sweep_start_years(&series, 1970, 1970, &scenario()).unwrap_err();
        assert!(matches!(
            err,
            SweepError::WindowTooShort {
                year: 1970,
                required: 47,
                available: 8
            }
        ));
    }
}
