use crate::engine::sweep::StartYearOutcome;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median, Statistics};

//summary statistics over a start-year sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSummary {
    pub competitions: usize,
    pub ben_wins: usize,
    pub joey_wins: usize,
    pub ben_median: f64,
    pub joey_median: f64,
    pub ben_mean: f64,
    pub joey_mean: f64,
    pub ben_best: StartYearOutcome,
    pub ben_worst: StartYearOutcome,
    pub joey_best: StartYearOutcome,
    pub joey_worst: StartYearOutcome,
    //start year maximising ben's lead as a ratio of final balances
    pub biggest_gap: StartYearOutcome,
    //joey starts this many years after ben, used when reporting joey's years
    pub delay_years: u32,
}

impl SweepSummary {
    //collapses per-year outcomes into the reported statistics
    pub fn from_outcomes(outcomes: &[StartYearOutcome], delay_years: u32) -> Option<Self> {
        if outcomes.is_empty() {
            return None;
        }

        let ben_values: Vec<f64> = outcomes.iter().map(|o| o.ben).collect();
        let joey_values: Vec<f64> = outcomes.iter().map(|o| o.joey).collect();

        let ben_wins = outcomes.iter().filter(|o| o.ben > o.joey).count();
        let joey_wins = outcomes.iter().filter(|o| o.ben < o.joey).count();

        let ben_best = *outcomes.iter().max_by(|a, b| a.ben.total_cmp(&b.ben))?;
        let ben_worst = *outcomes.iter().min_by(|a, b| a.ben.total_cmp(&b.ben))?;
        let joey_best = *outcomes.iter().max_by(|a, b| a.joey.total_cmp(&b.joey))?;
        let joey_worst = *outcomes.iter().min_by(|a, b| a.joey.total_cmp(&b.joey))?;
        let biggest_gap = *outcomes
            .iter()
            .max_by(|a, b| (a.ben / a.joey).total_cmp(&(b.ben / b.joey)))?;

        Some(SweepSummary {
            competitions: outcomes.len(),
            ben_wins,
            joey_wins,
            ben_median: Data::new(ben_values.clone()).median(),
            joey_median: Data::new(joey_values.clone()).median(),
            ben_mean: ben_values.as_slice().mean(),
            joey_mean: joey_values.as_slice().mean(),
            ben_best,
            ben_worst,
            joey_best,
            joey_worst,
            biggest_gap,
            delay_years,
        })
    }

    //joey's calendar start year for an outcome keyed by ben's start year
    fn joey_year(&self, outcome: &StartYearOutcome) -> i32 {
        outcome.start_year + self.delay_years as i32
    }

    //prints the summary in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Competitions"),
            Cell::new(&format!("{}", self.competitions)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Ben wins"),
            Cell::new(&format!("{}", self.ben_wins)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Joey wins"),
            Cell::new(&format!("{}", self.joey_wins)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Ben median"),
            Cell::new(&format!("${:.2}", self.ben_median)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Joey median"),
            Cell::new(&format!("${:.2}", self.joey_median)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Ben average"),
            Cell::new(&format!("${:.2}", self.ben_mean)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Joey average"),
            Cell::new(&format!("${:.2}", self.joey_mean)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Ben best start"),
            Cell::new(&format!(
                "{} (${:.2})",
                self.ben_best.start_year, self.ben_best.ben
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Ben worst start"),
            Cell::new(&format!(
                "{} (${:.2})",
                self.ben_worst.start_year, self.ben_worst.ben
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Joey best start"),
            Cell::new(&format!(
                "{} (${:.2})",
                self.joey_year(&self.joey_best),
                self.joey_best.joey
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Joey worst start"),
            Cell::new(&format!(
                "{} (${:.2})",
                self.joey_year(&self.joey_worst),
                self.joey_worst.joey
            )),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Biggest gap"),
            Cell::new(&format!(
                "{}: Ben ${:.2} vs Joey ${:.2}",
                self.biggest_gap.start_year, self.biggest_gap.ben, self.biggest_gap.joey
            )),
        ]));

        table.printstd();
    }
}
