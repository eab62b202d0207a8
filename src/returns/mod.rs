pub mod aggregate;
pub mod series;

pub use aggregate::{aggregate_annual_returns, AnnualSummary, FirstYearPolicy};
pub use series::{AnnualReturn, ReturnSeries};
