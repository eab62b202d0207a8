//a Rust-based compound-growth simulator comparing early and late savers

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod returns;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::ScenarioConfiguration;
    pub use crate::data::{
        load_records, CsvFileSource, DataFormat, LoadError, PriceRecord, RecordSource,
    };
    pub use crate::engine::{
        build_schedules, simulate, sweep_start_years, Allocation, CompoundingMode,
        ContributionSchedule, SimulationError, SimulationResult, StartYearOutcome, SweepError,
        SweepScenario,
    };
    pub use crate::metrics::SweepSummary;
    pub use crate::returns::{
        aggregate_annual_returns, AnnualReturn, AnnualSummary, FirstYearPolicy, ReturnSeries,
    };
}
