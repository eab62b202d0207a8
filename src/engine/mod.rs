pub mod schedule;
pub mod simulator;
pub mod sweep;

pub use schedule::{build_schedules, ContributionSchedule};
pub use simulator::{simulate, Allocation, CompoundingMode, SimulationError, SimulationResult};
pub use sweep::{sweep_start_years, StartYearOutcome, SweepError, SweepScenario};
