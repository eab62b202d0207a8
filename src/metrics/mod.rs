pub mod summary;

pub use summary::SweepSummary;
