pub mod scenario;

pub use scenario::ScenarioConfiguration;
