use crate::data::DataFormat;
use crate::engine::sweep::SweepScenario;
use crate::returns::FirstYearPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

//complete sweep configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfiguration {
    //data
    pub data_path: PathBuf,
    pub format: DataFormat,

    //saver timing
    pub ben_start_age: u32,
    pub ben_years_to_contribute: u32,
    pub end_age: u32,

    //money
    pub annual_contribution: f64,
    pub load: f64,
    pub allocations: Vec<f64>,

    //sweep range (ben's candidate start years)
    pub first_start_year: i32,
    pub last_start_year: i32,

    //optional output path
    pub output_outcomes_csv: Option<PathBuf>,
}

impl ScenarioConfiguration {
    //the aggregation policy implied by the source layout: index exports define
    //the first year's multiplier, fund exports leave it undefined
    pub fn first_year_policy(&self) -> FirstYearPolicy {
        match self.format {
            DataFormat::IndexCsv => FirstYearPolicy::Defined,
            DataFormat::MutualFundTab => FirstYearPolicy::Undefined,
        }
    }

    pub fn sweep_scenario(&self) -> SweepScenario {
        SweepScenario {
            ben_start_age: self.ben_start_age,
            ben_years_to_contribute: self.ben_years_to_contribute,
            end_age: self.end_age,
            annual_contribution: self.annual_contribution,
            load: self.load,
        }
    }
}

impl Default for ScenarioConfiguration {
    fn default() -> Self {
        //the late-2024 website scenario over the s&p 500 history
        ScenarioConfiguration {
            data_path: PathBuf::from("sap500.csv"),
            format: DataFormat::IndexCsv,
            ben_start_age: 21,
            ben_years_to_contribute: 9,
            end_age: 67,
            annual_contribution: 2400.0,
            load: 0.0,
            allocations: vec![1.0],
            first_start_year: 1928,
            last_start_year: 1978,
            output_outcomes_csv: None,
        }
    }
}

impl ScenarioConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: ScenarioConfiguration = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");

        let mut config = ScenarioConfiguration::default();
        config.load = 0.0575;
        config.to_json_file(&path).unwrap();

        let loaded = ScenarioConfiguration::from_json_file(&path).unwrap();
        assert_eq!(loaded.load, 0.0575);
        assert_eq!(loaded.format, DataFormat::IndexCsv);
        assert_eq!(loaded.first_start_year, 1928);
    }

    #[test]
    fn policy_follows_format() {
        let mut config = ScenarioConfiguration::default();
        assert_eq!(config.first_year_policy(), FirstYearPolicy::Defined);

        config.format = DataFormat::MutualFundTab;
        assert_eq!(config.first_year_policy(), FirstYearPolicy::Undefined);
    }
}
