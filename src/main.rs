use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nestegg::prelude::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nestegg")]
#[command(about = "A compound-growth simulator comparing early and late savers", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run one scenario against a flat hypothetical return
    Run {
        //ben's start age
        #[arg(long, default_value = "21")]
        start_age: u32,

        //years ben contributes before handing over to joey
        #[arg(long, default_value = "9")]
        contribute_years: u32,

        //final simulated age
        #[arg(long, default_value = "67")]
        end_age: u32,

        //annual contribution in dollars
        #[arg(long, default_value = "2400")]
        contribution: f64,

        //flat annual return percentage (eg 11 for 11%)
        #[arg(long, default_value = "11")]
        return_pct: f64,

        //front-load sales charge as a fraction (eg 0.0575)
        #[arg(long, default_value = "0")]
        load: f64,
    },

    //sweep every start year of a historical price file
    Sweep {
        //path to raw price history
        #[arg(long)]
        data: PathBuf,

        //source layout (csv/index or tab/fund)
        #[arg(long, default_value = "csv")]
        format: String,

        //first candidate start year for ben
        #[arg(long, default_value = "1928")]
        first_year: i32,

        //last candidate start year for ben
        #[arg(long, default_value = "1978")]
        last_year: i32,

        //ben's start age
        #[arg(long, default_value = "21")]
        start_age: u32,

        //years ben contributes before handing over to joey
        #[arg(long, default_value = "9")]
        contribute_years: u32,

        //final simulated age
        #[arg(long, default_value = "67")]
        end_age: u32,

        //annual contribution in dollars
        #[arg(long, default_value = "2400")]
        contribution: f64,

        //front-load sales charge as a fraction
        #[arg(long, default_value = "0")]
        load: f64,

        //output path for per-start-year outcomes csv
        #[arg(long)]
        output_outcomes_csv: Option<PathBuf>,

        //json scenario file overriding the flags above
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            start_age,
            contribute_years,
            end_age,
            contribution,
            return_pct,
            load,
        } => {
            run_flat_scenario(
                start_age,
                contribute_years,
                end_age,
                contribution,
                return_pct,
                load,
            )?;
        }
        Commands::Sweep {
            data,
            format,
            first_year,
            last_year,
            start_age,
            contribute_years,
            end_age,
            contribution,
            load,
            output_outcomes_csv,
            config,
        } => {
            let config = match config {
                Some(path) => ScenarioConfiguration::from_json_file(&path)
                    .context(format!("Failed to load scenario config from {:?}", path))?,
                None => {
                    let format = DataFormat::parse(&format)
                        .ok_or_else(|| anyhow::anyhow!("Unknown data format: {}", format))?;
                    ScenarioConfiguration {
                        data_path: data,
                        format,
                        ben_start_age: start_age,
                        ben_years_to_contribute: contribute_years,
                        end_age,
                        annual_contribution: contribution,
                        load,
                        allocations: vec![1.0],
                        first_start_year: first_year,
                        last_start_year: last_year,
                        output_outcomes_csv,
                    }
                }
            };

            run_sweep(&config)?;
        }
    }

    Ok(())
}

fn run_flat_scenario(
    start_age: u32,
    contribute_years: u32,
    end_age: u32,
    contribution: f64,
    return_pct: f64,
    load: f64,
) -> Result<()> {
    println!("Nestegg Compound Growth Simulator");
    println!("=================================\n");

    let years = (end_age - start_age + 1) as usize;
    let delta = 1.0 + return_pct / 100.0;
    let returns = ReturnSeries::flat(delta, years);

    println!(
        "Ben contributes ${:.2}/year from age {} for {} years",
        contribution, start_age, contribute_years
    );
    println!(
        "Joey contributes ${:.2}/year from age {} through age {}",
        contribution,
        start_age + contribute_years,
        end_age
    );
    println!("Flat return: {:.2}% per year, load: {:.2}%\n", return_pct, load * 100.0);

    let result = simulate(
        start_age,
        contribute_years,
        end_age,
        contribution,
        returns.as_slice(),
        &CompoundingMode::FirstFundOnly,
        load,
    )?;

    println!("Ben ends with  ${:.2}", result.ben);
    println!("Joey ends with ${:.2}", result.joey);

    if result.ben > result.joey {
        println!(
            "\nBen wins by ${:.2} ({:.2}x)",
            result.ben - result.joey,
            result.ben / result.joey
        );
    } else {
        println!(
            "\nJoey wins by ${:.2} ({:.2}x)",
            result.joey - result.ben,
            result.joey / result.ben
        );
    }

    Ok(())
}

fn run_sweep(config: &ScenarioConfiguration) -> Result<()> {
    println!("Nestegg Compound Growth Simulator");
    println!("=================================\n");

    //load data
    println!("Loading data from {:?}...", config.data_path);
    let records = load_records(&config.data_path, config.format)
        .context(format!("Failed to load data from {:?}", config.data_path))?;

    if records.is_empty() {
        anyhow::bail!("No records found in {:?}", config.data_path);
    }

    println!("Loaded {} records", records.len());
    println!(
        "Date range: {} to {}\n",
        records.first().unwrap().date,
        records.last().unwrap().date
    );

    //aggregate to one growth multiplier per year
    let summaries = aggregate_annual_returns(&records, config.first_year_policy());
    let series = ReturnSeries::from_summaries(&summaries);
    println!(
        "Aggregated {} calendar years ({} with a defined multiplier)",
        summaries.len(),
        series.len()
    );

    println!(
        "Scenario: ${:.2}/year, ages {}..{}, handover after {} years, load {:.2}%",
        config.annual_contribution,
        config.ben_start_age,
        config.end_age,
        config.ben_years_to_contribute,
        config.load * 100.0
    );
    println!(
        "Sweeping start years {}..={}\n",
        config.first_start_year, config.last_start_year
    );

    //run one simulation per candidate start year
    let outcomes = sweep_start_years(
        &series,
        config.first_start_year,
        config.last_start_year,
        &config.sweep_scenario(),
    )?;

    let summary = SweepSummary::from_outcomes(&outcomes, config.ben_years_to_contribute)
        .ok_or_else(|| anyhow::anyhow!("Sweep produced no outcomes"))?;

    println!("Sweep Results");
    println!("=============\n");
    summary.pretty_print_table();

    if let Some(outcomes_path) = &config.output_outcomes_csv {
        save_outcomes_csv(&outcomes, outcomes_path)?;
        println!("\nOutcomes saved to {:?}", outcomes_path);
    }

    Ok(())
}

fn save_outcomes_csv(outcomes: &[StartYearOutcome], path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "start_year,ben,joey")?;

    for outcome in outcomes {
        writeln!(
            file,
            "{},{},{}",
            outcome.start_year, outcome.ben, outcome.joey
        )?;
    }

    Ok(())
}
