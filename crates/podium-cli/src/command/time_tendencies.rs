use std::path::PathBuf;

use podium_analysis::{AggregationLevel, timeseries};
use podium_data::{AthleteTable, SexFilter};
use serde_json::json;

use crate::util::{Output, json_record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TimeTendenciesArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Dataset column to aggregate per year
    #[arg(long, default_value = "Height")]
    column: String,
    /// Categories (sport/event names) to include; empty means all
    #[arg(long, value_delimiter = ',')]
    categories: Vec<String>,
    /// Sex filter: M, F or all
    #[arg(long, default_value_t = SexFilter::All)]
    sex: SexFilter,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Trend charts render an empty state instead of crashing, so every failure
/// here (missing dataset, unknown column, nothing to plot) is written as an
/// error record with a zero exit code.
pub(crate) fn run(arg: &TimeTendenciesArg) -> anyhow::Result<()> {
    match compute(arg) {
        Ok(points) => {
            eprintln!("Aggregated {} years", points.len());
            Output::save_json(&points, arg.output.clone())
        }
        Err(message) => {
            eprintln!("time-tendencies failed: {message}");
            let record = json_record([("error".to_owned(), json!(message))]);
            Output::save_json(&record, arg.output.clone())
        }
    }
}

fn compute(arg: &TimeTendenciesArg) -> Result<Vec<timeseries::TrendPoint>, String> {
    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data).map_err(|err| err.to_string())?;
    eprintln!("Loaded {} rows", table.len());

    timeseries::aggregate_over_time(&table, arg.level, &arg.column, &arg.categories, arg.sex)
        .map_err(|err| err.to_string())
}
