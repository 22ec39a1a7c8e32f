use std::path::PathBuf;

use podium_analysis::{AggregationLevel, group, medals};
use podium_data::{AthleteTable, Feature, SexFilter};
use serde_json::{Value, json};

use crate::util::{Output, json_record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AggregateArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Features to average, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [Feature::Height, Feature::Bmi, Feature::Age, Feature::Weight])]
    features: Vec<Feature>,
    /// Sex filter: M, F or all
    #[arg(long, default_value_t = SexFilter::All)]
    sex: SexFilter,
    /// Medal winner weight: above 2 duplicates medal rows before averaging
    #[arg(long, default_value_t = 1)]
    medal_multiplier: u32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &AggregateArg) -> anyhow::Result<()> {
    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data)?;
    eprintln!("Loaded {} rows", table.len());

    let adjusted = medals::adjust_for_medals(&table, arg.medal_multiplier)?;
    let groups = group::aggregate(&adjusted, arg.level, &arg.features, arg.sex)?;
    eprintln!("Aggregated {} groups", groups.groups.len());

    let records: Vec<Value> = groups
        .groups
        .iter()
        .map(|group| {
            let mut fields = vec![(arg.level.column_name().to_owned(), json!(group.name))];
            for (feature, value) in groups.features.iter().zip(&group.values) {
                fields.push((feature.column_name().to_owned(), json!(value)));
            }
            json_record(fields)
        })
        .collect();
    Output::save_json(&records, arg.output.clone())
}
