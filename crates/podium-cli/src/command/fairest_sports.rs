use std::path::PathBuf;

use podium_analysis::{AggregationLevel, fairness};
use podium_data::{AthleteTable, Feature, Sex, reference::ReferenceDistribution};
use serde_json::{Value, json};

use crate::util::{Output, json_record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct FairestSportsArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Population reference CSV path
    #[arg(long)]
    reference: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Sex to compare against the reference of the same sex
    #[arg(long, default_value_t = Sex::M)]
    sex: Sex,
    /// Features to compare, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [Feature::Height, Feature::Bmi, Feature::Age])]
    features: Vec<Feature>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &FairestSportsArg) -> anyhow::Result<()> {
    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data)?;
    eprintln!("Loaded {} rows", table.len());

    eprintln!("Loading reference from {}...", arg.reference.display());
    let reference = ReferenceDistribution::load(&arg.reference)?;

    let scored = fairness::score_groups(&table, &reference, arg.level, &arg.features, arg.sex)?;
    eprintln!("Scored {} groups", scored.len());

    let records: Vec<Value> = scored
        .iter()
        .map(|group| {
            let mut fields = vec![(arg.level.column_name().to_owned(), json!(group.name))];
            for (feature, score) in arg.features.iter().zip(&group.scores) {
                fields.push((feature.column_name().to_owned(), json!(score)));
            }
            fields.push(("total".to_owned(), json!(group.total)));
            json_record(fields)
        })
        .collect();
    Output::save_json(&records, arg.output.clone())
}
