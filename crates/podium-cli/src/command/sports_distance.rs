use std::path::PathBuf;

use anyhow::Context;
use podium_analysis::{AggregationLevel, UserQuery, distance, group, medals};
use podium_data::{AthleteTable, Feature, SexFilter, gdp::GdpTable};
use serde_json::{Value, json};

use crate::util::{Output, json_record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SportsDistanceArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Sex filter: M, F or all
    #[arg(long, default_value_t = SexFilter::All)]
    sex: SexFilter,
    /// Features spanning the distance space, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [Feature::Height, Feature::Bmi, Feature::Age, Feature::Weight])]
    features: Vec<Feature>,
    /// Medal winner weight: above 2 duplicates medal rows before averaging
    #[arg(long, default_value_t = 1)]
    medal_multiplier: u32,
    /// JSON user profile; ranks groups against it instead of pairwise
    #[arg(long)]
    user_json: Option<String>,
    /// GDP lookup CSV, needed when GDP is among the features of a user ranking
    #[arg(long)]
    gdp: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SportsDistanceArg) -> anyhow::Result<()> {
    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data)?;
    eprintln!("Loaded {} rows", table.len());

    let adjusted = medals::adjust_for_medals(&table, arg.medal_multiplier)?;
    let groups = group::aggregate(&adjusted, arg.level, &arg.features, arg.sex)?;
    eprintln!("Aggregated {} groups", groups.groups.len());

    let records: Vec<Value> = match &arg.user_json {
        Some(user_json) => {
            let user: UserQuery =
                serde_json::from_str(user_json).context("Failed to parse user profile JSON")?;
            let gdp = match &arg.gdp {
                Some(path) => GdpTable::load(path)?,
                None => GdpTable::default(),
            };
            let ranked = distance::rank_for_user(&groups, &user, &gdp)?;
            ranked
                .iter()
                .map(|group| {
                    json_record([
                        (arg.level.column_name().to_owned(), json!(group.name)),
                        ("Distance".to_owned(), json!(group.distance)),
                    ])
                })
                .collect()
        }
        None => {
            let pairs = distance::rank_pairwise(&groups)?;
            pairs
                .iter()
                .map(|pair| {
                    json_record([
                        ("first".to_owned(), json!(pair.first)),
                        ("second".to_owned(), json!(pair.second)),
                        ("Distance".to_owned(), json!(pair.distance)),
                    ])
                })
                .collect()
        }
    };
    Output::save_json(&records, arg.output.clone())
}
