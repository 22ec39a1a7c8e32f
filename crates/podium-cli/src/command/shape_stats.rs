use std::path::PathBuf;

use anyhow::Context;
use podium_analysis::{AggregationLevel, AnalysisRequest, shape};
use podium_data::{AthleteTable, Feature, SexFilter};
use serde_json::{Value, json};

use crate::util::{Output, json_record};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShapeStatsArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Groups to summarize; empty means all
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,
    /// Features spanning the physique space, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [Feature::Height, Feature::Bmi, Feature::Age, Feature::Weight])]
    features: Vec<Feature>,
    /// Sex filter: M, F or all
    #[arg(long, default_value_t = SexFilter::All)]
    sex: SexFilter,
    /// Medal winner weight: above 2 duplicates medal rows before analysis
    #[arg(long, default_value_t = 1)]
    medal_multiplier: u32,
    /// Full request as JSON ({level, sex, features, keys}); overrides the
    /// individual flags
    #[arg(long)]
    request_json: Option<String>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ShapeStatsArg {
    fn request(&self) -> anyhow::Result<AnalysisRequest> {
        match &self.request_json {
            Some(request_json) => {
                serde_json::from_str(request_json).context("Failed to parse request JSON")
            }
            None => Ok(AnalysisRequest {
                level: self.level,
                sex: self.sex,
                features: self.features.clone(),
                keys: self.keys.clone(),
            }),
        }
    }
}

pub(crate) fn run(arg: &ShapeStatsArg) -> anyhow::Result<()> {
    let request = arg.request()?;

    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data)?;
    eprintln!("Loaded {} rows", table.len());

    let stats = shape::shape_by_group(
        &table,
        request.level,
        &request.keys,
        &request.features,
        request.sex,
        arg.medal_multiplier,
    )?;
    eprintln!("Summarized {} groups", stats.len());

    let records: Vec<Value> = stats
        .iter()
        .map(|group| {
            json_record([
                (request.level.column_name().to_owned(), json!(group.name)),
                ("kurtosis".to_owned(), json!(group.kurtosis)),
                ("entropy".to_owned(), json!(group.entropy)),
            ])
        })
        .collect();
    Output::save_json(&records, arg.output.clone())
}
