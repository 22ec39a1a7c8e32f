use std::path::PathBuf;

use podium_analysis::{
    AggregationLevel, group, medals,
    project::{self, Method},
};
use podium_data::{AthleteTable, Feature, SexFilter};
use serde_json::{Value, json};

use crate::util::{Output, json_record};

const AXES: [&str; 3] = ["x", "y", "z"];

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ProjectArg {
    /// Athlete dataset CSV path
    #[arg(long)]
    data: PathBuf,
    /// Group by Sport or Event
    #[arg(long, default_value_t = AggregationLevel::Sport)]
    level: AggregationLevel,
    /// Sex filter: M, F or all
    #[arg(long, default_value_t = SexFilter::All)]
    sex: SexFilter,
    /// Features to embed, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [Feature::Height, Feature::Bmi, Feature::Age, Feature::Weight])]
    features: Vec<Feature>,
    /// Embedding algorithm: mds or pca
    #[arg(long, default_value = "mds")]
    method: Method,
    /// Number of output dimensions (2 or 3)
    #[arg(long, default_value_t = 2)]
    dims: usize,
    /// Medal winner weight: above 2 duplicates medal rows before averaging
    #[arg(long, default_value_t = 1)]
    medal_multiplier: u32,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ProjectArg) -> anyhow::Result<()> {
    eprintln!("Loading athletes from {}...", arg.data.display());
    let table = AthleteTable::load(&arg.data)?;
    eprintln!("Loaded {} rows", table.len());

    let adjusted = medals::adjust_for_medals(&table, arg.medal_multiplier)?;
    let groups = group::aggregate(&adjusted, arg.level, &arg.features, arg.sex)?;
    eprintln!("Aggregated {} groups", groups.groups.len());

    let projection = project::reduce(&groups, arg.method, arg.dims)?;
    if let Some(stress) = projection.stress {
        eprintln!("Embedding stress: {stress:.6}");
    }

    let points: Vec<Value> = projection
        .points
        .iter()
        .map(|point| {
            let mut fields = vec![(arg.level.column_name().to_owned(), json!(point.name))];
            for (axis, coord) in AXES.iter().zip(&point.coords) {
                fields.push(((*axis).to_owned(), json!(coord)));
            }
            json_record(fields)
        })
        .collect();
    let result = json_record([
        ("stress".to_owned(), json!(projection.stress)),
        ("points".to_owned(), Value::Array(points)),
    ]);
    Output::save_json(&result, arg.output.clone())
}
