use std::path::PathBuf;

use anyhow::Context;
use podium_data::reference;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateReferenceArg {
    /// Number of synthetic people to draw per sex
    #[arg(long, default_value_t = 10_000)]
    samples_per_sex: usize,
    /// Random seed; a fixed seed makes the artifact reproducible
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Output CSV path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateReferenceArg) -> anyhow::Result<()> {
    eprintln!(
        "Synthesizing {} reference samples per sex (seed {})...",
        arg.samples_per_sex, arg.seed
    );
    let rows = reference::synthesize(arg.samples_per_sex, arg.seed);

    let output = Output::from_output_path(arg.output.clone())?;
    let path = output.display_path();
    let mut writer = csv::Writer::from_writer(output);
    for row in &rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write reference row to {path}"))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush reference CSV to {path}"))?;
    eprintln!("Wrote {} rows to {path}", rows.len());
    Ok(())
}
