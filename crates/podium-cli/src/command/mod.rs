use clap::{Parser, Subcommand};

use self::{
    aggregate::AggregateArg, fairest_sports::FairestSportsArg,
    generate_reference::GenerateReferenceArg, project::ProjectArg, shape_stats::ShapeStatsArg,
    sports_distance::SportsDistanceArg, time_tendencies::TimeTendenciesArg,
};

mod aggregate;
mod fairest_sports;
mod generate_reference;
mod project;
mod shape_stats;
mod sports_distance;
mod time_tendencies;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank sports or events by how population-like their athletes are
    FairestSports(#[clap(flatten)] FairestSportsArg),
    /// Rank group pairs, or groups against a user profile, by distance
    SportsDistance(#[clap(flatten)] SportsDistanceArg),
    /// Embed group feature vectors in 2 or 3 dimensions
    Project(#[clap(flatten)] ProjectArg),
    /// Aggregate one dataset column per year and category
    TimeTendencies(#[clap(flatten)] TimeTendenciesArg),
    /// Kurtosis/entropy summaries of group physique distributions
    ShapeStats(#[clap(flatten)] ShapeStatsArg),
    /// Per-group mean feature vectors
    Aggregate(#[clap(flatten)] AggregateArg),
    /// Regenerate the synthetic population reference CSV
    GenerateReference(#[clap(flatten)] GenerateReferenceArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::FairestSports(arg) => fairest_sports::run(&arg)?,
        Mode::SportsDistance(arg) => sports_distance::run(&arg)?,
        Mode::Project(arg) => project::run(&arg)?,
        Mode::TimeTendencies(arg) => time_tendencies::run(&arg)?,
        Mode::ShapeStats(arg) => shape_stats::run(&arg)?,
        Mode::Aggregate(arg) => aggregate::run(&arg)?,
        Mode::GenerateReference(arg) => generate_reference::run(&arg)?,
    }
    Ok(())
}
