use std::path::PathBuf;

/// Territorial convergence CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "convergencia", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Compute the per-department table and write all outputs
    Run(RunArgs),

    /// Print feature count, reference system and columns of one shapefile
    Inspect(InspectArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Run configuration (JSON)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output directory, overrides the config's output.dir
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub out: Option<PathBuf>,

    /// Overwrite existing output files
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args, Debug)]
pub struct InspectArgs {
    /// Shapefile to inspect (.shp)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub shapefile: PathBuf,
}
