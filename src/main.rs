use std::path::PathBuf;

use cercalc::batch;
use cercalc::{CerError, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Compute(args) => execute_compute(args),
    }
}

fn execute_compute(args: ComputeArgs) -> Result<()> {
    let cer = batch::compute_batch(
        &args.predictions,
        &args.groundtruth,
        &args.prediction_column,
        &args.groundtruth_column,
    )?;
    println!("CER: {cer}");
    Ok(())
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| CerError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Compute the Character Error Rate between two tabular files."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare a predictions column against a ground-truth column.
    Compute(ComputeArgs),
}

#[derive(clap::Args)]
struct ComputeArgs {
    /// Path to the predictions file (.csv or .xlsx).
    #[arg(long)]
    predictions: PathBuf,

    /// Path to the ground-truth file (.csv or .xlsx).
    #[arg(long)]
    groundtruth: PathBuf,

    /// Column holding the predicted text.
    #[arg(long)]
    prediction_column: String,

    /// Column holding the ground-truth text.
    #[arg(long)]
    groundtruth_column: String,
}
