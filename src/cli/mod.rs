// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands off to Layer 2 (application).
//
// Two commands are supported:
//   1. `train`   — training set in, model artifact out
//   2. `predict` — reading + artifact in, decision out
//
// Results go to the OUTPUT file only; stdout stays empty.
// Progress is logged through tracing (stderr).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, TrainArgs};

/// clap reads the fields and generates argument parsing via the Parser derive.
#[derive(Parser, Debug)]
#[command(
    name = "sensor-anomaly",
    version,
    about = "Train normalisation statistics on sensor features, then flag anomalous readings."
)]
pub struct Cli {
    /// The subcommand to run (train or predict)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Routing only, no computation.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Train(args)   => run_train(args),
            Commands::Predict(args) => run_predict(args),
        }
    }
}

fn run_train(args: &TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Training on '{}'", args.input.display());
    TrainUseCase::new(&args.input, &args.output, args.into()).execute()?;
    Ok(())
}

fn run_predict(args: &PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    PredictUseCase::new(&args.input, &args.output).execute()?;
    Ok(())
}
