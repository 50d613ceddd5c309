// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `train` and `predict`.
//
// Each takes exactly two positional arguments, INPUT and OUTPUT.
// clap rejects any other count with a usage message on stderr
// and a non-zero exit status, before any file is touched.
//
// `train` also accepts optional flags that override TrainConfig
// defaults; they never change the positional arity.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit normalisation statistics on a JSON array of feature records
    Train(TrainArgs),

    /// Score one reading against a trained model artifact
    Predict(PredictArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// JSON array of {temp_mean, vib_rms, current_rms} records
    pub input: PathBuf,

    /// Where to write the model artifact
    pub output: PathBuf,

    /// Expected outlier fraction for the diagnostic pass
    #[arg(long, default_value_t = 0.05)]
    pub contamination: f64,

    /// Number of trees in the diagnostic isolation forest
    #[arg(long, default_value_t = 100)]
    pub n_estimators: usize,

    /// Subsample size per tree
    #[arg(long, default_value_t = 256)]
    pub max_samples: usize,

    /// Random seed for the diagnostic pass
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Decision threshold stored in the artifact
    #[arg(long, default_value_t = -0.1, allow_hyphen_values = true)]
    pub threshold: f64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// The application layer never sees clap types.
impl From<&TrainArgs> for TrainConfig {
    fn from(a: &TrainArgs) -> Self {
        TrainConfig {
            contamination:     a.contamination,
            n_estimators:      a.n_estimators,
            max_samples:       a.max_samples,
            random_seed:       a.seed,
            anomaly_threshold: a.threshold,
            ..TrainConfig::default()
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON object {"features": {...}, "model": {...}}
    pub input: PathBuf,

    /// Where to write {"anomaly", "anomaly_score", "raw_score"}
    pub output: PathBuf,
}
