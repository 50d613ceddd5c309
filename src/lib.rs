//! Sensor anomaly scoring.
//!
//! `train` fits per-feature mean/std on a batch of readings and writes a
//! [`ModelArtifact`]; `predict` standardises one reading with those exact
//! statistics and flags it when its largest absolute deviation passes the
//! artifact's threshold.

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;

pub use application::train_use_case::TrainConfig;
pub use domain::error::{AnomalyError, Result};
pub use domain::feature_record::{FeatureRecord, FEATURE_ORDER};
pub use domain::model_artifact::ModelArtifact;
pub use domain::prediction::PredictionResult;
pub use ml::predictor::predict;
pub use ml::trainer::train;
