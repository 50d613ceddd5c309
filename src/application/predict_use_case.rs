// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// One reading in, one decision out:
//   1. Load { features, model } from the input file
//   2. Score the reading against the artifact
//   3. Save { anomaly, anomaly_score, raw_score } atomically
//
// The artifact is deserialised fresh on every run and never
// modified, so any number of these can run side by side.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::data::loader::JsonFileLoader;
use crate::domain::prediction::PredictionResult;
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::predictor::predict;

pub struct PredictUseCase {
    input:  PathBuf,
    output: PathBuf,
}

impl PredictUseCase {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self { input: input.into(), output: output.into() }
    }

    pub fn execute(&self) -> Result<PredictionResult> {
        let loader  = JsonFileLoader::new(&self.input);
        let request = loader
            .load_request()
            .with_context(|| format!("Cannot load prediction input '{}'", loader.path().display()))?;

        let result = predict(&request.features, &request.model).context("Prediction failed")?;

        ArtifactStore::new(&self.output)
            .save(&result)
            .context("Cannot save prediction result")?;

        if result.is_anomaly() {
            tracing::warn!(
                "Anomalous reading: raw_score={:.4} anomaly_score={:.4}",
                result.raw_score,
                result.anomaly_score
            );
        } else {
            tracing::info!("Normal reading: anomaly_score={:.4}", result.anomaly_score);
        }
        Ok(result)
    }
}
