// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training run:
//
//   Step 1: Load the training set        (Layer 4 - data)
//   Step 2: Fit statistics + diagnostics (Layer 5 - ml)
//   Step 3: Save the artifact atomically (Layer 6 - infra)
//
// Nothing is written unless every step succeeds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::JsonFileLoader;
use crate::domain::error::AnomalyError;
use crate::domain::model_artifact::DEFAULT_ANOMALY_THRESHOLD;
use crate::domain::traits::RecordSource;
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::trainer::train;

// ─── Training Configuration ──────────────────────────────────────────────────
// Every knob of a training run, with the defaults the model was
// designed around. Serialisable so a run's settings can be logged
// or stored alongside the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Expected outlier fraction for the diagnostic pass, in (0, 0.5]
    pub contamination:        f64,
    /// Trees in the diagnostic isolation forest
    pub n_estimators:         usize,
    /// Subsample size per tree (capped at the training-set size)
    pub max_samples:          usize,
    /// Seed for the diagnostic pass; fixed so runs are reproducible
    pub random_seed:          u64,
    /// Decision boundary written into the artifact
    pub anomaly_threshold:    f64,
    /// Smallest accepted training set
    pub min_training_samples: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            contamination:        0.05,
            n_estimators:         100,
            max_samples:          256,
            random_seed:          42,
            anomaly_threshold:    DEFAULT_ANOMALY_THRESHOLD,
            min_training_samples: 100,
        }
    }
}

impl TrainConfig {
    /// Reject settings the trainer cannot honour.
    pub fn validate(&self) -> crate::domain::error::Result<()> {
        let invalid = |name: &str, reason: String| {
            Err(AnomalyError::InvalidConfig { name: name.to_string(), reason })
        };

        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return invalid("contamination", format!("must be in (0, 0.5], got {}", self.contamination));
        }
        if self.n_estimators == 0 {
            return invalid("n_estimators", "must be at least 1".into());
        }
        if self.max_samples == 0 {
            return invalid("max_samples", "must be at least 1".into());
        }
        if !self.anomaly_threshold.is_finite() {
            return invalid("anomaly_threshold", "must be finite".into());
        }
        if self.min_training_samples < 2 {
            return invalid("min_training_samples", "must be at least 2".into());
        }
        Ok(())
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    input:  PathBuf,
    output: PathBuf,
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, config: TrainConfig) -> Self {
        Self { input: input.into(), output: output.into(), config }
    }

    /// Run the whole pipeline; returns the training-set size.
    pub fn execute(&self) -> Result<usize> {
        // ── Step 1: Load ──────────────────────────────────────────────────────
        let loader  = JsonFileLoader::new(&self.input);
        let records = loader
            .load_records()
            .with_context(|| format!("Cannot load training set '{}'", loader.path().display()))?;
        tracing::info!("Training with {} samples", records.len());

        // ── Step 2: Train ─────────────────────────────────────────────────────
        let model = train(&records, &self.config).context("Training failed")?;
        if let Some(rate) = model.anomaly_rate {
            tracing::info!("Anomaly rate: {:.2}%", rate * 100.0);
        }

        // ── Step 3: Persist ───────────────────────────────────────────────────
        ArtifactStore::new(&self.output)
            .save(&model)
            .context("Cannot save model artifact")?;

        tracing::info!(
            "Model trained successfully on {} samples → '{}'",
            model.training_samples,
            self.output.display()
        );
        Ok(model.training_samples)
    }
}
