// ============================================================
// Layer 3 — ModelArtifact Domain Type
// ============================================================
// The only thing training hands to prediction. Written once by
// the trainer, then read (never mutated) by each predict run.
//
// Serialised layout:
//   {
//     "feature_order":     ["temp_mean", "vib_rms", "current_rms"],
//     "feature_means":     [..3 floats..],
//     "feature_stds":      [..3 floats..],
//     "anomaly_threshold": -0.1,
//     "contamination":     0.05,
//     "n_estimators":      100,
//     "anomaly_rate":      0.05,
//     "training_samples":  2500
//   }
//
// Older artifacts name the feature list `features`, and reduced
// copies may omit the diagnostics entirely. Those still load:
// only the two statistics arrays are mandatory.
//
// Reference: Rust Book §5 (Structs)
//            serde attributes documentation (alias, default)

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::{AnomalyError, Result};
use crate::domain::feature_record::{FEATURE_ORDER, N_FEATURES};

/// Threshold applied when an artifact does not carry one.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = -0.1;

/// Normalisation statistics and decision threshold produced by training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature names; position i describes feature_means[i] / feature_stds[i]
    #[serde(alias = "features", default = "default_feature_order")]
    pub feature_order: Vec<String>,

    /// Population mean of each feature over the training set
    pub feature_means: Vec<f64>,

    /// Population standard deviation of each feature
    pub feature_stds: Vec<f64>,

    /// raw_score below this value is an anomaly
    #[serde(default = "default_threshold")]
    pub anomaly_threshold: f64,

    /// Expected outlier fraction given to the diagnostic pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contamination: Option<f64>,

    /// Tree count of the diagnostic pass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<usize>,

    /// Fraction of training records the diagnostic pass flagged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_rate: Option<f64>,

    /// Records used to fit the statistics
    #[serde(default)]
    pub training_samples: usize,
}

fn default_feature_order() -> Vec<String> {
    FEATURE_ORDER.iter().map(|s| s.to_string()).collect()
}

fn default_threshold() -> f64 {
    DEFAULT_ANOMALY_THRESHOLD
}

impl ModelArtifact {
    /// Deserialise and validate an artifact from JSON.
    /// Any problem, structural or numeric, is reported as InvalidModel.
    pub fn from_json(value: &Value) -> Result<Self> {
        let model: ModelArtifact = serde_json::from_value(value.clone())
            .map_err(|e| AnomalyError::InvalidModel(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Check the invariants the predictor relies on:
    ///   - every known feature named exactly once
    ///   - one mean and one std per named feature
    ///   - every name is a known feature, none repeated
    ///   - all statistics finite, every std non-zero
    ///   - threshold finite
    pub fn validate(&self) -> Result<()> {
        let n = self.feature_order.len();
        if n != N_FEATURES {
            return Err(AnomalyError::InvalidModel(format!(
                "feature_order must name all {N_FEATURES} features, got {n}"
            )));
        }
        if self.feature_means.len() != n || self.feature_stds.len() != n {
            return Err(AnomalyError::InvalidModel(format!(
                "length mismatch: {} features, {} means, {} stds",
                n,
                self.feature_means.len(),
                self.feature_stds.len()
            )));
        }

        for (i, name) in self.feature_order.iter().enumerate() {
            if !FEATURE_ORDER.contains(&name.as_str()) {
                return Err(AnomalyError::InvalidModel(format!("unknown feature '{name}'")));
            }
            if self.feature_order[..i].contains(name) {
                return Err(AnomalyError::InvalidModel(format!("duplicate feature '{name}'")));
            }
        }

        for ((name, mean), std) in self
            .feature_order
            .iter()
            .zip(&self.feature_means)
            .zip(&self.feature_stds)
        {
            if !mean.is_finite() {
                return Err(AnomalyError::InvalidModel(format!(
                    "mean of '{name}' is not finite"
                )));
            }
            if !std.is_finite() || *std == 0.0 {
                return Err(AnomalyError::InvalidModel(format!(
                    "std of '{name}' must be finite and non-zero, got {std}"
                )));
            }
        }

        if !self.anomaly_threshold.is_finite() {
            return Err(AnomalyError::InvalidModel("anomaly_threshold is not finite".into()));
        }

        Ok(())
    }
}
