// ============================================================
// Layer 3 — Prediction Request / Result
// ============================================================
// Input of a predict run:  { "features": {...}, "model": {...} }
// Output of a predict run: { "anomaly", "anomaly_score", "raw_score" }
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::domain::error::{AnomalyError, Result};
use crate::domain::feature_record::FeatureRecord;
use crate::domain::model_artifact::ModelArtifact;

/// A single reading paired with the artifact to score it against.
#[derive(Debug, Clone)]
pub struct PredictionRequest {
    pub features: FeatureRecord,
    pub model:    ModelArtifact,
}

impl PredictionRequest {
    /// Split the request envelope and parse both halves.
    ///
    /// A missing `features` object is reported as InputFormat,
    /// a missing `model` as InvalidModel.
    pub fn from_json(value: &Value, source: &Path) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| AnomalyError::InputFormat {
            path:   source.to_path_buf(),
            reason: "expected a JSON object with 'features' and 'model'".into(),
        })?;

        let features = obj.get("features").ok_or_else(|| AnomalyError::InputFormat {
            path:   source.to_path_buf(),
            reason: "missing 'features' object".into(),
        })?;
        let model = obj
            .get("model")
            .ok_or_else(|| AnomalyError::InvalidModel("missing 'model' object".into()))?;

        // Model first: a bad artifact makes the record irrelevant
        let model    = ModelArtifact::from_json(model)?;
        let features = FeatureRecord::from_json(features, None, source)?;

        Ok(Self { features, model })
    }
}

/// Decision for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 = anomalous, 0 = normal
    pub anomaly: u8,

    /// raw_score affinely rescaled and clamped to [0, 1]
    pub anomaly_score: f64,

    /// Negative of the largest absolute standardised deviation
    pub raw_score: f64,
}

impl PredictionResult {
    pub fn is_anomaly(&self) -> bool {
        self.anomaly == 1
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> Value {
        json!({
            "feature_means": [50.0, 0.1, 2.0],
            "feature_stds":  [1.0, 0.01, 0.2]
        })
    }

    #[test]
    fn test_parses_envelope() {
        let v = json!({
            "features": { "temp_mean": 50.0, "vib_rms": 0.1, "current_rms": 2.0 },
            "model": model()
        });
        let req = PredictionRequest::from_json(&v, Path::new("in.json")).unwrap();
        assert_eq!(req.features.temp_mean, 50.0);
        assert_eq!(req.model.feature_means.len(), 3);
    }

    #[test]
    fn test_missing_model_is_invalid_model() {
        let v = json!({
            "features": { "temp_mean": 50.0, "vib_rms": 0.1, "current_rms": 2.0 }
        });
        assert!(matches!(
            PredictionRequest::from_json(&v, Path::new("in.json")),
            Err(AnomalyError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_record_without_feature_is_missing_feature() {
        let v = json!({
            "features": { "temp_mean": 50.0, "vib_rms": 0.1 },
            "model": model()
        });
        assert!(matches!(
            PredictionRequest::from_json(&v, Path::new("in.json")),
            Err(AnomalyError::MissingFeature { .. })
        ));
    }

    #[test]
    fn test_result_serialises_integer_flag() {
        let r = PredictionResult { anomaly: 1, anomaly_score: 0.0, raw_score: -3.0 };
        let v = serde_json::to_value(r).unwrap();
        assert_eq!(v["anomaly"], json!(1));
        assert!(r.is_anomaly());
    }
}
