// ============================================================
// Layer 5 — Predictor
// ============================================================
// Scores one reading against a ModelArtifact. Mirrors the
// trainer's standardisation exactly, using only the statistics
// stored in the artifact:
//
//   scaled[j]     = (raw[j] - feature_means[j]) / feature_stds[j]
//   raw_score     = -max_j |scaled[j]|
//   anomaly       = raw_score < anomaly_threshold
//                   (i.e. max deviation strictly exceeds -threshold;
//                    a reading exactly on the threshold is normal)
//   anomaly_score = clamp((raw_score + 0.5) / 1.0, 0, 1)
//
// The sign convention follows outlier-score models: the more
// negative raw_score, the further the reading is from normal.

use crate::domain::error::{AnomalyError, Result};
use crate::domain::feature_record::FeatureRecord;
use crate::domain::model_artifact::ModelArtifact;
use crate::domain::prediction::PredictionResult;

/// Added to raw_score before rescaling
const SCORE_OFFSET: f64 = 0.5;
/// Width of the raw_score band mapped onto [0, 1]
const SCORE_SCALE: f64 = 1.0;

/// Score `record` against `model`.
pub fn predict(record: &FeatureRecord, model: &ModelArtifact) -> Result<PredictionResult> {
    model.validate()?;

    let raw_score = score(record, model)?;
    let anomaly   = u8::from(raw_score < model.anomaly_threshold);
    let result    = PredictionResult {
        anomaly,
        anomaly_score: normalise_score(raw_score),
        raw_score,
    };

    tracing::debug!(
        "raw_score={:.6} threshold={} anomaly={} anomaly_score={:.6}",
        result.raw_score,
        model.anomaly_threshold,
        result.anomaly,
        result.anomaly_score,
    );
    Ok(result)
}

/// Negative of the largest absolute standardised deviation.
///
/// Features are read in `model.feature_order`, so the vector lines
/// up with the artifact's statistics whatever order it lists them in.
pub fn score(record: &FeatureRecord, model: &ModelArtifact) -> Result<f64> {
    let max_distance = model
        .feature_order
        .iter()
        .zip(&model.feature_means)
        .zip(&model.feature_stds)
        .map(|((name, mean), std)| {
            record
                .value_of(name)
                .map(|raw| ((raw - mean) / std).abs())
                .ok_or_else(|| AnomalyError::InvalidModel(format!("unknown feature '{name}'")))
        })
        .try_fold(0.0f64, |acc, d| d.map(|d| acc.max(d)))?;

    Ok(-max_distance)
}

/// Affine rescale of raw_score into [0, 1]; out-of-band values saturate.
pub fn normalise_score(raw_score: f64) -> f64 {
    ((raw_score + SCORE_OFFSET) / SCORE_SCALE).clamp(0.0, 1.0)
}
