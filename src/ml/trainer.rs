// ============================================================
// Layer 5 — Trainer
// ============================================================
// Turns a training set into a ModelArtifact:
//
//   Step 1: Check the record floor            (InsufficientData)
//   Step 2: Build the feature matrix          (FEATURE_ORDER columns)
//   Step 3: Fit population mean / std         (DegenerateStatistics)
//   Step 4: Standardise every row
//   Step 5: Diagnostic isolation-forest pass  → anomaly_rate
//   Step 6: Assemble the artifact
//
// The threshold comes straight from the config. It is NOT
// derived from step 5; the forest only reports a rate.
//
// Reference: Liu et al. (2008) Isolation Forest

use crate::application::train_use_case::TrainConfig;
use crate::data::scaler::StandardScaler;
use crate::domain::error::{AnomalyError, Result};
use crate::domain::feature_record::{FeatureRecord, FEATURE_ORDER};
use crate::domain::model_artifact::ModelArtifact;
use crate::domain::traits::{outlier_rate, OutlierDetector};
use crate::ml::isolation_forest::IsolationForest;

/// Fit normalisation statistics on `records` and package them with
/// the configured threshold.
pub fn train(records: &[FeatureRecord], cfg: &TrainConfig) -> Result<ModelArtifact> {
    cfg.validate()?;

    // ── Step 1: Record floor ──────────────────────────────────────────────────
    if records.len() < cfg.min_training_samples {
        return Err(AnomalyError::InsufficientData {
            required: cfg.min_training_samples,
            got:      records.len(),
        });
    }

    // ── Step 2: Feature matrix, record order preserved ────────────────────────
    let matrix: Vec<Vec<f64>> = records.iter().map(|r| r.to_vector().to_vec()).collect();

    // ── Step 3: Population statistics ─────────────────────────────────────────
    let scaler = StandardScaler::fit(&matrix, &FEATURE_ORDER)?;
    for ((name, mean), std) in FEATURE_ORDER.iter().zip(scaler.means()).zip(scaler.stds()) {
        tracing::debug!("{name}: mean={mean:.6} std={std:.6}");
    }

    // ── Step 4: Standardise ───────────────────────────────────────────────────
    let scaled = scaler.transform(&matrix);

    // ── Step 5: Diagnostic outlier rate ───────────────────────────────────────
    let mut forest = IsolationForest::new(
        cfg.n_estimators,
        cfg.max_samples,
        cfg.contamination,
        cfg.random_seed,
    );
    let labels       = forest.fit_predict(&scaled)?;
    let anomaly_rate = outlier_rate(&labels);

    // ── Step 6: Artifact ──────────────────────────────────────────────────────
    let (feature_means, feature_stds) = scaler.into_parts();
    Ok(ModelArtifact {
        feature_order:     FEATURE_ORDER.iter().map(|s| s.to_string()).collect(),
        feature_means,
        feature_stds,
        anomaly_threshold: cfg.anomaly_threshold,
        contamination:     Some(cfg.contamination),
        n_estimators:      Some(cfg.n_estimators),
        anomaly_rate:      Some(anomaly_rate),
        training_samples:  records.len(),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    /// `n` readings tightly spread around (50, 0.1, 2.0).
    fn tight_records(n: usize) -> Vec<FeatureRecord> {
        (0..n)
            .map(|i| {
                FeatureRecord::new(
                    50.0 + ((i % 10) as f64 - 4.5) * 0.1,
                    0.1 + ((i / 10 % 10) as f64 - 4.5) * 0.001,
                    2.0 + ((i % 5) as f64 - 2.0) * 0.01,
                )
            })
            .collect()
    }

    #[test]
    fn test_ninety_nine_records_rejected() {
        let err = train(&tight_records(99), &TrainConfig::default()).unwrap_err();
        match err {
            AnomalyError::InsufficientData { required, got } => {
                assert_eq!(required, 100);
                assert_eq!(got, 99);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_hundred_records_accepted() {
        let model = train(&tight_records(100), &TrainConfig::default()).unwrap();
        assert_eq!(model.training_samples, 100);
        assert_eq!(model.feature_order, FEATURE_ORDER);
        assert_eq!(model.feature_means.len(), 3);
        assert_eq!(model.feature_stds.len(), 3);
        assert_eq!(model.anomaly_threshold, -0.1);
        assert_eq!(model.contamination, Some(0.05));
        assert_eq!(model.n_estimators, Some(100));
        assert!(model.validate().is_ok());
    }

    #[test]
    fn test_means_match_centre() {
        let model = train(&tight_records(100), &TrainConfig::default()).unwrap();
        assert!((model.feature_means[0] - 50.0).abs() < 1e-9);
        assert!((model.feature_means[1] - 0.1).abs() < 1e-12);
        assert!((model.feature_means[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_anomaly_rate_near_contamination() {
        let model = train(&tight_records(200), &TrainConfig::default()).unwrap();
        let rate  = model.anomaly_rate.unwrap();
        assert!((0.0..=0.15).contains(&rate), "rate = {rate}");
    }

    #[test]
    fn test_training_is_deterministic() {
        let records = tight_records(150);
        let a = train(&records, &TrainConfig::default()).unwrap();
        let b = train(&records, &TrainConfig::default()).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_constant_feature_is_degenerate() {
        let records: Vec<FeatureRecord> = tight_records(120)
            .into_iter()
            .map(|r| FeatureRecord { vib_rms: 0.1, ..r })
            .collect();
        match train(&records, &TrainConfig::default()) {
            Err(AnomalyError::DegenerateStatistics { feature, .. }) => {
                assert_eq!(feature, "vib_rms");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_configured_threshold_is_copied() {
        let cfg = TrainConfig { anomaly_threshold: -2.5, ..TrainConfig::default() };
        let model = train(&tight_records(100), &cfg).unwrap();
        assert_eq!(model.anomaly_threshold, -2.5);
    }

    #[test]
    fn test_invalid_config_rejected_before_data() {
        let cfg = TrainConfig { n_estimators: 0, ..TrainConfig::default() };
        assert!(matches!(
            train(&tight_records(5), &cfg),
            Err(AnomalyError::InvalidConfig { .. })
        ));
    }
}
