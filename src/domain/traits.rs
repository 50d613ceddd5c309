// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Two seams:
//   RecordSource    — where training records come from
//   OutlierDetector — the diagnostic pass run during training
//
// The trainer only needs "something that can flag outliers in a
// standardised matrix" to compute the diagnostic anomaly rate.
// IsolationForest is the one implementation today.
//
// Labels follow the usual outlier-detection convention:
//   -1 = outlier, 1 = inlier
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::error::Result;
use crate::domain::feature_record::FeatureRecord;

/// Label for a record the detector considers an outlier.
pub const OUTLIER: i8 = -1;

/// Label for a record the detector considers normal.
pub const INLIER: i8 = 1;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce an ordered training set.
///
/// Implementations:
///   - JsonFileLoader → reads a JSON array of records from disk
pub trait RecordSource {
    /// Load every record, in source order. A single bad record fails the load.
    fn load_records(&self) -> Result<Vec<FeatureRecord>>;
}

// ─── OutlierDetector ──────────────────────────────────────────────────────────
/// Any detector that can be fitted on rows of standardised features.
pub trait OutlierDetector {
    /// Fit the detector on `rows` (each row one record).
    fn fit(&mut self, rows: &[Vec<f64>]) -> Result<()>;

    /// Per-row score; lower means more anomalous.
    fn score_samples(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Per-row label, OUTLIER or INLIER.
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<i8>>;

    /// Fit on `rows`, then label the same rows.
    fn fit_predict(&mut self, rows: &[Vec<f64>]) -> Result<Vec<i8>> {
        self.fit(rows)?;
        self.predict(rows)
    }
}

/// Fraction of `labels` equal to OUTLIER. Zero for an empty slice.
pub fn outlier_rate(labels: &[i8]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let outliers = labels.iter().filter(|&&l| l == OUTLIER).count();
    outliers as f64 / labels.len() as f64
}
