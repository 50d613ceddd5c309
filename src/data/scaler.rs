// ============================================================
// Layer 4 — Standard Scaler
// ============================================================
// Fits per-feature mean and standard deviation on a training
// matrix, then standardises rows with them:
//
//   scaled[j] = (raw[j] - mean[j]) / std[j]
//
// Population statistics are used (divide by n, not n - 1), so
// the fitted training set standardises to mean 0 and std 1.
//
// A constant column has std 0 and cannot be standardised. fit()
// refuses it with DegenerateStatistics instead of letting
// infinities or NaNs leak into the artifact.
//
// The predictor does NOT use this type: it applies the stored
// artifact statistics itself, with the same formula.
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use crate::domain::error::{AnomalyError, Result};

/// Fitted per-feature normalisation statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds:  Vec<f64>,
}

impl StandardScaler {
    /// Fit on `rows`. `names` labels the columns and fixes their count.
    ///
    /// Every row must have `names.len()` entries and there must be
    /// at least one row.
    pub fn fit(rows: &[Vec<f64>], names: &[&str]) -> Result<Self> {
        let n_features = names.len();
        if rows.is_empty() {
            return Err(AnomalyError::InsufficientData { required: 1, got: 0 });
        }
        debug_assert!(rows.iter().all(|r| r.len() == n_features));

        let n = rows.len() as f64;

        // ── Pass 1: means ─────────────────────────────────────────────────────
        // Each column is divided by its largest magnitude before summing
        // and squaring, so finite inputs near f64::MAX stay finite.
        let means: Vec<f64> = (0..n_features)
            .map(|j| {
                let scale = max_abs(rows.iter().map(|r| r[j]));
                if scale == 0.0 {
                    return 0.0;
                }
                scale * (rows.iter().map(|r| r[j] / scale).sum::<f64>() / n)
            })
            .collect();

        // ── Pass 2: population std around the means ───────────────────────────
        let stds: Vec<f64> = means
            .iter()
            .enumerate()
            .map(|(j, m)| {
                let scale = max_abs(rows.iter().map(|r| r[j] - m));
                if scale == 0.0 {
                    return 0.0;
                }
                let sum_sq: f64 = rows.iter().map(|r| ((r[j] - m) / scale).powi(2)).sum();
                scale * (sum_sq / n).sqrt()
            })
            .collect();

        // ── Reject columns that cannot be standardised ────────────────────────
        for (j, name) in names.iter().enumerate() {
            let first    = rows[0][j];
            let constant = rows.iter().all(|r| r[j] == first);
            if constant || stds[j] == 0.0 || !stds[j].is_finite() || !means[j].is_finite() {
                return Err(AnomalyError::DegenerateStatistics {
                    feature: name.to_string(),
                    std:     if constant { 0.0 } else { stds[j] },
                });
            }
        }

        Ok(Self { means, stds })
    }

    /// Standardise one row with the fitted statistics.
    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.stds)
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }

    /// Standardise every row, preserving order.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|r| self.transform_row(r)).collect()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Hand the statistics over, e.g. to build an artifact.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.means, self.stds)
    }
}

/// Largest absolute value in `values`, 0 when empty.
fn max_abs(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, |acc, x| acc.max(x.abs()))
}
