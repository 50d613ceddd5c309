// ============================================================
// Layer 3 — FeatureRecord Domain Type
// ============================================================
// One sensor reading, already reduced to three window features:
//
//   temp_mean   — mean temperature over the sampling window
//   vib_rms     — RMS vibration magnitude
//   current_rms — RMS current magnitude
//
// FEATURE_ORDER fixes the column order used everywhere a record
// is turned into a vector: the training matrix, the artifact's
// statistics arrays, and the predictor's input vector.
//
// Records are parsed from a serde_json::Value rather than derived
// directly so a missing key (MissingFeature) can be told apart
// from a key holding a string or null (InputFormat).
//
// Reference: Rust Book §5 (Structs), §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::domain::error::{AnomalyError, Result};

/// Canonical feature column order.
pub const FEATURE_ORDER: [&str; 3] = ["temp_mean", "vib_rms", "current_rms"];

/// Number of features per record.
pub const N_FEATURES: usize = FEATURE_ORDER.len();

/// Derived features for a single sampling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub temp_mean:   f64,
    pub vib_rms:     f64,
    pub current_rms: f64,
}

impl FeatureRecord {
    /// Create a new FeatureRecord
    pub fn new(temp_mean: f64, vib_rms: f64, current_rms: f64) -> Self {
        Self { temp_mean, vib_rms, current_rms }
    }

    /// Parse a record from a JSON object.
    ///
    /// `record` is the position inside a training set, used only
    /// for error messages. `source` names the file being read.
    /// Keys other than the three features are ignored.
    pub fn from_json(value: &Value, record: Option<usize>, source: &Path) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| AnomalyError::InputFormat {
            path:   source.to_path_buf(),
            reason: format!("{}expected a JSON object", record_prefix(record)),
        })?;

        let mut values = [0.0f64; N_FEATURES];
        for (slot, name) in values.iter_mut().zip(FEATURE_ORDER) {
            let raw = obj.get(name).ok_or_else(|| AnomalyError::MissingFeature {
                feature: name.to_string(),
                record,
            })?;

            // as_f64 accepts integers too, so `50` and `50.0` both parse
            *slot = raw.as_f64().ok_or_else(|| AnomalyError::InputFormat {
                path:   source.to_path_buf(),
                reason: format!(
                    "{}feature '{}' is not a number (got {})",
                    record_prefix(record),
                    name,
                    raw
                ),
            })?;
        }

        Ok(Self::new(values[0], values[1], values[2]))
    }

    /// Look up a feature by name. Returns None for unknown names.
    pub fn value_of(&self, feature: &str) -> Option<f64> {
        match feature {
            "temp_mean"   => Some(self.temp_mean),
            "vib_rms"     => Some(self.vib_rms),
            "current_rms" => Some(self.current_rms),
            _             => None,
        }
    }

    /// Features in canonical FEATURE_ORDER.
    pub fn to_vector(&self) -> [f64; N_FEATURES] {
        [self.temp_mean, self.vib_rms, self.current_rms]
    }
}

fn record_prefix(record: Option<usize>) -> String {
    match record {
        Some(i) => format!("record {i}: "),
        None    => String::new(),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn src() -> &'static Path {
        Path::new("input.json")
    }

    #[test]
    fn test_parses_all_features() {
        let v = json!({ "temp_mean": 50, "vib_rms": 0.1, "current_rms": 2.0 });
        let r = FeatureRecord::from_json(&v, None, src()).unwrap();
        assert_eq!(r, FeatureRecord::new(50.0, 0.1, 2.0));
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let v = json!({
            "temp_mean": 1.0, "vib_rms": 2.0, "current_rms": 3.0, "edge_health": 88
        });
        let r = FeatureRecord::from_json(&v, Some(0), src()).unwrap();
        assert_eq!(r.to_vector(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_key_is_missing_feature() {
        let v   = json!({ "temp_mean": 1.0, "current_rms": 3.0 });
        let err = FeatureRecord::from_json(&v, Some(4), src()).unwrap_err();
        match err {
            AnomalyError::MissingFeature { feature, record } => {
                assert_eq!(feature, "vib_rms");
                assert_eq!(record, Some(4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_null_or_string_is_input_format() {
        let v = json!({ "temp_mean": null, "vib_rms": 2.0, "current_rms": 3.0 });
        assert!(matches!(
            FeatureRecord::from_json(&v, None, src()),
            Err(AnomalyError::InputFormat { .. })
        ));

        let v = json!({ "temp_mean": 1.0, "vib_rms": "2.0", "current_rms": 3.0 });
        assert!(matches!(
            FeatureRecord::from_json(&v, None, src()),
            Err(AnomalyError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_non_object_is_input_format() {
        let v = json!([1.0, 2.0, 3.0]);
        assert!(matches!(
            FeatureRecord::from_json(&v, Some(0), src()),
            Err(AnomalyError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_value_of_follows_names() {
        let r = FeatureRecord::new(1.0, 2.0, 3.0);
        for (name, expected) in FEATURE_ORDER.iter().zip(r.to_vector()) {
            assert_eq!(r.value_of(name), Some(expected));
        }
        assert_eq!(r.value_of("edge_health"), None);
    }
}
