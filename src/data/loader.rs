// ============================================================
// Layer 4 — JSON Loader
// ============================================================
// Reads the two input shapes from disk:
//
//   train   → [ {temp_mean, vib_rms, current_rms}, ... ]
//   predict → { "features": {...}, "model": {...} }
//
// Failures are classified before any computation starts:
//   - file missing / unreadable / not JSON / wrong shape → InputFormat
//   - record without a feature key                       → MissingFeature
//   - artifact problems                                  → InvalidModel
//
// One malformed record aborts the whole load.
//
// Reference: Rust Book §9 (Error Handling)
//            serde_json crate documentation

use serde_json::Value;
use std::{fs, path::{Path, PathBuf}};

use crate::domain::error::{AnomalyError, Result};
use crate::domain::feature_record::FeatureRecord;
use crate::domain::prediction::PredictionRequest;
use crate::domain::traits::RecordSource;

/// Loads training records or a prediction request from a JSON file.
/// Implements the RecordSource trait from Layer 3.
pub struct JsonFileLoader {
    /// Path to the JSON input file
    path: PathBuf,
}

impl JsonFileLoader {
    /// Create a new JsonFileLoader pointed at a file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the prediction envelope.
    pub fn load_request(&self) -> Result<PredictionRequest> {
        let value = read_json(&self.path)?;
        PredictionRequest::from_json(&value, &self.path)
    }
}

impl RecordSource for JsonFileLoader {
    fn load_records(&self) -> Result<Vec<FeatureRecord>> {
        let value = read_json(&self.path)?;

        let items = value.as_array().ok_or_else(|| AnomalyError::InputFormat {
            path:   self.path.clone(),
            reason: "expected a JSON array of feature records".into(),
        })?;

        let records = items
            .iter()
            .enumerate()
            .map(|(i, item)| FeatureRecord::from_json(item, Some(i), &self.path))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Loaded {} records from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Read a file and parse it as JSON, mapping both failure
/// kinds to InputFormat.
fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| AnomalyError::InputFormat {
        path:   path.to_path_buf(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&text).map_err(|e| AnomalyError::InputFormat {
        path:   path.to_path_buf(),
        reason: e.to_string(),
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_loads_records_in_order() {
        let f = file_with(
            r#"[
                {"temp_mean": 1.0, "vib_rms": 2.0, "current_rms": 3.0},
                {"temp_mean": 4.0, "vib_rms": 5.0, "current_rms": 6.0}
            ]"#,
        );
        let records = JsonFileLoader::new(f.path()).load_records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].to_vector(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_missing_file_is_input_format() {
        let loader = JsonFileLoader::new("/definitely/not/here.json");
        assert!(matches!(
            loader.load_records(),
            Err(AnomalyError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_input_format() {
        let f = file_with("[{\"temp_mean\": 1.0,");
        assert!(matches!(
            JsonFileLoader::new(f.path()).load_records(),
            Err(AnomalyError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_object_instead_of_array_is_input_format() {
        let f = file_with(r#"{"temp_mean": 1.0, "vib_rms": 2.0, "current_rms": 3.0}"#);
        assert!(matches!(
            JsonFileLoader::new(f.path()).load_records(),
            Err(AnomalyError::InputFormat { .. })
        ));
    }

    #[test]
    fn test_one_bad_record_fails_whole_load() {
        let f = file_with(
            r#"[
                {"temp_mean": 1.0, "vib_rms": 2.0, "current_rms": 3.0},
                {"temp_mean": 4.0, "current_rms": 6.0}
            ]"#,
        );
        match JsonFileLoader::new(f.path()).load_records() {
            Err(AnomalyError::MissingFeature { feature, record }) => {
                assert_eq!(feature, "vib_rms");
                assert_eq!(record, Some(1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_loads_request() {
        let f = file_with(
            r#"{
                "features": {"temp_mean": 50.0, "vib_rms": 0.1, "current_rms": 2.0},
                "model": {"feature_means": [50.0, 0.1, 2.0], "feature_stds": [1.0, 1.0, 1.0]}
            }"#,
        );
        let req = JsonFileLoader::new(f.path()).load_request().unwrap();
        assert_eq!(req.model.anomaly_threshold, -0.1);
    }
}
