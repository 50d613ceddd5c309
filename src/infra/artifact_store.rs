// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Persists JSON outputs: the ModelArtifact after training and
// the PredictionResult after prediction.
//
// Write protocol:
//   1. Serialise to pretty JSON (2-space indent) in memory
//   2. Write it to `.<file name>.tmp` next to the target
//   3. Rename the temporary file over the target
//
// A rename within one directory is atomic, so a reader sees
// either the previous file or the complete new one, never a
// truncated artifact. Two trainers sharing an output path is
// still last-writer-wins.
//
// File layout:
//   models/
//     sensor_model.json        ← target
//     .sensor_model.json.tmp   ← exists only during a write
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use serde::{de::DeserializeOwned, Serialize};
use std::{fs, io, path::{Path, PathBuf}};

use crate::domain::error::{AnomalyError, Result};

/// Writes and reads one JSON file.
pub struct ArtifactStore {
    /// Final location of the JSON file
    path: PathBuf,
}

impl ArtifactStore {
    /// Create a new ArtifactStore for the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialise `value` and atomically replace the target file with it.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| self.write_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        // create_dir_all is a no-op when the directory already exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }

        let tmp = self.temp_path();
        if let Err(e) = fs::write(&tmp, json).and_then(|_| fs::rename(&tmp, &self.path)) {
            // Best effort: the temporary file must not outlive a failed write
            fs::remove_file(&tmp).ok();
            return Err(self.write_error(e));
        }

        tracing::debug!("Saved '{}'", self.path.display());
        Ok(())
    }

    /// Read the target file back.
    pub fn load<T: DeserializeOwned>(&self) -> Result<T> {
        let json = fs::read_to_string(&self.path).map_err(|e| AnomalyError::InputFormat {
            path:   self.path.clone(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&json).map_err(|e| AnomalyError::InputFormat {
            path:   self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// `.<file name>.tmp` in the target's directory
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    fn write_error(&self, source: io::Error) -> AnomalyError {
        AnomalyError::OutputWrite { path: self.path.clone(), source }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prediction::PredictionResult;
    use tempfile::tempdir;

    #[test]
    fn test_save_then_load() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("result.json"));
        let value = PredictionResult { anomaly: 0, anomaly_score: 0.45, raw_score: -0.05 };

        store.save(&value).unwrap();
        let back: PredictionResult = store.load().unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn test_output_is_pretty_printed() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("result.json"));
        store
            .save(&PredictionResult { anomaly: 1, anomaly_score: 0.0, raw_score: -4.0 })
            .unwrap();
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\n  \"anomaly\": 1"));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("model.json"));
        store.save(&vec![1.0, 2.0]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["model.json".to_string()]);
    }

    #[test]
    fn test_creates_missing_parent() {
        let dir   = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("models").join("model.json"));
        store.save(&vec![1.0]).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_unwritable_target_is_output_write() {
        let dir = tempdir().unwrap();
        // Target is an existing directory, so the rename cannot replace it
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = ArtifactStore::new(&target).save(&vec![1.0]).unwrap_err();
        assert!(matches!(err, AnomalyError::OutputWrite { .. }));
        assert!(!dir.path().join(".taken.tmp").exists());
    }
}
