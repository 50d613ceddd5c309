// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the scoring model can hit has its own variant
// so callers can tell them apart with a `match` instead of
// parsing messages.
//
// All variants are fatal: nothing is retried, nothing is
// defaulted, and no partial artifact or result is written.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by training, prediction and their file plumbing.
#[derive(Debug, Error)]
pub enum AnomalyError {
    /// Input file missing, unreadable, not JSON, or the wrong shape
    #[error("invalid input '{}': {reason}", path.display())]
    InputFormat { path: PathBuf, reason: String },

    /// Training set is below the minimum record count
    #[error("insufficient data: {got} samples, need at least {required}")]
    InsufficientData { required: usize, got: usize },

    /// A record lacks one of the required feature keys
    #[error("missing feature '{feature}'{}", describe_record(*record))]
    MissingFeature {
        feature: String,
        record:  Option<usize>,
    },

    /// A feature has zero spread, so standardisation would divide by zero
    #[error("degenerate statistics: feature '{feature}' has standard deviation {std}")]
    DegenerateStatistics { feature: String, std: f64 },

    /// Model artifact is missing fields or is internally inconsistent
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Training configuration is out of range
    #[error("invalid config: {name} - {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Result could not be persisted
    #[error("cannot write '{}'", path.display())]
    OutputWrite {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_record(record: Option<usize>) -> String {
    match record {
        Some(i) => format!(" in record {i}"),
        None    => String::new(),
    }
}

/// Result alias used by the domain, data, ml and infra layers.
pub type Result<T> = std::result::Result<T, AnomalyError>;

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display() {
        let err = AnomalyError::InsufficientData { required: 100, got: 99 };
        assert_eq!(err.to_string(), "insufficient data: 99 samples, need at least 100");
    }

    #[test]
    fn test_missing_feature_mentions_record() {
        let err = AnomalyError::MissingFeature {
            feature: "vib_rms".to_string(),
            record:  Some(7),
        };
        assert_eq!(err.to_string(), "missing feature 'vib_rms' in record 7");

        let err = AnomalyError::MissingFeature {
            feature: "vib_rms".to_string(),
            record:  None,
        };
        assert_eq!(err.to_string(), "missing feature 'vib_rms'");
    }

    #[test]
    fn test_output_write_keeps_source() {
        use std::error::Error as _;
        let err = AnomalyError::OutputWrite {
            path:   PathBuf::from("out.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<AnomalyError>();
    }
}
