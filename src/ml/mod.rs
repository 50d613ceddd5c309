// ============================================================
// Layer 5 — ML / Scoring Layer
// ============================================================
// The two halves of the scoring model plus the diagnostic
// detector the trainer runs:
//
//   trainer.rs          — fits mean/std on a training set, runs the
//                         diagnostic pass, builds the ModelArtifact
//
//   predictor.rs        — standardises one reading with the artifact's
//                         statistics, computes raw_score, applies the
//                         threshold, rescales to anomaly_score
//
//   isolation_forest.rs — seeded isolation forest; produces the
//                         artifact's anomaly_rate and nothing else
//
// trainer and predictor share no code: they are tied together
// only by the artifact format and the standardisation formula.
//
// Reference: Liu et al. (2008) Isolation Forest

/// Diagnostic isolation forest
pub mod isolation_forest;

/// Training: statistics + artifact
pub mod trainer;

/// Prediction: score + decision
pub mod predictor;
