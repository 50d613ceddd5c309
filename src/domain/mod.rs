// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits describing the scoring model:
// what a reading is, what training produces, what prediction
// returns, and how each step can fail.
//
// Rules for this layer:
//   - NO file I/O
//   - NO statistics or detector code
//   - Only types, parsing from JSON values, and invariants
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Typed error taxonomy shared by every layer below the CLI
pub mod error;

// One reading's derived features and the canonical column order
pub mod feature_record;

// Serialised statistics + threshold produced by training
pub mod model_artifact;

// Predict-run input envelope and output
pub mod prediction;

// Outlier detector abstraction used by the diagnostic pass
pub mod traits;
