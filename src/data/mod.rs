// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a JSON file on disk and a standardised
// feature matrix:
//
//   input.json
//       │
//       ▼
//   JsonFileLoader   → parses records, classifies bad input
//       │
//       ▼
//   StandardScaler   → fits mean/std, standardises rows
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Reads training sets and prediction requests from JSON files
pub mod loader;

/// Population mean/std fitting and standardisation
pub mod scaler;
