// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to training or
// prediction themselves:
//
//   artifact_store.rs — Writes JSON outputs (model artifacts and
//                       prediction results) atomically: serialise,
//                       write a temporary sibling file, rename it
//                       over the target. A failed run leaves the
//                       output path untouched.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

/// Atomic JSON persistence for artifacts and results
pub mod artifact_store;
