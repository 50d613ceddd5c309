// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the other layers together for one CLI
// command:
//
//   train   → load records → train → save artifact
//   predict → load request → predict → save result
//
// Rules for this layer:
//   - No statistics or scoring math here (that's Layer 5)
//   - No argument parsing (that's Layer 1)
//   - Only workflow coordination and error context
//
// Reference: Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// The single-reading prediction workflow
pub mod predict_use_case;
