//! Structural analyses that rewrite passes consult before changing a tree
//!
//! - [`purity`]: conservative effect-free classification
//! - [`size`]: node-count cost metric

pub mod purity;
pub mod size;

pub use purity::{is_effect_free, EffectFreeClassifier, PURE_CALLABLES};
pub use size::tree_size;
