//! Inline targets: what a rewrite pass should inline, and which call sites
//! in a tree invoke it
//!
//! Matching asks an [`EvalContext`] what each callee evaluates to. Target
//! construction asks a [`ModuleResolver`] for modules by dotted name.

pub mod context;
pub mod error;
pub mod factory;
pub mod scope;
pub mod target;

pub use context::{EvalContext, ModuleResolver};
pub use error::{EvalError, Result, TargetError};
pub use factory::{make_target, TargetSpec};
pub use scope::{ModuleRegistry, Scope};
pub use target::{find_call_sites, InlineTarget};
