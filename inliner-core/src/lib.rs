//! Core types and structural utilities for the inliner
//!
//! This crate provides the building blocks every rewrite pass relies on:
//! - AST representation with a metadata side-table
//! - Structural (position-independent) tree equality
//! - Runtime values and program entities
//! - Conversion of values to literal nodes
//! - Provenance comments embedded in trees
//! - Error types

pub mod ast;
pub mod comment;
pub mod equality;
pub mod error;
pub mod literal;
pub mod value;

pub use comment::{Comment, FunctionComment, COMMENT_MARKER};
pub use equality::structurally_equal;
pub use error::{Error, Result};
pub use literal::{can_convert, from_literal, to_literal};
pub use value::Value;
