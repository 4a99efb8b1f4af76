//! Error types for target construction and expression evaluation

use inliner_parser::ParseError;
use thiserror::Error;

/// Failure to build an inline target
#[derive(Error, Debug)]
pub enum TargetError {
    /// No prefix of the dotted path names a known module, or the rest of the
    /// path is not an attribute chain of that module
    #[error("Could not resolve inline target `{path}`")]
    Resolution { path: String },

    #[error("Can't make inline target from object: {description}")]
    Unsupported { description: String },
}

/// Failure of the evaluation collaborator. Target matching maps every one of
/// these to "no match".
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("name '{0}' is not defined")]
    UnboundName(String),

    #[error("'{type_name}' object has no attribute '{attr}'")]
    MissingAttribute { type_name: String, attr: String },

    #[error("cannot evaluate {0} expressions")]
    Unsupported(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Core(#[from] inliner_core::Error),
}

pub type Result<T> = std::result::Result<T, TargetError>;
