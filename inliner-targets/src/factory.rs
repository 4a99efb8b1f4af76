//! Building inline targets from user-facing specifications

use crate::context::ModuleResolver;
use crate::error::{Result, TargetError};
use crate::target::InlineTarget;
use inliner_core::Value;
use tracing::{debug, trace};

/// Anything a caller may hand to [`make_target`]
#[derive(Debug, Clone)]
pub enum TargetSpec {
    /// An already-built target, returned unchanged
    Target(InlineTarget),
    /// A dotted path such as `pkg.module.Class.method`
    Path(String),
    /// A direct reference to a module, function or class
    Value(Value),
}

impl From<InlineTarget> for TargetSpec {
    fn from(target: InlineTarget) -> Self {
        TargetSpec::Target(target)
    }
}

impl From<&str> for TargetSpec {
    fn from(path: &str) -> Self {
        TargetSpec::Path(path.to_string())
    }
}

impl From<String> for TargetSpec {
    fn from(path: String) -> Self {
        TargetSpec::Path(path)
    }
}

impl From<Value> for TargetSpec {
    fn from(value: Value) -> Self {
        TargetSpec::Value(value)
    }
}

/// Resolves `spec` into the matching [`InlineTarget`] variant.
///
/// Dotted paths are split at each separator from the right: the longest
/// prefix the resolver knows becomes the module and the remainder is read off
/// it as an attribute chain.
pub fn make_target(spec: impl Into<TargetSpec>, resolver: &dyn ModuleResolver) -> Result<InlineTarget> {
    match spec.into() {
        TargetSpec::Target(target) => Ok(target),
        TargetSpec::Path(path) => {
            let value = resolve_path(&path, resolver)?;
            classify(value)
        }
        TargetSpec::Value(value) => classify(value),
    }
}

fn resolve_path(path: &str, resolver: &dyn ModuleResolver) -> Result<Value> {
    let parts: Vec<&str> = path.split('.').collect();

    for split in (1..=parts.len()).rev() {
        let module_name = parts[..split].join(".");
        let Some(module) = resolver.import_module(&module_name) else {
            trace!("no module named {module_name}");
            continue;
        };

        let mut value = Value::Module(module);
        let mut resolved = true;
        for attr in &parts[split..] {
            match value.get_attr(attr) {
                Some(next) => value = next,
                None => {
                    trace!("{module_name} has no attribute chain {}", parts[split..].join("."));
                    resolved = false;
                    break;
                }
            }
        }

        if resolved {
            debug!("resolved {path} through module {module_name}");
            return Ok(value);
        }
    }

    Err(TargetError::Resolution {
        path: path.to_string(),
    })
}

fn classify(value: Value) -> Result<InlineTarget> {
    match value {
        Value::Module(module) => Ok(InlineTarget::Module(module)),
        Value::Function(function) => Ok(InlineTarget::Function(function)),
        Value::Type(class) => Ok(InlineTarget::Class(class)),
        other => Err(TargetError::Unsupported {
            description: other.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
