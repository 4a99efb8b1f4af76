//! Runtime value representation
//!
//! A [`Value`] is what the evaluation collaborator hands back for an
//! expression. Scalars and containers compare structurally; program entities
//! (functions, classes, instances, modules) are shared behind `Arc` and
//! compare by identity, the way the host language does.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Runtime value types
#[derive(Debug, Clone)]
pub enum Value {
    /// The null value
    None,

    Bool(bool),

    Int(i64),

    Float(f64),

    Str(String),

    Bytes(Vec<u8>),

    Tuple(Vec<Value>),

    List(Vec<Value>),

    /// Mapping, kept in insertion order
    Dict(Vec<(Value, Value)>),

    Set(Vec<Value>),

    /// A class object referenced as a value, e.g. `int` or `MyClass`
    Type(Arc<ClassInfo>),

    /// A parameterized type annotation such as `List[int]`
    GenericAlias(String),

    /// A plain function, also what a method looks like when read off its class
    Function(Arc<FunctionInfo>),

    /// A function bound to a receiver, e.g. `obj.method`
    BoundMethod {
        receiver: Box<Value>,
        function: Arc<FunctionInfo>,
    },

    /// An instance of a class
    Instance(Arc<InstanceInfo>),

    Module(Arc<ModuleInfo>),
}

/// A function definition
#[derive(Debug)]
pub struct FunctionInfo {
    pub name: String,
    /// Dotted path of the defining module
    pub module: String,
    /// Qualified name within the module, e.g. `Outer.method`
    pub qualname: String,
}

impl FunctionInfo {
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        let qualname = qualname.into();
        let name = last_segment(&qualname).to_string();
        Self {
            name,
            module: module.into(),
            qualname,
        }
    }

    /// `module.qualname`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }
}

/// A class definition with its bases and members
#[derive(Debug)]
pub struct ClassInfo {
    pub name: String,
    pub module: String,
    pub qualname: String,
    pub bases: Vec<Arc<ClassInfo>>,
    members: FxHashMap<String, Value>,
}

impl ClassInfo {
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        let qualname = qualname.into();
        let name = last_segment(&qualname).to_string();
        Self {
            name,
            module: module.into(),
            qualname,
            bases: Vec::new(),
            members: FxHashMap::default(),
        }
    }

    pub fn with_base(mut self, base: Arc<ClassInfo>) -> Self {
        self.bases.push(base);
        self
    }

    /// Defines a method `name` whose qualified name is nested under this class
    pub fn with_method(mut self, name: &str) -> Self {
        let function = FunctionInfo::new(self.module.clone(), format!("{}.{}", self.qualname, name));
        self.members
            .insert(name.to_string(), Value::Function(Arc::new(function)));
        self
    }

    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    /// `module.qualname`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }

    /// Identity-based subclass check; a class is a subclass of itself.
    pub fn is_subclass_of(&self, other: &ClassInfo) -> bool {
        std::ptr::eq(self, other) || self.bases.iter().any(|base| base.is_subclass_of(other))
    }

    /// Looks a member up on this class, then on its bases depth-first
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.members
            .get(name)
            .or_else(|| self.bases.iter().find_map(|base| base.lookup(name)))
    }

    /// Whether instances of this class can be called like functions
    pub fn is_call_capable(&self) -> bool {
        matches!(self.lookup("__call__"), Some(Value::Function(_)))
    }
}

/// An object created from a class
#[derive(Debug)]
pub struct InstanceInfo {
    pub class: Arc<ClassInfo>,
    attributes: FxHashMap<String, Value>,
}

impl InstanceInfo {
    pub fn new(class: Arc<ClassInfo>) -> Self {
        Self {
            class,
            attributes: FxHashMap::default(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }
}

/// An importable unit and the names it defines
#[derive(Debug)]
pub struct ModuleInfo {
    /// Dotted module path, e.g. `a.b`
    pub name: String,
    members: FxHashMap<String, Value>,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: FxHashMap::default(),
        }
    }

    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    pub fn member(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }
}

fn last_segment(qualname: &str) -> &str {
    qualname.rsplit('.').next().unwrap_or(qualname)
}

impl Value {
    /// Dotted path of the module that defines this value, if it has one
    pub fn defining_module(&self) -> Option<&str> {
        match self {
            Value::Function(function) | Value::BoundMethod { function, .. } => {
                Some(&function.module)
            }
            Value::Type(class) => Some(&class.module),
            Value::Instance(instance) => Some(&instance.class.module),
            Value::Module(module) => Some(&module.name),
            _ => None,
        }
    }

    /// Class of the value for the entity kinds that have one
    pub fn class(&self) -> Option<&Arc<ClassInfo>> {
        match self {
            Value::Instance(instance) => Some(&instance.class),
            _ => None,
        }
    }

    /// Attribute lookup. Reading a function off an instance binds it.
    pub fn get_attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Module(module) => module.member(name).cloned(),
            Value::Type(class) => class.lookup(name).cloned(),
            Value::Instance(instance) => {
                if let Some(value) = instance.attributes.get(name) {
                    return Some(value.clone());
                }
                match instance.class.lookup(name)? {
                    Value::Function(function) => Some(Value::BoundMethod {
                        receiver: Box::new(self.clone()),
                        function: function.clone(),
                    }),
                    other => Some(other.clone()),
                }
            }
            _ => None,
        }
    }

    /// Name of the value's runtime type, used in diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Tuple(_) => "tuple",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Set(_) => "set",
            Value::Type(_) => "type",
            Value::GenericAlias(_) => "generic alias",
            Value::Function(_) => "function",
            Value::BoundMethod { .. } => "method",
            Value::Instance(instance) => &instance.class.name,
            Value::Module(_) => "module",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            // Mapping equality ignores insertion order
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            (Value::Type(a), Value::Type(b)) => Arc::ptr_eq(a, b),
            (Value::GenericAlias(a), Value::GenericAlias(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (
                Value::BoundMethod {
                    receiver: r1,
                    function: f1,
                },
                Value::BoundMethod {
                    receiver: r2,
                    function: f2,
                },
            ) => Arc::ptr_eq(f1, f2) && r1 == r2,
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::Module(a), Value::Module(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Value::Tuple(items) => {
                write!(f, "(")?;
                seq(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::List(items) => {
                write!(f, "[")?;
                seq(f, items)?;
                write!(f, "]")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                seq(f, items)?;
                write!(f, "}}")
            }
            Value::Dict(pairs) => {
                write!(f, "{{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Type(class) => write!(f, "<class '{}'>", class.full_name()),
            Value::GenericAlias(text) => write!(f, "{text}"),
            Value::Function(function) => write!(f, "<function {}>", function.full_name()),
            Value::BoundMethod { receiver, function } => {
                write!(f, "<bound method {} of {}>", function.qualname, receiver)
            }
            Value::Instance(instance) => {
                write!(f, "<{} object>", instance.class.full_name())
            }
            Value::Module(module) => write!(f, "<module '{}'>", module.name),
        }
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
