//! Resolved types and constant values supplied by the program graph.
//!
//! Types travel through snapshots as strings (`pkg/path.Name`, `int`,
//! `[]pkg.T`, ...) and are classified once on load. Constant values are
//! normalized so that value equality is the only notion of coverage.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

/// A declared, named type: identifier plus the package that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamedType {
    /// Import path of the owning package
    pub package: String,
    /// Type identifier
    pub name: String,
}

impl NamedType {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Statically resolved type of an expression or constant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeRef {
    /// A declared type such as `example.Day`
    Named(NamedType),
    /// A predeclared type such as `int` or `untyped int`
    Basic(String),
    /// Anything else (slices, pointers, function types, ...)
    Composite(String),
}

impl TypeRef {
    /// Returns the named type, if this is one.
    pub fn as_named(&self) -> Option<&NamedType> {
        match self {
            Self::Named(named) => Some(named),
            _ => None,
        }
    }
}

fn named_type_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    // SAFETY: This regex pattern is hardcoded and validated at compile-test time.
    REGEX.get_or_init(|| {
        Regex::new(r"^(?P<pkg>[^\s\[\]\(\)\{\}\*]+)\.(?P<name>[A-Za-z_][A-Za-z0-9_]*)$")
            .expect("Hardcoded regex pattern is valid")
    })
}

fn basic_type_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^(untyped )?[A-Za-z_][A-Za-z0-9_]*$").expect("Hardcoded regex pattern is valid")
    })
}

impl From<String> for TypeRef {
    fn from(s: String) -> Self {
        if let Some(caps) = named_type_regex().captures(&s) {
            return Self::Named(NamedType::new(&caps["pkg"], &caps["name"]));
        }
        if basic_type_regex().is_match(&s) {
            Self::Basic(s)
        } else {
            Self::Composite(s)
        }
    }
}

impl From<&str> for TypeRef {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TypeRef> for String {
    fn from(ty: TypeRef) -> Self {
        ty.to_string()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => named.fmt(f),
            Self::Basic(s) | Self::Composite(s) => f.write_str(s),
        }
    }
}

/// A compile-time constant value.
///
/// Construct floats through [`ConstValue::float`] so that integral floats
/// compare equal to the matching integer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ConstValue {
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
}

impl ConstValue {
    /// Normalizing float constructor: `-0.0` becomes `0` and integral values
    /// become [`ConstValue::Int`].
    pub fn float(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e38 {
            Self::Int(f as i128)
        } else {
            Self::Float(f)
        }
    }
}

impl PartialEq for ConstValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ConstValue {}

impl Hash for ConstValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Bool(b) => b.hash(state),
            Self::Int(i) => i.hash(state),
            Self::Float(f) => f.to_bits().hash(state),
            Self::Str(s) => s.hash(state),
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl TryFrom<Value> for ConstValue {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(Self::Bool(b)),
            Value::String(s) => Ok(Self::Str(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(Self::Int(i128::from(u)))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::float(f))
                } else {
                    Err(format!("unrepresentable constant {}", n))
                }
            }
            other => Err(format!("expected a bool, number or string constant, got {}", other)),
        }
    }
}

impl From<ConstValue> for Value {
    fn from(value: ConstValue) -> Self {
        match value {
            ConstValue::Bool(b) => Value::Bool(b),
            ConstValue::Int(i) => i64::try_from(i)
                .map(Value::from)
                .or_else(|_| u64::try_from(i).map(Value::from))
                .unwrap_or_else(|_| Value::String(i.to_string())),
            ConstValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            ConstValue::Str(s) => Value::String(s),
        }
    }
}
