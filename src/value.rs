//! Dynamic sample values.
//!
//! `Sample` is the runtime-typed value the inference engine walks and the
//! synthesizer produces. It is a superset of JSON: it also carries callables,
//! opaque symbols, an `Undefined` marker and an optional class tag on objects.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Sample {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Sample>),
    Object(Object),
    Function(Callable),
    Symbol(Symbol),
}

/// A keyed composite: own keys in insertion order plus the runtime class tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    pub class: Option<String>,
    pub fields: IndexMap<String, Sample>,
}

/// Shared callable. Two callables are equal only if they are the same closure.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn(&[Sample]) -> Sample + Send + Sync>);

/// Opaque symbolic token, compared by its text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(Arc<str>);

// ------------------------------- Object ---------------------------------- //

impl Object {
    pub fn new() -> Self { Self::default() }

    pub fn with_class(class: impl Into<String>) -> Self {
        Self { class: Some(class.into()), fields: IndexMap::new() }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Sample) -> &mut Self {
        self.fields.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Sample> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

// ------------------------------ Callable --------------------------------- //

impl Callable {
    pub fn new(f: impl Fn(&[Sample]) -> Sample + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Sample]) -> Sample {
        (self.0)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(<fn>)")
    }
}

// ------------------------------- Symbol ---------------------------------- //

impl Symbol {
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(Arc::from(token.as_ref()))
    }

    pub fn token(&self) -> &str { &self.0 }
}

// ------------------------------- Sample ---------------------------------- //

impl Sample {
    /// Human-readable kind, used in strict-mode errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Sample::Undefined => "undefined",
            Sample::Null => "null",
            Sample::Bool(_) => "boolean",
            Sample::Number(_) => "number",
            Sample::String(_) => "string",
            Sample::Array(_) => "array",
            Sample::Object(_) => "object",
            Sample::Function(_) => "function",
            Sample::Symbol(_) => "symbol",
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Sample::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Sample]> {
        match self {
            Sample::Array(xs) => Some(xs),
            _ => None,
        }
    }

    /// Lossy conversion back to JSON: callables and `Undefined` become `null`,
    /// symbols become their token, non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Sample::Undefined | Sample::Null | Sample::Function(_) => Value::Null,
            Sample::Bool(b) => Value::Bool(*b),
            Sample::Number(n) => number_to_json(*n),
            Sample::String(s) => Value::String(s.clone()),
            Sample::Symbol(s) => Value::String(s.token().to_string()),
            Sample::Array(xs) => Value::Array(xs.iter().map(Sample::to_json).collect()),
            Sample::Object(o) => Value::Object(
                o.fields.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
            ),
        }
    }
}

// prefer emitting integers when exact
fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<Value> for Sample {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Sample::Null,
            Value::Bool(b) => Sample::Bool(b),
            Value::Number(n) => Sample::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Sample::String(s),
            Value::Array(xs) => Sample::Array(xs.into_iter().map(Sample::from).collect()),
            Value::Object(m) => Sample::Object(Object {
                class: None,
                fields: m.into_iter().map(|(k, v)| (k, Sample::from(v))).collect(),
            }),
        }
    }
}

impl From<&Value> for Sample {
    fn from(v: &Value) -> Self {
        Sample::from(v.clone())
    }
}

impl From<Object> for Sample {
    fn from(o: Object) -> Self { Sample::Object(o) }
}
