use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Ordered string-keyed map used for object values.
pub type Object = BTreeMap<String, Value>;

type NativeFn = dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync;

/// A host function that expressions may call.
///
/// Callables come from two places: the process-wide global environment (math functions) and
/// the per-request [`DataEnv`]. They must be deterministic; the sandbox never hands them
/// anything but already-evaluated argument values.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<NativeFn>,
}

impl Callable {
    /// Wrap a Rust closure as a callable value.
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    /// Name used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with already-evaluated arguments.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

/// Dynamic value produced and consumed by the expression sandbox.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// The "undefined" sentinel: unknown identifiers, missing members, null-safe access.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// IEEE-754 double, like every number in the template language.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list.
    Array(Vec<Value>),
    /// String-keyed map.
    Object(Object),
    /// Raw bytes (for example an uploaded image).
    Binary(Arc<[u8]>),
    /// Host function.
    Function(Callable),
}

impl Value {
    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Binary(_) => "binary",
            Self::Function(_) => "function",
        }
    }

    /// `true` for `undefined` and `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// JS truthiness: `undefined`, `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Binary(_) | Self::Function(_) => true,
        }
    }

    /// Borrow the number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Borrow the string, if this is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the callable, if this is one.
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Numeric coercion of primitives (`ToNumber`).
    ///
    /// Compound values have no implicit numeric form and produce an error.
    pub fn to_number(&self) -> Result<f64, String> {
        match self {
            Self::Undefined => Ok(f64::NAN),
            Self::Null => Ok(0.0),
            Self::Bool(b) => Ok(bool_to_number(*b)),
            Self::Number(n) => Ok(*n),
            Self::String(s) => Ok(parse_number_text(s)),
            other => Err(format!("cannot convert {} to number", other.type_name())),
        }
    }

    /// String coercion of primitives (`ToString`).
    pub fn to_display_string(&self) -> Result<String, String> {
        match self {
            Self::Undefined => Ok("undefined".to_owned()),
            Self::Null => Ok("null".to_owned()),
            Self::Bool(b) => Ok(b.to_string()),
            Self::Number(n) => Ok(format_number(*n)),
            Self::String(s) => Ok(s.clone()),
            other => Err(format!("cannot convert {} to string", other.type_name())),
        }
    }

    /// Abstract equality (`==`).
    pub fn loose_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Undefined | Self::Null, Self::Undefined | Self::Null) => true,
            (Self::Undefined | Self::Null, _) | (_, Self::Undefined | Self::Null) => false,
            (Self::Number(a), Self::String(b)) => *a == parse_number_text(b),
            (Self::String(a), Self::Number(b)) => parse_number_text(a) == *b,
            (Self::Bool(a), _) => Self::Number(bool_to_number(*a)).loose_eq(other),
            (_, Self::Bool(b)) => self.loose_eq(&Self::Number(bool_to_number(*b))),
            _ => self.strict_eq(other),
        }
    }

    /// Strict equality (`===`). Compound values compare structurally.
    pub fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => self == other,
        }
    }

    /// Non-computed member read (`value.name`).
    ///
    /// Objects yield the keyed entry, strings/arrays/binary expose `length`, and everything else
    /// yields `undefined`. Callers handle the nullish-object case themselves.
    pub fn member(&self, name: &str) -> Value {
        match (self, name) {
            (Self::Object(map), _) => map.get(name).cloned().unwrap_or_default(),
            (Self::Array(items), "length") => Self::Number(items.len() as f64),
            (Self::String(s), "length") => Self::Number(s.encode_utf16().count() as f64),
            (Self::Binary(bytes), "length") => Self::Number(bytes.len() as f64),
            _ => Self::Undefined,
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// `ToNumber` for string input: trimmed, empty is `0`, anything unparsable is `NaN`.
pub(crate) fn parse_number_text(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16)
            .map(|v| v as f64)
            .unwrap_or(f64::NAN);
    }
    // `f64::from_str` also accepts "inf"/"nan" spellings that JS does not.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Render a number the way templates expect to see it in text.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "Infinity" } else { "-Infinity" };
        s.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{n}")
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(map) => map.serialize(serializer),
            Self::Binary(bytes) => serializer.serialize_bytes(bytes),
            Self::Function(f) => Err(serde::ser::Error::custom(format!(
                "function `{}` cannot be serialized",
                f.name()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Self::Object(map)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(Arc::from(bytes))
    }
}

impl From<Callable> for Value {
    fn from(f: Callable) -> Self {
        Self::Function(f)
    }
}

/// Caller-supplied data environment for one render request.
///
/// Names in here shadow the global function environment. Function values become callable from
/// expressions for the duration of the request that supplied them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DataEnv {
    vars: BTreeMap<String, Value>,
}

impl DataEnv {
    /// Empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Builder-style insert of a host function under `name`.
    pub fn with_fn<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        let callable = Callable::new(name.clone(), func);
        self.with(name, callable)
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.vars.insert(name.into(), value.into())
    }

    /// Look up a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// `true` when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build from a JSON object.
    pub fn from_json(json: serde_json::Value) -> Result<Self, String> {
        match Value::from(json) {
            Value::Object(vars) => Ok(Self { vars }),
            other => Err(format!(
                "data environment must be a JSON object, got {}",
                other.type_name()
            )),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for DataEnv {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
