use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::foundation::value::{Object, Value, format_number};
use crate::scene::props::{Easing, ImageSource, TransitionProp, TransitionValues};

/// A component field: either a concrete value or an expression evaluated at resolve time.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute<T> {
    /// Value known at compile time.
    Literal(T),
    /// Expression source text, evaluated against request data.
    Dynamic(String),
}

impl<T> Attribute<T> {
    /// Build a dynamic attribute from expression source.
    pub fn dynamic(src: impl Into<String>) -> Self {
        Self::Dynamic(src.into())
    }

    /// The literal value, if this is not dynamic.
    pub fn as_literal(&self) -> Option<&T> {
        match self {
            Self::Literal(v) => Some(v),
            Self::Dynamic(_) => None,
        }
    }

    /// The expression source, if this is dynamic.
    pub fn as_dynamic(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Dynamic(src) => Some(src),
        }
    }

    /// `true` for [`Attribute::Dynamic`].
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

impl<T: FromValue> Attribute<T> {
    /// Type an untyped attribute. Dynamic sources pass through unchanged.
    pub fn typed(raw: Attribute<Value>) -> Result<Self, String> {
        match raw {
            Attribute::Literal(v) => T::from_value(v).map(Self::Literal),
            Attribute::Dynamic(src) => Ok(Self::Dynamic(src)),
        }
    }
}

impl<T> From<T> for Attribute<T> {
    fn from(v: T) -> Self {
        Self::Literal(v)
    }
}

// Dynamic attributes use the `{"$": source}` wire shape.
impl<T: Serialize> Serialize for Attribute<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Literal(v) => v.serialize(serializer),
            Self::Dynamic(src) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("$", src)?;
                map.end()
            }
        }
    }
}

/// Conversion from a dynamic [`Value`] into a typed field value.
pub trait FromValue: Sized {
    /// Human-readable type name used in error messages.
    const EXPECTED: &'static str;

    /// Convert, or describe why the value does not fit.
    fn from_value(value: Value) -> Result<Self, String>;
}

fn mismatch<T: FromValue>(value: &Value) -> String {
    format!("expected {}, got {}", T::EXPECTED, value.type_name())
}

impl FromValue for Value {
    const EXPECTED: &'static str = "any value";

    fn from_value(value: Value) -> Result<Self, String> {
        Ok(value)
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(format_number(n)),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Object {
    const EXPECTED: &'static str = "object";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for ImageSource {
    const EXPECTED: &'static str = "image url or binary";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(url) => Ok(Self::Url(url)),
            Value::Binary(bytes) => Ok(Self::Binary(bytes)),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for Easing {
    const EXPECTED: &'static str = "easing name";

    fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::String(name) => {
                Self::from_name(&name).ok_or_else(|| format!("unknown easing `{name}`"))
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromValue for TransitionValues {
    const EXPECTED: &'static str = "map of transition properties to numbers";

    fn from_value(value: Value) -> Result<Self, String> {
        let Value::Object(map) = value else {
            return Err(mismatch::<Self>(&value));
        };
        map.into_iter()
            .map(|(key, v)| {
                let prop = TransitionProp::from_name(&key)
                    .ok_or_else(|| format!("`{key}` is not a transitionable property"))?;
                let n = f64::from_value(v).map_err(|e| format!("{key}: {e}"))?;
                Ok((prop, n))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/attribute.rs"]
mod tests;
