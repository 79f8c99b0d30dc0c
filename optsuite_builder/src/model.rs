use thiserror::Error;

/// The type of an option's value.
///
/// Decided once, from the variant of the option's default [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// A toggle; `true` or `false`.
    Boolean,
    /// A signed integer (`i64`).
    Integer,
    /// A floating point number (`f64`).
    Float,
    /// Free text (`String`).
    Text,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::Text => write!(f, "text"),
        }
    }
}

/// A token could not be converted to the expected [`ValueType`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot convert '{token}' to {value_type}.")]
pub struct InvalidConversion {
    /// The raw token.
    pub token: String,
    /// The type it was converted towards.
    pub value_type: ValueType,
}

impl ValueType {
    /// Convert a raw token into a [`Value`] of this type.
    ///
    /// ### Example
    /// ```
    /// # use optsuite_builder as optsuite;
    /// use optsuite::{Value, ValueType};
    ///
    /// assert_eq!(ValueType::Integer.coerce("5").unwrap(), Value::Integer(5));
    /// assert_eq!(ValueType::Text.coerce("5").unwrap(), Value::from("5"));
    /// assert!(ValueType::Float.coerce("five").is_err());
    /// ```
    pub fn coerce(&self, token: &str) -> Result<Value, InvalidConversion> {
        let value = match self {
            ValueType::Boolean => token.parse().map(Value::Boolean).ok(),
            ValueType::Integer => token.parse().map(Value::Integer).ok(),
            ValueType::Float => token.parse().map(Value::Float).ok(),
            ValueType::Text => Some(Value::Text(token.to_string())),
        };

        value.ok_or_else(|| InvalidConversion {
            token: token.to_string(),
            value_type: *self,
        })
    }
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// See [`ValueType::Boolean`].
    Boolean(bool),
    /// See [`ValueType::Integer`].
    Integer(i64),
    /// See [`ValueType::Float`].
    Float(f64),
    /// See [`ValueType::Text`].
    Text(String),
}

impl Value {
    /// The [`ValueType`] of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::Text(_) => ValueType::Text,
        }
    }

    /// The inner `bool`, if this is a [`Value::Boolean`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The inner `i64`, if this is a [`Value::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The inner `f64`, if this is a [`Value::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The inner text, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}
