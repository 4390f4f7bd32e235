//! Named log fields
//!
//! A [`Field`] is a name plus a value already rendered to text. The value is
//! encoded once, when the field is built, so formatting a record only has to
//! concatenate strings.
//!
//! Strings and errors are flagged as quoted and are wrapped in `"` in the JSON
//! form. Booleans and signed integers are emitted bare. Anything else becomes a
//! visible placeholder instead of failing:
//!
//! ```
//! use fieldlog::{Field, FieldValue};
//!
//! assert_eq!(Field::new("int", 40000).to_string(), "int=40000");
//! assert_eq!(Field::new("string", "value1").to_json(), "\"string\":\"value1\"");
//! assert_eq!(
//!     Field::new("ratio", FieldValue::unsupported::<f64>()).to_string(),
//!     "ratio=<[Unknown Type f64]>"
//! );
//! ```

use std::any::{type_name, Any};
use std::borrow::Cow;
use std::fmt;

/// Typed input accepted by [`Field::new`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
    /// Human readable message of an error
    Error(String),
    /// Name of a type with no rendering; emitted as a placeholder
    Unsupported(&'static str),
}

impl FieldValue {
    /// Catch-all value for a type that has no rendering
    pub fn unsupported<T: ?Sized>() -> Self {
        FieldValue::Unsupported(type_name::<T>())
    }

    /// Error value carrying `err`'s `Display` output
    pub fn error<E: fmt::Display + ?Sized>(err: &E) -> Self {
        FieldValue::Error(err.to_string())
    }

    fn encode(self) -> (String, bool) {
        match self {
            FieldValue::Bool(b) => (if b { "true" } else { "false" }.to_string(), false),
            FieldValue::Int(i) => (i.to_string(), false),
            FieldValue::Text(s) => (s, true),
            FieldValue::Error(s) => (s, true),
            FieldValue::Unsupported(name) => (format!("<[Unknown Type {}]>", name), false),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(i: $t) -> Self {
                    FieldValue::Int(i as i64)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<Cow<'_, str>> for FieldValue {
    fn from(s: Cow<'_, str>) -> Self {
        FieldValue::Text(s.into_owned())
    }
}

/// A name/value pair ready to be formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: String,
    quoted: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let (value, quoted) = value.into().encode();
        Self {
            name: name.into(),
            value,
            quoted,
        }
    }

    /// Field named `error` holding the error's message
    pub fn error<E: fmt::Display + ?Sized>(err: &E) -> Self {
        Self::new("error", FieldValue::error(err))
    }

    /// Build a field from a value whose type is only known at runtime.
    ///
    /// Booleans, signed integers and strings are recognised; every other type
    /// renders as `<[Unknown Type name]>`.
    pub fn from_any<T: Any>(name: impl Into<String>, value: &T) -> Self {
        let any = value as &dyn Any;
        let value = if let Some(b) = any.downcast_ref::<bool>() {
            FieldValue::Bool(*b)
        } else if let Some(i) = any.downcast_ref::<i8>() {
            FieldValue::from(*i)
        } else if let Some(i) = any.downcast_ref::<i16>() {
            FieldValue::from(*i)
        } else if let Some(i) = any.downcast_ref::<i32>() {
            FieldValue::from(*i)
        } else if let Some(i) = any.downcast_ref::<i64>() {
            FieldValue::from(*i)
        } else if let Some(i) = any.downcast_ref::<isize>() {
            FieldValue::from(*i)
        } else if let Some(s) = any.downcast_ref::<String>() {
            FieldValue::from(s)
        } else if let Some(s) = any.downcast_ref::<&'static str>() {
            FieldValue::from(*s)
        } else {
            FieldValue::unsupported::<T>()
        };
        Self::new(name, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The encoded value, without quotes
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// `"name":value`, quoting the value for strings and errors.
    ///
    /// Neither the name nor the value is escaped.
    pub fn to_json(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + self.value.len() + 5);
        self.write_json(&mut out);
        out
    }

    pub(crate) fn write_text(&self, out: &mut String) {
        out.push_str(&self.name);
        out.push('=');
        out.push_str(&self.value);
    }

    pub(crate) fn write_json(&self, out: &mut String) {
        out.push('"');
        out.push_str(&self.name);
        out.push_str("\":");
        if self.quoted {
            out.push('"');
            out.push_str(&self.value);
            out.push('"');
        } else {
            out.push_str(&self.value);
        }
    }
}

/// `name=value`; quoting only applies to the JSON form
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}
