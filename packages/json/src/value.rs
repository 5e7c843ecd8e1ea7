//! The JSON value tree.
//!
//! Every node owns its children outright; dropping the root releases the
//! whole tree, and dropping an `Option<Value>` that is `None` does nothing.

use crate::error::{JsonError, JsonResult};
use crate::number::Number;
use crate::serializer::Serializer;
use std::fmt;

/// One node of a JSON tree.
///
/// Object members keep insertion order and may repeat a key; lookups return
/// the first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Vec<(String, Value)>),
}

/// The kind of a [`Value`]; booleans split into `False` and `True`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    False,
    True,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::False => "false",
            Kind::True => "true",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn null() -> Self {
        Value::Null
    }

    pub fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    pub fn number(value: impl Into<Number>) -> Self {
        Value::Number(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    /// Copy `value` into a new string node, reporting allocation failure
    /// instead of aborting.
    pub fn try_string(value: &str) -> JsonResult<Self> {
        Ok(Value::String(try_copy(value)?))
    }

    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    pub fn object() -> Self {
        Value::Object(Vec::new())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(false) => Kind::False,
            Value::Bool(true) => Kind::True,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Append `value` as the last member of this object under a copy of
    /// `key`.
    ///
    /// Existing members with the same key are left alone. Returns the
    /// inserted value.
    pub fn add_member(&mut self, key: &str, value: Value) -> JsonResult<&mut Value> {
        let found = self.kind();
        let Value::Object(members) = self else {
            return Err(JsonError::invalid_argument("add_member", Kind::Object, found));
        };
        let key = try_copy(key)?;
        members.try_reserve(1)?;
        let index = members.len();
        members.push((key, value));
        Ok(&mut members[index].1)
    }

    /// Append `value` as the last element of this array.
    pub fn append(&mut self, value: Value) -> JsonResult<&mut Value> {
        let found = self.kind();
        let Value::Array(elements) = self else {
            return Err(JsonError::invalid_argument("append", Kind::Array, found));
        };
        elements.try_reserve(1)?;
        let index = elements.len();
        elements.push(value);
        Ok(&mut elements[index])
    }

    pub fn add_string(&mut self, key: &str, value: &str) -> JsonResult<&mut Value> {
        let value = Value::try_string(value)?;
        self.add_member(key, value)
    }

    pub fn add_number(&mut self, key: &str, value: impl Into<Number>) -> JsonResult<&mut Value> {
        self.add_member(key, Value::number(value))
    }

    pub fn add_bool(&mut self, key: &str, value: bool) -> JsonResult<&mut Value> {
        self.add_member(key, Value::Bool(value))
    }

    pub fn add_null(&mut self, key: &str) -> JsonResult<&mut Value> {
        self.add_member(key, Value::Null)
    }

    /// First member named `key`, compared byte for byte.
    ///
    /// Returns `None` for non-objects and missing keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(members) => members
                .iter_mut()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Walk a dot-separated path such as `data.items.0.url`.
    ///
    /// Segments address object members by key and array elements by index.
    /// An empty path returns `self`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |current, segment| match current {
            Value::Object(_) => current.get(segment),
            Value::Array(elements) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| elements.get(index)),
            _ => None,
        })
    }

    /// Detach and return the first member named `key`.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let Value::Object(members) = self else {
            return None;
        };
        let index = members.iter().position(|(k, _)| k == key)?;
        Some(members.remove(index).1)
    }

    /// Children of an array or object in order; empty for scalars.
    pub fn children(&self) -> impl Iterator<Item = &Value> + '_ {
        let (elements, members): (&[Value], &[(String, Value)]) = match self {
            Value::Array(elements) => (elements.as_slice(), &[]),
            Value::Object(members) => (&[], members.as_slice()),
            _ => (&[], &[]),
        };
        elements.iter().chain(members.iter().map(|(_, v)| v))
    }

    /// Key/value pairs of an object in insertion order; empty otherwise.
    pub fn members(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        let members: &[(String, Value)] = match self {
            Value::Object(members) => members.as_slice(),
            _ => &[],
        };
        members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of children; zero for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Array(elements) => elements.len(),
            Value::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    /// Exact integer view of a number.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements) => Some(elements.as_slice()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Object(members) => Some(members.as_slice()),
            _ => None,
        }
    }

    /// Loose integer reading kept for older callers: numbers truncate,
    /// `true` reads as 1, everything else as 0.
    pub fn coerce_i64(&self) -> i64 {
        match self {
            Value::Number(n) => n.truncated(),
            Value::Bool(true) => 1,
            _ => 0,
        }
    }
}

fn try_copy(text: &str) -> JsonResult<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

/// Compact JSON text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = Serializer::compact().serialize(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::Array(elements)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
