//! Parameter values and the per-node parameter map.

use mcad_ir::Rgba;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single parameter value.
///
/// Parameters are free-form: dimensions and counts are numbers, styles are
/// strings, colors and drill tables are (nested) lists. Serialized without a
/// tag, so parameter files read as plain JSON scalars and arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Numeric value (all numbers are f64, conventionally millimeters).
    Num(f64),
    /// String value (styles, material names).
    Str(String),
    /// List of values, possibly nested.
    List(Vec<Value>),
}

impl Value {
    /// The value as a boolean, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a number, if it is one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a list, if it is one.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// The value as an RGBA color.
    ///
    /// Accepts a list of three (opaque) or four numeric components.
    pub fn as_rgba(&self) -> Option<Rgba> {
        let list = self.as_list()?;
        let mut c = [0.0; 4];
        c[3] = 1.0;
        if list.len() != 3 && list.len() != 4 {
            return None;
        }
        for (slot, v) in c.iter_mut().zip(list) {
            *slot = v.as_f64()?;
        }
        Some(Rgba::rgba(c[0], c[1], c[2], c[3]))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Num(v as f64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Num(v as f64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Num(v as f64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::List(v.iter().cloned().map(Into::into).collect())
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::List(vec![
            Value::Num(c.r),
            Value::Num(c.g),
            Value::Num(c.b),
            Value::Num(c.a),
        ])
    }
}

/// An ordered map of parameter key to [`Value`].
///
/// Ordered so that serialized parameter files and BOM rows are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, Value>);

impl ParamMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the map has an entry for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Fill in `defaults` for keys not already present.
    ///
    /// Existing entries always win; this is how caller-supplied data
    /// overrides a part kind's built-in defaults.
    pub fn merge_defaults(&mut self, defaults: ParamMap) {
        for (k, v) in defaults.0 {
            self.0.entry(k).or_insert(v);
        }
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_roundtrip() {
        let mut map = ParamMap::new();
        map.insert("length", 300.0);
        map.insert("style", "socket_head");
        map.insert("show_thread", false);
        map.insert("drills", vec![vec![10.0, 10.0, 5.0], vec![-10.0, -10.0, 5.0]]);

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains(r#""length":300.0"#));
        assert!(json.contains(r#""style":"socket_head""#));

        let restored: ParamMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }

    #[test]
    fn accessors() {
        let v = Value::from(12.5);
        assert_eq!(v.as_f64(), Some(12.5));
        assert_eq!(v.as_str(), None);

        let v = Value::from("bk");
        assert_eq!(v.as_str(), Some("bk"));
        assert_eq!(v.as_f64(), None);

        let v = Value::from([0.77, 0.77, 0.8]);
        let c = v.as_rgba().unwrap();
        assert_eq!(c.a, 1.0);
        assert!((c.b - 0.8).abs() < 1e-12);

        let v = Value::from([1.0, 1.0, 0.0, 0.3]);
        assert!((v.as_rgba().unwrap().a - 0.3).abs() < 1e-12);

        assert_eq!(Value::from([1.0, 2.0]).as_rgba(), None);
    }

    #[test]
    fn defaults_do_not_override() {
        let mut map = ParamMap::new().with("length", 500.0);
        map.merge_defaults(ParamMap::new().with("length", 300.0).with("style", "bk"));
        assert_eq!(map.get("length").unwrap().as_f64(), Some(500.0));
        assert_eq!(map.get("style").unwrap().as_str(), Some("bk"));
    }
}
