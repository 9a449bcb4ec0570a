//! Ordered VDF value tree.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A single VDF value: a scalar or a nested map.
#[derive(Debug, Clone, PartialEq)]
pub enum VdfValue {
    Map(VdfMap),
    String(String),
    Int32(i32),
    Float32(f32),
    UInt64(u64),
    Int64(i64),
}

impl VdfValue {
    pub fn as_map(&self) -> Option<&VdfMap> {
        match self {
            VdfValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut VdfMap> {
        match self {
            VdfValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            VdfValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, VdfValue::Map(_))
    }
}

/// Scalars render as their text form. Maps render as `{...}` with the entry
/// count, since they have no scalar form.
impl fmt::Display for VdfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VdfValue::Map(map) => write!(f, "{{{} entries}}", map.len()),
            VdfValue::String(s) => f.write_str(s),
            VdfValue::Int32(v) => write!(f, "{}", v),
            VdfValue::Float32(v) => write!(f, "{}", v),
            VdfValue::UInt64(v) => write!(f, "{}", v),
            VdfValue::Int64(v) => write!(f, "{}", v),
        }
    }
}

impl From<VdfMap> for VdfValue {
    fn from(map: VdfMap) -> Self {
        VdfValue::Map(map)
    }
}

impl From<String> for VdfValue {
    fn from(s: String) -> Self {
        VdfValue::String(s)
    }
}

impl From<&str> for VdfValue {
    fn from(s: &str) -> Self {
        VdfValue::String(s.to_string())
    }
}

impl From<i32> for VdfValue {
    fn from(v: i32) -> Self {
        VdfValue::Int32(v)
    }
}

impl Serialize for VdfValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            VdfValue::Map(map) => map.serialize(serializer),
            VdfValue::String(s) => serializer.serialize_str(s),
            VdfValue::Int32(v) => serializer.serialize_i32(*v),
            VdfValue::Float32(v) => serializer.serialize_f32(*v),
            VdfValue::UInt64(v) => serializer.serialize_u64(*v),
            VdfValue::Int64(v) => serializer.serialize_i64(*v),
        }
    }
}

/// Ordered multimap of VDF entries.
///
/// Insertion order is preserved on write and duplicate keys are allowed,
/// since text VDF files in the wild contain them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VdfMap {
    entries: Vec<(String, VdfValue)>,
}

impl VdfMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&VdfValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut VdfValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn get_map(&self, key: &str) -> Option<&VdfMap> {
        self.get(key).and_then(VdfValue::as_map)
    }

    pub fn get_map_mut(&mut self, key: &str) -> Option<&mut VdfMap> {
        self.get_mut(key).and_then(VdfValue::as_map_mut)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Set `key` to `value`, replacing the first existing entry in place.
    /// Appends when the key is not present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append an entry without touching existing entries for the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<VdfValue>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Remove every entry stored under `key`, returning how many were removed.
    pub fn remove_all(&mut self, key: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| k != key);
        before - self.entries.len()
    }

    /// Nested map under `key`, created (appended) if absent.
    ///
    /// A scalar stored under `key` is replaced by an empty map.
    pub fn entry_map(&mut self, key: &str) -> &mut VdfMap {
        let position = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => {
                if !self.entries[index].1.is_map() {
                    self.entries[index].1 = VdfValue::Map(VdfMap::new());
                }
                index
            }
            None => {
                self.entries.push((key.to_string(), VdfValue::Map(VdfMap::new())));
                self.entries.len() - 1
            }
        };
        match &mut self.entries[position].1 {
            VdfValue::Map(map) => map,
            _ => unreachable!("entry was just set to a map"),
        }
    }

    /// Walk (and create) a chain of nested maps.
    pub fn entry_path(&mut self, path: &[&str]) -> &mut VdfMap {
        path.iter().fold(self, |map, key| map.entry_map(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VdfValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl FromIterator<(String, VdfValue)> for VdfMap {
    fn from_iter<I: IntoIterator<Item = (String, VdfValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for VdfMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
