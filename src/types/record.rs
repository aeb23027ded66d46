use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// A stored record: field name to literal text value.
///
/// Values keep the exact token supplied at insert time. Nothing coerces them
/// to the declared field type, so `"01"` and `"1"` are different keys.
/// Entries stay in field declaration order, which is also the order they are
/// written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: Vec<(String, String)>,
}

impl Record {
    /// Zip field names with values positionally.
    pub fn from_fields<'a, I, V>(names: I, values: V) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = String>,
    {
        let mut record = Self::default();
        for (name, value) in names.into_iter().zip(values) {
            record.set(name.to_string(), value);
        }
        record
    }

    /// Replace the value of `field`, or append it after the existing fields.
    fn set(&mut self, field: String, value: String) {
        match self.values.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Space-joined values in the given field order. Missing fields render empty.
    pub fn render<'a, I>(&self, field_order: I) -> String
    where
        I: IntoIterator<Item = &'a str>,
    {
        field_order
            .into_iter()
            .map(|name| self.get(name).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of field names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record {
            values: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((name, value)) = access.next_entry::<String, String>()? {
            record.set(name, value);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}
