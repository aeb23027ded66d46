use serde::{Deserialize, Serialize};

use crate::types::{
    error::{DatabaseError, Result},
    field::FieldDef,
    page::Page,
    record::Record,
};

/// Persisted state of one type: its definition plus every page of records.
///
/// Field definitions are kept flat (`name, type, name, type, ...`) because
/// that is the on-disk shape; the accessors below pair them back up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub type_name: String,
    /// As declared by the creator. Informational only.
    pub num_fields: i64,
    /// Zero-based index of the primary-key field.
    pub primary_key_order: usize,
    pub fields: Vec<String>,
    pub pages: Vec<Page>,
}

/// Location of a record: (index into `pages`, index into that page's records).
pub type Slot = (usize, usize);

impl Schema {
    pub fn new(
        type_name: String,
        num_fields: i64,
        primary_key_order: usize,
        fields: &[FieldDef],
    ) -> Self {
        let fields = fields
            .iter()
            .flat_map(|f| [f.name.clone(), f.field_type.clone()])
            .collect();
        Self {
            type_name,
            num_fields,
            primary_key_order,
            fields,
            pages: Vec::new(),
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().step_by(2).map(String::as_str)
    }

    /// Declared field types in declaration order.
    pub fn field_types(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().skip(1).step_by(2).map(String::as_str)
    }

    pub fn field_defs(&self) -> Vec<FieldDef> {
        self.field_names()
            .zip(self.field_types())
            .map(|(name, ty)| FieldDef::new(name, ty))
            .collect()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len() / 2
    }

    pub fn primary_key_field(&self) -> Result<&str> {
        self.field_names()
            .nth(self.primary_key_order)
            .ok_or_else(|| DatabaseError::CorruptedSchema {
                type_name: self.type_name.clone(),
                reason: format!(
                    "primary key order {} is outside {} fields",
                    self.primary_key_order,
                    self.field_count()
                ),
            })
    }

    /// Check the structural invariants of a schema read back from storage.
    pub fn validate(&self) -> Result<()> {
        if self.fields.len() % 2 != 0 {
            return Err(DatabaseError::CorruptedSchema {
                type_name: self.type_name.clone(),
                reason: "field list has a name without a type".to_string(),
            });
        }
        self.primary_key_field()?;
        Ok(())
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.pages.iter().flat_map(|page| page.records.iter())
    }

    pub fn record_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// First record, in page then slot order, whose `field` equals `key`.
    pub fn locate(&self, field: &str, key: &str) -> Option<Slot> {
        self.pages.iter().enumerate().find_map(|(page_idx, page)| {
            page.records
                .iter()
                .position(|record| record.get(field) == Some(key))
                .map(|slot| (page_idx, slot))
        })
    }

    pub fn record_at(&self, (page_idx, slot): Slot) -> Option<&Record> {
        self.pages.get(page_idx)?.records.get(slot)
    }

    /// Render a record as its values in declaration order.
    pub fn render(&self, record: &Record) -> String {
        record.render(self.field_names())
    }
}
