use tracing::debug;

use crate::{
    executor::RecordEngine,
    storage::type_store::TypeStore,
    types::{
        PageNumber,
        error::{DatabaseError, Result},
        page::Page,
        record::Record,
    },
};

impl<S: TypeStore> RecordEngine<S> {
    /// Insert one record, values given in field declaration order.
    ///
    /// The primary-key value is checked against every stored record (full
    /// scan). The record goes on the last page if it has room, otherwise on a
    /// new page numbered with the current page count.
    pub fn insert(&mut self, type_name: &str, values: Vec<String>) -> Result<()> {
        let mut schema = self.load_schema(type_name)?;

        if values.len() != schema.field_count() {
            return Err(DatabaseError::ArityMismatch {
                type_name: type_name.to_string(),
                expected: schema.field_count(),
                actual: values.len(),
            });
        }

        let key_field = schema.primary_key_field()?.to_string();
        let key = &values[schema.primary_key_order];
        if schema.locate(&key_field, key).is_some() {
            return Err(DatabaseError::DuplicateKey {
                type_name: type_name.to_string(),
                key: key.clone(),
            });
        }

        let record = Record::from_fields(schema.field_names().collect::<Vec<_>>(), values);

        let needs_page = schema.pages.last().is_none_or(Page::is_full);
        if needs_page {
            let page_number = schema.pages.len() as PageNumber;
            schema.pages.push(Page::new(page_number));
        }
        let page = schema
            .pages
            .last_mut()
            .ok_or_else(|| DatabaseError::CorruptedSchema {
                type_name: type_name.to_string(),
                reason: "no page to insert into".to_string(),
            })?;
        page.push(record);
        let page_number = page.page_number;

        self.save_schema(&schema)?;

        debug!(type_name, page_number, "inserted record");
        Ok(())
    }
}
