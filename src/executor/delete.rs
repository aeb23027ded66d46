use tracing::debug;

use crate::{
    executor::RecordEngine,
    storage::type_store::TypeStore,
    types::error::{DatabaseError, Result},
};

impl<S: TypeStore> RecordEngine<S> {
    /// Remove the record whose primary key equals `key`.
    ///
    /// Only the first match in page order is removed; key uniqueness is
    /// enforced at insert, so there is at most one. A page left empty is
    /// dropped from the sequence and the remaining pages keep their numbers.
    pub fn delete(&mut self, type_name: &str, key: &str) -> Result<()> {
        let mut schema = self.load_schema(type_name)?;
        let key_field = schema.primary_key_field()?.to_string();

        let (page_idx, slot) =
            schema
                .locate(&key_field, key)
                .ok_or_else(|| DatabaseError::NotFound {
                    type_name: type_name.to_string(),
                    key: key.to_string(),
                })?;

        let page = &mut schema.pages[page_idx];
        page.remove(slot);
        let page_number = page.page_number;
        let page_dropped = page.is_empty();
        if page_dropped {
            schema.pages.remove(page_idx);
        }

        self.save_schema(&schema)?;

        debug!(type_name, key, page_number, page_dropped, "deleted record");
        Ok(())
    }
}
