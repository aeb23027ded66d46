use tracing::debug;

use crate::{
    executor::RecordEngine,
    storage::type_store::TypeStore,
    types::error::{DatabaseError, Result},
};

impl<S: TypeStore> RecordEngine<S> {
    /// Look up a record by primary key and render its values, space-joined in
    /// declaration order. Read-only: never writes to the store.
    pub fn search(&self, type_name: &str, key: &str) -> Result<String> {
        let schema = self.load_schema(type_name)?;
        let key_field = schema.primary_key_field()?;

        let record = schema
            .locate(key_field, key)
            .and_then(|slot| schema.record_at(slot))
            .ok_or_else(|| DatabaseError::NotFound {
                type_name: type_name.to_string(),
                key: key.to_string(),
            })?;

        debug!(type_name, key, "found record");
        Ok(schema.render(record))
    }
}
