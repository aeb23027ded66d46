pub mod create_type;
pub mod delete;
pub mod insert;
pub mod search;

use tracing::debug;

use crate::{
    storage::{schema::Schema, type_store::TypeStore},
    types::error::{DatabaseError, Result},
};

/// Drives create-type, insert, delete and search against a [`TypeStore`].
///
/// Owns no state besides the store handle. Each operation is one
/// load / validate-and-mutate / save cycle; a rejected operation never
/// reaches the save step, so persisted state is untouched on failure.
pub struct RecordEngine<S: TypeStore> {
    store: S,
}

impl<S: TypeStore> RecordEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the full state of `type_name`, failing if it was never created.
    /// A name that could never have been created is unknown without asking
    /// the store.
    pub fn load_schema(&self, type_name: &str) -> Result<Schema> {
        if create_type::check_type_name(type_name).is_err() {
            return Err(DatabaseError::UnknownType {
                name: type_name.to_string(),
            });
        }
        let schema = self
            .store
            .load(type_name)?
            .ok_or_else(|| DatabaseError::UnknownType {
                name: type_name.to_string(),
            })?;
        debug!(
            type_name,
            pages = schema.pages.len(),
            records = schema.record_count(),
            "loaded schema"
        );
        Ok(schema)
    }

    fn save_schema(&mut self, schema: &Schema) -> Result<()> {
        self.store.save(&schema.type_name, schema)
    }
}
