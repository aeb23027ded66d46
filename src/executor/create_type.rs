use std::collections::HashSet;

use tracing::debug;

use crate::{
    executor::RecordEngine,
    storage::{schema::Schema, type_store::TypeStore},
    types::{
        MAX_FIELD_NAME_LENGTH, MAX_FIELDS, MAX_TYPE_NAME_LENGTH,
        error::{DatabaseError, Result},
        field::FieldDef,
    },
};

/// Type names double as storage names, so they must be usable as a file stem
/// and within the length limit before anything touches the store.
pub(crate) fn check_type_name(type_name: &str) -> Result<()> {
    let unusable = type_name.is_empty()
        || type_name == "."
        || type_name == ".."
        || type_name.contains(['/', '\\', '\0']);
    if unusable {
        return Err(DatabaseError::InvalidTypeName {
            name: type_name.to_string(),
        });
    }
    if type_name.chars().count() > MAX_TYPE_NAME_LENGTH {
        return Err(DatabaseError::NameTooLong {
            name: type_name.to_string(),
            max: MAX_TYPE_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Check field limits and primary-key designation of a new type definition.
fn validate_fields(primary_key_ordinal: usize, fields: &[FieldDef]) -> Result<()> {
    if fields.len() > MAX_FIELDS {
        return Err(DatabaseError::TooManyFields {
            count: fields.len(),
            max: MAX_FIELDS,
        });
    }

    if let Some(field) = fields
        .iter()
        .find(|f| f.name.chars().count() > MAX_FIELD_NAME_LENGTH)
    {
        return Err(DatabaseError::FieldNameTooLong {
            name: field.name.clone(),
            max: MAX_FIELD_NAME_LENGTH,
        });
    }

    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(DatabaseError::DuplicateFieldName {
                name: field.name.clone(),
            });
        }
    }

    if primary_key_ordinal == 0 || primary_key_ordinal > fields.len() {
        return Err(DatabaseError::InvalidPrimaryKey {
            ordinal: primary_key_ordinal,
            field_count: fields.len(),
        });
    }

    Ok(())
}

impl<S: TypeStore> RecordEngine<S> {
    /// Define and persist a new type with an empty page sequence.
    ///
    /// `primary_key_ordinal` is 1-based; it is stored 0-based. Once created a
    /// type is never altered or dropped.
    pub fn create_type(
        &mut self,
        type_name: &str,
        declared_field_count: i64,
        primary_key_ordinal: usize,
        fields: &[FieldDef],
    ) -> Result<()> {
        check_type_name(type_name)?;
        if self.store.exists(type_name)? {
            return Err(DatabaseError::AlreadyExists {
                name: type_name.to_string(),
            });
        }
        validate_fields(primary_key_ordinal, fields)?;

        let schema = Schema::new(
            type_name.to_string(),
            declared_field_count,
            primary_key_ordinal - 1,
            fields,
        );
        self.save_schema(&schema)?;

        debug!(type_name, fields = fields.len(), primary_key_ordinal, "created type");
        Ok(())
    }
}
