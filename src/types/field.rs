use serde::{Deserialize, Serialize};

/// A declared (name, type) pair of a schema.
///
/// The declared type is descriptive only: record values are stored and
/// compared as their literal text and are never checked against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: String,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
        }
    }

    /// Pair up a flat `name, type, name, type, ...` token list.
    /// Returns `None` when a name has no type token after it.
    pub fn from_flat<S: AsRef<str>>(tokens: &[S]) -> Option<Vec<FieldDef>> {
        if tokens.len() % 2 != 0 {
            return None;
        }
        Some(
            tokens
                .chunks_exact(2)
                .map(|pair| FieldDef::new(pair[0].as_ref(), pair[1].as_ref()))
                .collect(),
        )
    }
}
