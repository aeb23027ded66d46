use std::{fmt, str::FromStr};

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::{
    storage::{ARCHIVIST_HEADER_SIZE, ARCHIVIST_MAGIC, schema::Schema},
    types::error::{DatabaseError, Result},
};

/*
 * Binary layout of a type file
 * ┌──────────────────────────────────────────────────┐
 * │ magic(8) "ARCHVST1"                              │
 * │ crc32(4, LE) of payload                          │
 * ├──────────────────────────────────────────────────┤
 * │ payload: bincode (standard config) of Schema     │
 * └──────────────────────────────────────────────────┘
 *
 * The JSON format is the plain Schema object with no framing.
 */
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageFormat {
    #[default]
    Json,
    Binary,
}

impl StorageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            StorageFormat::Json => "json",
            StorageFormat::Binary => "arc",
        }
    }

    pub fn encode(&self, schema: &Schema) -> Result<Vec<u8>> {
        match self {
            StorageFormat::Json => {
                serde_json::to_vec(schema).map_err(|e| DatabaseError::SerializationError {
                    details: e.to_string(),
                })
            }
            StorageFormat::Binary => {
                let payload = bincode::serde::encode_to_vec(schema, bincode::config::standard())
                    .map_err(|e| DatabaseError::SerializationError {
                        details: e.to_string(),
                    })?;
                let mut buffer = Vec::with_capacity(ARCHIVIST_HEADER_SIZE + payload.len());
                buffer.extend_from_slice(ARCHIVIST_MAGIC);
                buffer.extend_from_slice(&payload_checksum(&payload).to_le_bytes());
                buffer.extend_from_slice(&payload);
                Ok(buffer)
            }
        }
    }

    /// Decode the stored bytes of `type_name` and check the result is well formed.
    pub fn decode(&self, type_name: &str, bytes: &[u8]) -> Result<Schema> {
        let schema: Schema = match self {
            StorageFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| DatabaseError::CorruptedSchema {
                    type_name: type_name.to_string(),
                    reason: e.to_string(),
                })?
            }
            StorageFormat::Binary => {
                if bytes.len() < ARCHIVIST_HEADER_SIZE || &bytes[..8] != ARCHIVIST_MAGIC {
                    return Err(DatabaseError::CorruptedSchema {
                        type_name: type_name.to_string(),
                        reason: "missing or invalid magic".to_string(),
                    });
                }
                let expected = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
                let payload = &bytes[ARCHIVIST_HEADER_SIZE..];
                let actual = payload_checksum(payload);
                if expected != actual {
                    return Err(DatabaseError::ChecksumMismatch {
                        type_name: type_name.to_string(),
                        expected,
                        actual,
                    });
                }
                let (schema, _) =
                    bincode::serde::decode_from_slice(payload, bincode::config::standard())
                        .map_err(|e| DatabaseError::CorruptedSchema {
                            type_name: type_name.to_string(),
                            reason: e.to_string(),
                        })?;
                schema
            }
        };

        if schema.type_name != type_name {
            return Err(DatabaseError::CorruptedSchema {
                type_name: type_name.to_string(),
                reason: format!("file holds type '{}'", schema.type_name),
            });
        }
        schema.validate()?;
        Ok(schema)
    }
}

fn payload_checksum(payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageFormat::Json => write!(f, "json"),
            StorageFormat::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for StorageFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(StorageFormat::Json),
            "binary" | "bin" => Ok(StorageFormat::Binary),
            other => Err(format!("unknown storage format '{}'", other)),
        }
    }
}
