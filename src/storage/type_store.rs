use std::{
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{
    storage::{codec::StorageFormat, schema::Schema},
    types::error::{DatabaseError, Result},
};

/// Durable storage for whole-type state, one unit per type name.
///
/// The engine keeps nothing between operations: every call loads the full
/// schema, mutates it in memory and hands the complete result to `save`.
pub trait TypeStore {
    /// Whether state has been persisted for `type_name`.
    fn exists(&self, type_name: &str) -> Result<bool>;

    fn load(&self, type_name: &str) -> Result<Option<Schema>>;

    /// Replace everything stored for `type_name` with `schema`.
    fn save(&mut self, type_name: &str, schema: &Schema) -> Result<()>;
}

/// One file per type inside a data directory, named `<type>.<ext>`.
pub struct FileTypeStore {
    data_dir: PathBuf,
    format: StorageFormat,
}

impl FileTypeStore {
    pub fn new<P: AsRef<Path>>(data_dir: P, format: StorageFormat) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir, format })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn type_path(&self, type_name: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", type_name, self.format.extension()))
    }
}

impl TypeStore for FileTypeStore {
    fn exists(&self, type_name: &str) -> Result<bool> {
        Ok(self.type_path(type_name).try_exists()?)
    }

    fn load(&self, type_name: &str) -> Result<Option<Schema>> {
        let path = self.type_path(type_name);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), bytes = bytes.len(), "loaded type");
        self.format.decode(type_name, &bytes).map(Some)
    }

    fn save(&mut self, type_name: &str, schema: &Schema) -> Result<()> {
        let bytes = self.format.encode(schema)?;
        let path = self.type_path(type_name);

        // Write beside the target then rename over it, so readers only ever
        // see the old state or the new one.
        let mut staged = NamedTempFile::new_in(&self.data_dir)?;
        staged.write_all(&bytes)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&path)
            .map_err(|e| DatabaseError::Io(e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "saved type");
        Ok(())
    }
}

/// In-memory store. State lives as long as the store value.
#[derive(Debug, Default)]
pub struct MemoryTypeStore {
    types: HashMap<String, Schema>,
}

impl MemoryTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }
}

impl TypeStore for MemoryTypeStore {
    fn exists(&self, type_name: &str) -> Result<bool> {
        Ok(self.types.contains_key(type_name))
    }

    fn load(&self, type_name: &str) -> Result<Option<Schema>> {
        Ok(self.types.get(type_name).cloned())
    }

    fn save(&mut self, type_name: &str, schema: &Schema) -> Result<()> {
        self.types.insert(type_name.to_string(), schema.clone());
        Ok(())
    }
}
