use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{
    config::Config,
    executor::RecordEngine,
    storage::{codec::StorageFormat, type_store::FileTypeStore},
    types::{error::Result, field::FieldDef},
};

/// A data directory that is removed when dropped.
pub struct TempDatabase {
    pub dir: TempDir,
    pub format: StorageFormat,
}

impl TempDatabase {
    pub fn new() -> Self {
        Self::with_format(StorageFormat::Json)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir()
            .expect("Failed to create temp directory");
        Self {
            dir,
            format: StorageFormat::Json,
        }
    }

    pub fn with_format(format: StorageFormat) -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn config(&self) -> Config {
        Config::in_dir(self.dir.path()).with_format(self.format)
    }

    pub fn store(&self) -> Result<FileTypeStore> {
        FileTypeStore::new(self.dir.path(), self.format)
    }

    pub fn engine(&self) -> Result<RecordEngine<FileTypeStore>> {
        Ok(RecordEngine::new(self.store()?))
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// `(name, type)` pairs as field definitions.
pub fn fields(pairs: &[(&str, &str)]) -> Vec<FieldDef> {
    pairs
        .iter()
        .map(|(name, ty)| FieldDef::new(*name, *ty))
        .collect()
}

/// Owned values for an insert.
pub fn values(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
