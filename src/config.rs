use std::path::PathBuf;

use crate::storage::codec::StorageFormat;

pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";
pub const DEFAULT_LOG_FILE: &str = "log.csv";

/// Where a run keeps type files, search output and the operation log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub output_path: PathBuf,
    pub log_path: PathBuf,
    pub format: StorageFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            format: StorageFormat::default(),
        }
    }
}

impl Config {
    /// Defaults with every path placed under `dir`.
    pub fn in_dir<P: Into<PathBuf>>(dir: P) -> Self {
        let dir = dir.into();
        Self {
            output_path: dir.join(DEFAULT_OUTPUT_FILE),
            log_path: dir.join(DEFAULT_LOG_FILE),
            data_dir: dir,
            format: StorageFormat::default(),
        }
    }

    pub fn with_format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }
}
