use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::Path,
};

use chrono::Utc;

use crate::types::error::Result;

/// Result of one dispatched operation as it appears in the operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::Failure => write!(f, "failure"),
        }
    }
}

pub fn unix_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// Append-only record of every operation attempted: `timestamp, command, outcome`.
/// Never read back by the engine.
pub struct OperationLog<W: Write> {
    writer: W,
}

impl OperationLog<BufWriter<File>> {
    /// Open `path` for appending, keeping entries from earlier runs.
    pub fn append_to<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> OperationLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn record(&mut self, timestamp: i64, command: &str, outcome: Outcome) -> Result<()> {
        writeln!(self.writer, "{}, {}, {}", timestamp, command, outcome)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Receives the rendered result of each successful search, one per line.
pub struct OutputSink<W: Write> {
    writer: W,
}

impl OutputSink<BufWriter<File>> {
    /// Create or truncate `path`; output does not carry over between runs.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
