pub mod command;
pub mod session;

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use tracing::info;

use crate::{
    config::Config,
    executor::RecordEngine,
    interpreter::session::{Session, SessionSummary},
    sink::{OperationLog, OutputSink},
    storage::type_store::FileTypeStore,
    types::error::Result,
};

pub type FileSession = Session<FileTypeStore, BufWriter<File>, BufWriter<File>>;

/// Open the store and sinks described by `config`.
pub fn open_session(config: &Config) -> Result<FileSession> {
    let store = FileTypeStore::new(&config.data_dir, config.format)?;
    let log = OperationLog::append_to(&config.log_path)?;
    let output = OutputSink::create(&config.output_path)?;
    Ok(Session::new(RecordEngine::new(store), log, output))
}

/// Execute every command in the file at `input` against the store in `config`.
pub fn run_file<P: AsRef<Path>>(config: &Config, input: P) -> Result<SessionSummary> {
    let input = input.as_ref();
    let reader = BufReader::new(File::open(input)?);
    info!(
        input = %input.display(),
        data_dir = %config.data_dir.display(),
        format = %config.format,
        "processing commands"
    );

    let mut session = open_session(config)?;
    session.run(reader)?;
    session.finish()
}
