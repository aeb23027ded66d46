use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::{
    executor::RecordEngine,
    interpreter::command::Command,
    sink::{OperationLog, Outcome, OutputSink, unix_timestamp},
    storage::type_store::TypeStore,
    types::error::Result,
};

/// Counts for one run over an input stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub operations: usize,
    pub successes: usize,
    pub failures: usize,
    pub output_lines: usize,
}

/// Dispatches command lines to a [`RecordEngine`] in input order.
///
/// Every non-blank line produces exactly one log entry. A successful search
/// also writes its result to the output sink; a failed one writes nothing
/// there. Rejected operations are logged as `failure` and processing moves
/// on; storage faults are logged too and then end the run.
pub struct Session<S: TypeStore, L: Write, O: Write> {
    engine: RecordEngine<S>,
    log: OperationLog<L>,
    output: OutputSink<O>,
    summary: SessionSummary,
}

impl<S: TypeStore, L: Write, O: Write> Session<S, L, O> {
    pub fn new(engine: RecordEngine<S>, log: OperationLog<L>, output: OutputSink<O>) -> Self {
        Self {
            engine,
            log,
            output,
            summary: SessionSummary::default(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        for (idx, line) in input.lines().enumerate() {
            self.execute_line(idx + 1, &line?)?;
        }
        Ok(())
    }

    /// Execute one line. Returns `None` for blank lines, which are not logged.
    pub fn execute_line(&mut self, line_no: usize, line: &str) -> Result<Option<Outcome>> {
        let text = line.trim();
        let timestamp = unix_timestamp();

        let result = Command::parse(text, line_no).and_then(|command| match command {
            Some(command) => self.dispatch(command).map(Some),
            None => Ok(None),
        });

        let outcome = match result {
            Ok(None) => return Ok(None),
            Ok(Some(found)) => {
                if let Some(found) = found {
                    if let Err(e) = self.output.write_line(&found) {
                        warn!(line_no, error = %e, "output write failed, stopping");
                        self.tally(timestamp, text, Outcome::Failure)?;
                        self.log.flush()?;
                        return Err(e);
                    }
                    self.summary.output_lines += 1;
                }
                Outcome::Success
            }
            Err(e) if e.is_rejection() => {
                debug!(line_no, error = %e, "operation rejected");
                Outcome::Failure
            }
            Err(e) => {
                warn!(line_no, error = %e, "storage fault, stopping");
                self.tally(timestamp, text, Outcome::Failure)?;
                self.flush()?;
                return Err(e);
            }
        };

        self.tally(timestamp, text, outcome)?;
        Ok(Some(outcome))
    }

    /// Log one executed line and count it.
    fn tally(&mut self, timestamp: i64, text: &str, outcome: Outcome) -> Result<()> {
        self.log.record(timestamp, text, outcome)?;
        self.summary.operations += 1;
        match outcome {
            Outcome::Success => self.summary.successes += 1,
            Outcome::Failure => self.summary.failures += 1,
        }
        Ok(())
    }

    /// Run a parsed command. Only a search yields text.
    fn dispatch(&mut self, command: Command) -> Result<Option<String>> {
        match command {
            Command::CreateType {
                type_name,
                declared_field_count,
                primary_key_ordinal,
                fields,
            } => self
                .engine
                .create_type(&type_name, declared_field_count, primary_key_ordinal, &fields)
                .map(|_| None),
            Command::CreateRecord { type_name, values } => {
                self.engine.insert(&type_name, values).map(|_| None)
            }
            Command::Delete { type_name, key } => {
                self.engine.delete(&type_name, &key).map(|_| None)
            }
            Command::Search { type_name, key } => self.engine.search(&type_name, &key).map(Some),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.output.flush()?;
        self.log.flush()
    }

    /// Flush both sinks and return the run's counts.
    pub fn finish(mut self) -> Result<SessionSummary> {
        self.flush()?;
        Ok(self.summary)
    }

    /// Flush and hand back the engine and both sink writers.
    pub fn into_parts(mut self) -> Result<(RecordEngine<S>, L, O)> {
        self.flush()?;
        Ok((self.engine, self.log.into_inner(), self.output.into_inner()))
    }
}
